//! Permission records returned by the permission prompt service.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Resource a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionResource {
    Calendar,
    Reminders,
}

impl PermissionResource {
    /// Returns the lowercase resource name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Reminders => "reminders",
        }
    }
}

/// Outcome of a permission query or prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// When a granted permission lapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionExpiration {
    /// The grant does not expire.
    Never,
    /// Milliseconds since the Unix epoch.
    At(i64),
}

impl Serialize for PermissionExpiration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Never => serializer.serialize_str("never"),
            Self::At(millis) => serializer.serialize_i64(*millis),
        }
    }
}

impl<'de> Deserialize<'de> for PermissionExpiration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Millis(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Millis(millis) => Ok(Self::At(millis)),
            Raw::Text(text) if text == "never" => Ok(Self::Never),
            Raw::Text(text) => Err(serde::de::Error::custom(format!(
                "invalid permission expiration: {text:?}"
            ))),
        }
    }
}

/// Permission state as reported by the native layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionResponse {
    pub status: PermissionStatus,
    pub expires: PermissionExpiration,
    pub granted: bool,
    pub can_ask_again: bool,
}

impl PermissionResponse {
    /// A non-expiring response with the given status.
    pub fn new(status: PermissionStatus, can_ask_again: bool) -> Self {
        Self {
            status,
            expires: PermissionExpiration::Never,
            granted: status == PermissionStatus::Granted,
            can_ask_again,
        }
    }

    /// Returns `true` if the OS prompt has not been answered yet.
    pub fn is_undetermined(&self) -> bool {
        self.status == PermissionStatus::Undetermined
    }
}
