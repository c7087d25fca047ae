//! Tri-state fields for partial update records.
//!
//! Write payloads distinguish three cases per field: the caller did not
//! mention it (the key is not sent), the caller cleared it (the key is sent
//! as `null`), or the caller set a value. [`Patch`] models exactly that.
//!
//! Patch record fields are declared as
//!
//! ```ignore
//! #[serde(default, skip_serializing_if = "Patch::is_absent")]
//! pub title: Patch<String>,
//! ```
//!
//! so a serialized patch only carries the keys the caller supplied.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single field of a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Not supplied; omitted from the payload.
    Absent,
    /// Explicitly cleared; sent as `null`.
    Null,
    /// Set to a value.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Patch<T> {
    /// Returns `true` if the field was not supplied.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` if the field was supplied, even as `null`.
    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// Returns `true` if the field was explicitly cleared.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the value, if one was set.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the patch, returning the value if one was set.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Builds a patch from an option; `None` clears the field.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }

    /// Maps the contained value, keeping `Absent` and `Null` as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Absent => Patch::Absent,
            Self::Null => Patch::Null,
            Self::Value(v) => Patch::Value(f(v)),
        }
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent | Self::Null => serializer.serialize_none(),
            Self::Value(v) => serializer.serialize_some(v),
        }
    }
}

/// A missing key is handled by `#[serde(default)]`; a present `null`
/// becomes [`Patch::Null`].
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_option(Option::<T>::deserialize(deserializer)?))
    }
}
