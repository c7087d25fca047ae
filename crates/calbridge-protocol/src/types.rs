//! Call and reply types exchanged with the native provider.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::PROTOCOL_VERSION;
use crate::error::ProtocolError;

/// Message envelope wrapping every frame.
///
/// Provides versioning and request/reply correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Protocol version (always "1" for v1).
    pub protocol_version: String,
    /// Unique request ID for correlation.
    pub request_id: String,
    /// The actual payload.
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Creates a new envelope with the current protocol version.
    pub fn new(request_id: impl Into<String>, payload: T) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            request_id: request_id.into(),
            payload,
        }
    }

    /// Checks if this envelope uses a compatible protocol version.
    pub fn is_compatible(&self) -> bool {
        self.protocol_version == PROTOCOL_VERSION
    }
}

macro_rules! native_methods {
    ( $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)? ) => {
        /// Entry points of the native provider's capability table.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum NativeMethod {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl NativeMethod {
            /// Every entry point, in declaration order.
            pub const ALL: &'static [NativeMethod] = &[$( NativeMethod::$variant ),+];

            /// Returns the entry point's name in the native module.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl FromStr for NativeMethod {
            type Err = ProtocolError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err(ProtocolError::UnknownMethod(other.to_string())),
                }
            }
        }
    };
}

native_methods! {
    GetCalendars => "getCalendarsAsync",
    SaveCalendar => "saveCalendarAsync",
    DeleteCalendar => "deleteCalendarAsync",
    GetDefaultCalendar => "getDefaultCalendarAsync",
    GetEvents => "getEventsAsync",
    GetEventById => "getEventByIdAsync",
    SaveEvent => "saveEventAsync",
    DeleteEvent => "deleteEventAsync",
    GetAttendeesForEvent => "getAttendeesForEventAsync",
    SaveAttendeeForEvent => "saveAttendeeForEventAsync",
    DeleteAttendee => "deleteAttendeeAsync",
    GetReminders => "getRemindersAsync",
    GetReminderById => "getReminderByIdAsync",
    SaveReminder => "saveReminderAsync",
    DeleteReminder => "deleteReminderAsync",
    GetSources => "getSourcesAsync",
    GetSourceById => "getSourceByIdAsync",
    /// Synchronous on the native side; the reply carries `null`.
    OpenEventInCalendar => "openEventInCalendar",
    GetCalendarPermissions => "getCalendarPermissionsAsync",
    RequestCalendarPermissions => "requestCalendarPermissionsAsync",
    GetRemindersPermissions => "getRemindersPermissionsAsync",
    RequestRemindersPermissions => "requestRemindersPermissionsAsync",
}

impl fmt::Display for NativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One invocation of a native entry point with positional arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeCall {
    pub method: NativeMethod,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl NativeCall {
    /// Creates a call with the given arguments.
    pub fn new(method: NativeMethod, args: Vec<Value>) -> Self {
        Self { method, args }
    }

    /// Creates a call without arguments.
    pub fn bare(method: NativeMethod) -> Self {
        Self::new(method, Vec::new())
    }
}

/// The native provider's answer to a [`NativeCall`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NativeReply {
    /// The call resolved.
    Success {
        #[serde(default)]
        data: Value,
    },
    /// The call rejected; `code` and `message` come from the native layer.
    Error { code: String, message: String },
}

impl NativeReply {
    /// Creates a success reply.
    pub fn success(data: Value) -> Self {
        Self::Success { data }
    }

    /// Creates an error reply.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for success replies.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
