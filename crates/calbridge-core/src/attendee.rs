//! Event attendee records.

use serde::{Deserialize, Serialize};

use crate::patch::Patch;
use crate::vocab::{AttendeeRole, AttendeeStatus, AttendeeType};

/// An attendee of exactly one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    /// Attendee identifier (Android).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub role: AttendeeRole,
    pub status: AttendeeStatus,
    #[serde(rename = "type")]
    pub attendee_type: AttendeeType,
    /// Whether this attendee is the device owner (iOS).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_current_user: Option<bool>,
    /// Contact URL (iOS).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Email address (Android).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Fields supplied when creating or updating an attendee (Android).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeePatch {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub email: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub role: Patch<AttendeeRole>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub status: Patch<AttendeeStatus>,
    #[serde(default, rename = "type", skip_serializing_if = "Patch::is_absent")]
    pub attendee_type: Patch<AttendeeType>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub is_current_user: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub url: Patch<String>,
}

impl AttendeePatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a patch carrying every field a new attendee requires.
    pub fn invite(
        email: impl Into<String>,
        role: AttendeeRole,
        attendee_type: AttendeeType,
        status: AttendeeStatus,
    ) -> Self {
        Self {
            email: Patch::Value(email.into()),
            role: Patch::Value(role),
            attendee_type: Patch::Value(attendee_type),
            status: Patch::Value(status),
            ..Self::default()
        }
    }

    /// Builder method to set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Patch::Value(name.into());
        self
    }

    /// Builder method to set the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Patch::Value(email.into());
        self
    }

    /// Builder method to set the role.
    pub fn with_role(mut self, role: AttendeeRole) -> Self {
        self.role = Patch::Value(role);
        self
    }

    /// Builder method to set the response status.
    pub fn with_status(mut self, status: AttendeeStatus) -> Self {
        self.status = Patch::Value(status);
        self
    }

    /// Builder method to set the attendee type.
    pub fn with_type(mut self, attendee_type: AttendeeType) -> Self {
        self.attendee_type = Patch::Value(attendee_type);
        self
    }
}
