//! Calendar and source records.
//!
//! Fields marked iOS or Android are only populated by that platform's
//! provider and are `None` on the other.

use serde::{Deserialize, Serialize};

use crate::patch::Patch;
use crate::vocab::{
    AlarmMethod, AttendeeType, Availability, CalendarAccessLevel, CalendarType, EntityType,
    SourceType,
};

/// An account or provider backing one or more calendars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Source identifier (iOS).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Account type. Android reports free-form account types, so this is a
    /// plain string; compare against [`SourceType::as_str`].
    #[serde(rename = "type")]
    pub source_type: String,
    /// Display name of the account.
    pub name: String,
    /// Whether this is a device-local account (Android).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_local_account: Option<bool>,
}

impl Source {
    /// Creates a source of the given type.
    pub fn new(source_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            source_type: source_type.into(),
            name: name.into(),
            is_local_account: None,
        }
    }

    /// Builder method to mark the source as a local account.
    pub fn with_local_account(mut self, local: bool) -> Self {
        self.is_local_account = Some(local);
        self
    }

    /// Returns the parsed source type, if it is one of the known values.
    pub fn known_type(&self) -> Option<SourceType> {
        self.source_type.parse().ok()
    }
}

/// A calendar as reported by the native provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub source: Source,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub allows_modifications: bool,
    #[serde(default)]
    pub allowed_availabilities: Vec<Availability>,

    /// iOS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// iOS.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub calendar_type: Option<CalendarType>,
    /// iOS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,

    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_account: Option<String>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_reminders: Option<Vec<AlarmMethod>>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_attendee_types: Option<Vec<AttendeeType>>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_synced: Option<bool>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<CalendarAccessLevel>,
}

/// Fields supplied when creating or updating a calendar.
///
/// `color` is a CSS-style color string; it is converted to the native
/// integer form before dispatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarPatch {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub source: Patch<Source>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub source_id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub color: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub allows_modifications: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub allowed_availabilities: Patch<Vec<Availability>>,
    #[serde(default, rename = "type", skip_serializing_if = "Patch::is_absent")]
    pub calendar_type: Patch<CalendarType>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub entity_type: Patch<EntityType>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub is_primary: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub owner_account: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub time_zone: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub allowed_reminders: Patch<Vec<AlarmMethod>>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub allowed_attendee_types: Patch<Vec<AttendeeType>>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub is_visible: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub is_synced: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub access_level: Patch<CalendarAccessLevel>,
}

impl CalendarPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Patch::Value(title.into());
        self
    }

    /// Builder method to set the color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Patch::Value(color.into());
        self
    }

    /// Builder method to set the backing source.
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Patch::Value(source);
        self
    }

    /// Builder method to set the entity type (iOS).
    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Patch::Value(entity_type);
        self
    }

    /// Builder method to set the Android account name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Patch::Value(name.into());
        self
    }

    /// Builder method to set the Android owner account.
    pub fn with_owner_account(mut self, owner: impl Into<String>) -> Self {
        self.owner_account = Patch::Value(owner.into());
        self
    }

    /// Builder method to set the Android access level.
    pub fn with_access_level(mut self, level: CalendarAccessLevel) -> Self {
        self.access_level = Patch::Value(level);
        self
    }
}
