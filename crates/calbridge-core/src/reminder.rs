//! Reminder records (iOS).

use serde::{Deserialize, Serialize};

use crate::event::{Alarm, RecurrenceRule};
use crate::patch::Patch;
use crate::time::DateValue;

/// A reminder as reported by the native provider.
///
/// Reminders can be created with almost no data, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarms: Option<Vec<Alarm>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<RecurrenceRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<DateValue>,
}

/// Fields supplied when creating or updating a reminder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPatch {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub calendar_id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub location: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub creation_date: Patch<DateValue>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub last_modified_date: Patch<DateValue>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub time_zone: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub url: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub notes: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub alarms: Patch<Vec<Alarm>>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub recurrence_rule: Patch<RecurrenceRule>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub start_date: Patch<DateValue>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub due_date: Patch<DateValue>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub completed: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub completion_date: Patch<DateValue>,
}

impl ReminderPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Patch::Value(title.into());
        self
    }

    /// Builder method to set the due date.
    pub fn with_due_date(mut self, due: impl Into<DateValue>) -> Self {
        self.due_date = Patch::Value(due.into());
        self
    }

    /// Builder method to mark the reminder completed.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Patch::Value(completed);
        self
    }

    /// Builder method to set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Patch::Value(notes.into());
        self
    }
}
