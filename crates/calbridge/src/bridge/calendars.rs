use calbridge_core::{Calendar, CalendarPatch, EntityType};
use calbridge_protocol::NativeMethod;
use serde_json::Value;

use super::{CalendarBridge, require_id};
use crate::error::BridgeResult;
use crate::normalize::{process_color_field, set_id, strip_id, to_payload};

impl CalendarBridge {
    /// Lists calendars, optionally only those holding `entity_type` (iOS).
    pub async fn get_calendars(&self, entity_type: Option<EntityType>) -> BridgeResult<Vec<Calendar>> {
        const OP: &str = "getCalendarsAsync";
        self.require(NativeMethod::GetCalendars, OP)?;

        let filter = entity_type.map_or(Value::Null, |t| Value::from(t.as_str()));
        self.dispatch_as(OP, NativeMethod::GetCalendars, vec![filter]).await
    }

    /// Creates a calendar and returns its identifier.
    ///
    /// Any `id` in `details` is ignored.
    pub async fn create_calendar(&self, details: &CalendarPatch) -> BridgeResult<String> {
        const OP: &str = "createCalendarAsync";
        self.require(NativeMethod::SaveCalendar, OP)?;

        let mut payload = to_payload(OP, details)?;
        strip_id(&mut payload);
        process_color_field(OP, &mut payload, self.profile.signed_colors)?;

        self.dispatch_as(OP, NativeMethod::SaveCalendar, vec![Value::Object(payload)])
            .await
    }

    /// Updates the calendar `id` and returns its identifier.
    ///
    /// Fields the platform treats as read-only are sent anyway after an
    /// advisory is logged.
    pub async fn update_calendar(&self, id: &str, details: &CalendarPatch) -> BridgeResult<String> {
        const OP: &str = "updateCalendarAsync";
        self.require(NativeMethod::SaveCalendar, OP)?;
        require_id(OP, id, "calendar")?;

        let mut payload = to_payload(OP, details)?;
        self.warn_read_only(OP, &payload, self.profile.calendar_read_only);
        set_id(&mut payload, id);
        process_color_field(OP, &mut payload, self.profile.signed_colors)?;

        self.dispatch_as(OP, NativeMethod::SaveCalendar, vec![Value::Object(payload)])
            .await
    }

    /// Deletes the calendar `id` and every event in it.
    pub async fn delete_calendar(&self, id: &str) -> BridgeResult<()> {
        const OP: &str = "deleteCalendarAsync";
        self.require(NativeMethod::DeleteCalendar, OP)?;
        require_id(OP, id, "calendar")?;

        self.dispatch_unit(OP, NativeMethod::DeleteCalendar, vec![Value::from(id)])
            .await
    }

    /// Returns the calendar new events go to by default (iOS).
    pub async fn get_default_calendar(&self) -> BridgeResult<Calendar> {
        const OP: &str = "getDefaultCalendarAsync";
        self.require(NativeMethod::GetDefaultCalendar, OP)?;

        self.dispatch_as(OP, NativeMethod::GetDefaultCalendar, Vec::new())
            .await
    }
}
