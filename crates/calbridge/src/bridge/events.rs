use calbridge_core::{DateValue, Event, EventPatch, RecurringEventOptions};
use calbridge_protocol::NativeMethod;
use serde_json::{Map, Value, json};
use tracing::warn;

use super::{CalendarBridge, article, date_or_null, require_id};
use crate::error::{BridgeError, BridgeResult};
use crate::normalize::{coerce_integer, first_missing, set_id, strip_id, to_payload};

impl CalendarBridge {
    /// Returns events of `calendar_ids` overlapping `[start, end]`.
    pub async fn get_events(
        &self,
        calendar_ids: &[String],
        start: impl Into<DateValue>,
        end: impl Into<DateValue>,
    ) -> BridgeResult<Vec<Event>> {
        const OP: &str = "getEventsAsync";
        self.require(NativeMethod::GetEvents, OP)?;

        let (start, end) = (start.into(), end.into());
        if start.is_blank() {
            return Err(BridgeError::invalid_argument(
                OP,
                "getEventsAsync must be called with a startDate (date) to search for events",
            ));
        }
        if end.is_blank() {
            return Err(BridgeError::invalid_argument(
                OP,
                "getEventsAsync must be called with an endDate (date) to search for events",
            ));
        }
        if calendar_ids.is_empty() {
            return Err(BridgeError::invalid_argument(
                OP,
                "getEventsAsync must be called with a non-empty array of calendarIds to search",
            ));
        }

        let args = vec![
            Value::String(start.to_wire_string()),
            Value::String(end.to_wire_string()),
            json!(calendar_ids),
        ];
        self.dispatch_as(OP, NativeMethod::GetEvents, args).await
    }

    /// Returns the event `id`, or one instance of it on iOS.
    pub async fn get_event(&self, id: &str, options: &RecurringEventOptions) -> BridgeResult<Event> {
        const OP: &str = "getEventAsync";
        self.require(NativeMethod::GetEventById, OP)?;
        require_id(OP, id, "event")?;

        let mut args = vec![Value::from(id)];
        if self.profile.honors_instance_start_date {
            args.push(date_or_null(options.instance_start_date.as_ref()));
        }
        self.dispatch_as(OP, NativeMethod::GetEventById, args).await
    }

    /// Creates an event in `calendar_id` and returns its identifier.
    pub async fn create_event(&self, calendar_id: &str, details: &EventPatch) -> BridgeResult<String> {
        const OP: &str = "createEventAsync";
        self.require(NativeMethod::SaveEvent, OP)?;
        require_id(OP, calendar_id, "calendar")?;

        let mut payload = to_payload(OP, details)?;
        if let Some(field) = first_missing(&payload, self.profile.event_create_required) {
            return Err(BridgeError::invalid_argument(
                OP,
                format!("{OP} requires {} {field} (Date)", article(field)),
            ));
        }
        strip_id(&mut payload);
        payload.insert("calendarId".to_string(), Value::from(calendar_id));

        let args = vec![Value::Object(payload), Value::Object(Map::new())];
        self.dispatch_as(OP, NativeMethod::SaveEvent, args).await
    }

    /// Updates the event `id` and returns its identifier.
    ///
    /// On iOS `options.instance_start_date` selects one occurrence of a
    /// recurring event; `options.future_events` extends the change to the
    /// occurrences after it.
    pub async fn update_event(
        &self,
        id: &str,
        details: &EventPatch,
        options: &RecurringEventOptions,
    ) -> BridgeResult<String> {
        const OP: &str = "updateEventAsync";
        self.require(NativeMethod::SaveEvent, OP)?;
        require_id(OP, id, "event")?;

        let mut payload = to_payload(OP, details)?;
        self.warn_read_only(OP, &payload, self.profile.event_read_only);
        set_id(&mut payload, id);
        self.insert_instance_start(&mut payload, options);

        let args = vec![
            Value::Object(payload),
            json!({ "futureEvents": options.future_events }),
        ];
        self.dispatch_as(OP, NativeMethod::SaveEvent, args).await
    }

    /// Deletes the event `id`, or some of its occurrences.
    pub async fn delete_event(&self, id: &str, options: &RecurringEventOptions) -> BridgeResult<()> {
        const OP: &str = "deleteEventAsync";
        self.require(NativeMethod::DeleteEvent, OP)?;
        require_id(OP, id, "event")?;

        let mut target = Map::new();
        set_id(&mut target, id);
        self.insert_instance_start(&mut target, options);

        let args = vec![
            Value::Object(target),
            json!({ "futureEvents": options.future_events }),
        ];
        self.dispatch_unit(OP, NativeMethod::DeleteEvent, args).await
    }

    /// Opens event `id` in the system calendar app (Android).
    ///
    /// Where the platform has no such entry point this logs a warning and
    /// does nothing.
    pub async fn open_event_in_calendar(&self, id: &str) -> BridgeResult<()> {
        const OP: &str = "openEventInCalendar";
        if !self.binding.supports(NativeMethod::OpenEventInCalendar) {
            warn!(
                platform = %self.config.platform,
                "openEventInCalendar is not available on platform: {}",
                self.config.platform
            );
            return Ok(());
        }
        require_id(OP, id, "event")?;
        let numeric = coerce_integer(id).ok_or_else(|| {
            BridgeError::invalid_argument(
                OP,
                format!("{OP} must be called with a numeric id of the target event, got {id:?}"),
            )
        })?;

        self.dispatch_unit(OP, NativeMethod::OpenEventInCalendar, vec![Value::from(numeric)])
            .await
    }

    /// Adds `instanceStartDate` to an event target where the platform
    /// addresses occurrences by start date.
    fn insert_instance_start(&self, target: &mut Map<String, Value>, options: &RecurringEventOptions) {
        if !self.profile.honors_instance_start_date {
            return;
        }
        if let Some(date) = &options.instance_start_date {
            target.insert(
                "instanceStartDate".to_string(),
                Value::String(date.to_wire_string()),
            );
        }
    }
}
