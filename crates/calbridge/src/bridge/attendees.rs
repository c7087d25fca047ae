use calbridge_core::{Attendee, AttendeePatch, RecurringEventOptions};
use calbridge_protocol::NativeMethod;
use serde_json::{Map, Value};

use super::{CalendarBridge, article, require_id};
use crate::error::{BridgeError, BridgeResult};
use crate::normalize::{first_missing, set_id, strip_id, to_payload};

impl CalendarBridge {
    /// Lists the attendees of event `id`.
    ///
    /// iOS addresses one occurrence through `options.instance_start_date`;
    /// Android only takes the id.
    pub async fn get_attendees_for_event(
        &self,
        id: &str,
        options: &RecurringEventOptions,
    ) -> BridgeResult<Vec<Attendee>> {
        const OP: &str = "getAttendeesForEventAsync";
        self.require(NativeMethod::GetAttendeesForEvent, OP)?;
        require_id(OP, id, "event")?;

        let target = if self.profile.honors_instance_start_date {
            let mut target = Map::new();
            set_id(&mut target, id);
            if let Some(date) = &options.instance_start_date {
                target.insert(
                    "instanceStartDate".to_string(),
                    Value::String(date.to_wire_string()),
                );
            }
            Value::Object(target)
        } else {
            Value::from(id)
        };
        self.dispatch_as(OP, NativeMethod::GetAttendeesForEvent, vec![target])
            .await
    }

    /// Adds an attendee to event `event_id` and returns its identifier
    /// (Android).
    ///
    /// `email`, `role`, `type` and `status` are required.
    pub async fn create_attendee(&self, event_id: &str, details: &AttendeePatch) -> BridgeResult<String> {
        const OP: &str = "createAttendeeAsync";
        self.require(NativeMethod::SaveAttendeeForEvent, OP)?;
        require_id(OP, event_id, "event")?;

        let mut payload = to_payload(OP, details)?;
        if let Some(field) = first_missing(&payload, self.profile.attendee_create_required) {
            return Err(BridgeError::invalid_argument(
                OP,
                format!("{OP} requires {} {field} (string)", article(field)),
            ));
        }
        strip_id(&mut payload);

        let args = vec![Value::Object(payload), Value::from(event_id)];
        self.dispatch_as(OP, NativeMethod::SaveAttendeeForEvent, args)
            .await
    }

    /// Updates attendee `id` and returns its identifier (Android).
    pub async fn update_attendee(&self, id: &str, details: &AttendeePatch) -> BridgeResult<String> {
        const OP: &str = "updateAttendeeAsync";
        self.require(NativeMethod::SaveAttendeeForEvent, OP)?;
        require_id(OP, id, "event")?;

        let mut payload = to_payload(OP, details)?;
        set_id(&mut payload, id);

        let args = vec![Value::Object(payload), Value::Null];
        self.dispatch_as(OP, NativeMethod::SaveAttendeeForEvent, args)
            .await
    }

    /// Removes attendee `id` (Android).
    pub async fn delete_attendee(&self, id: &str) -> BridgeResult<()> {
        const OP: &str = "deleteAttendeeAsync";
        self.require(NativeMethod::DeleteAttendee, OP)?;
        require_id(OP, id, "event")?;

        self.dispatch_unit(OP, NativeMethod::DeleteAttendee, vec![Value::from(id)])
            .await
    }
}
