use calbridge_core::{DateValue, Reminder, ReminderPatch, ReminderStatus};
use calbridge_protocol::NativeMethod;
use serde_json::{Value, json};

use super::{CalendarBridge, date_or_null, require_id};
use crate::error::{BridgeError, BridgeResult};
use crate::normalize::{set_id, strip_id, to_payload};

impl CalendarBridge {
    /// Returns reminders of `calendar_ids` (iOS).
    ///
    /// With a `status` filter both bounds are required; without one they
    /// may be omitted.
    pub async fn get_reminders(
        &self,
        calendar_ids: &[String],
        status: Option<ReminderStatus>,
        start: Option<DateValue>,
        end: Option<DateValue>,
    ) -> BridgeResult<Vec<Reminder>> {
        const OP: &str = "getRemindersAsync";
        self.require(NativeMethod::GetReminders, OP)?;

        let start = start.filter(|d| !d.is_blank());
        let end = end.filter(|d| !d.is_blank());
        if status.is_some() && start.is_none() {
            return Err(BridgeError::invalid_argument(
                OP,
                "getRemindersAsync must be called with a startDate (date) to search for reminders",
            ));
        }
        if status.is_some() && end.is_none() {
            return Err(BridgeError::invalid_argument(
                OP,
                "getRemindersAsync must be called with an endDate (date) to search for reminders",
            ));
        }
        if calendar_ids.is_empty() {
            return Err(BridgeError::invalid_argument(
                OP,
                "getRemindersAsync must be called with a non-empty array of calendarIds to search",
            ));
        }

        let args = vec![
            date_or_null(start.as_ref()),
            date_or_null(end.as_ref()),
            json!(calendar_ids),
            status.map_or(Value::Null, |s| Value::from(s.as_str())),
        ];
        self.dispatch_as(OP, NativeMethod::GetReminders, args).await
    }

    /// Returns reminder `id` (iOS).
    pub async fn get_reminder(&self, id: &str) -> BridgeResult<Reminder> {
        const OP: &str = "getReminderAsync";
        self.require(NativeMethod::GetReminderById, OP)?;
        require_id(OP, id, "reminder")?;

        self.dispatch_as(OP, NativeMethod::GetReminderById, vec![Value::from(id)])
            .await
    }

    /// Creates a reminder and returns its identifier (iOS).
    ///
    /// Without `calendar_id` the platform's default reminders list is used.
    pub async fn create_reminder(
        &self,
        calendar_id: Option<&str>,
        details: &ReminderPatch,
    ) -> BridgeResult<String> {
        const OP: &str = "createReminderAsync";
        self.require(NativeMethod::SaveReminder, OP)?;

        let mut payload = to_payload(OP, details)?;
        strip_id(&mut payload);
        payload.remove("calendarId");
        if let Some(calendar_id) = calendar_id {
            payload.insert("calendarId".to_string(), Value::from(calendar_id));
        }

        self.dispatch_as(OP, NativeMethod::SaveReminder, vec![Value::Object(payload)])
            .await
    }

    /// Updates reminder `id` and returns its identifier (iOS).
    pub async fn update_reminder(&self, id: &str, details: &ReminderPatch) -> BridgeResult<String> {
        const OP: &str = "updateReminderAsync";
        self.require(NativeMethod::SaveReminder, OP)?;
        require_id(OP, id, "reminder")?;

        let mut payload = to_payload(OP, details)?;
        self.warn_read_only(OP, &payload, self.profile.reminder_read_only);
        set_id(&mut payload, id);

        self.dispatch_as(OP, NativeMethod::SaveReminder, vec![Value::Object(payload)])
            .await
    }

    /// Deletes reminder `id` (iOS).
    pub async fn delete_reminder(&self, id: &str) -> BridgeResult<()> {
        const OP: &str = "deleteReminderAsync";
        self.require(NativeMethod::DeleteReminder, OP)?;
        require_id(OP, id, "reminder")?;

        self.dispatch_unit(OP, NativeMethod::DeleteReminder, vec![Value::from(id)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use calbridge_core::{Patch, Platform};
    use chrono::{TimeZone, Utc};

    use super::super::test_support::{bridge, native};
    use crate::binding::RecordingBinding;

    use super::*;

    fn ids() -> Vec<String> {
        vec!["r-list".to_string()]
    }

    #[tokio::test]
    async fn status_filter_requires_both_dates() {
        let (bridge, binding) = native(Platform::Ios);
        let start = DateValue::from(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let err = bridge
            .get_reminders(&ids(), Some(ReminderStatus::Completed), None, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("startDate"));

        let err = bridge
            .get_reminders(&ids(), Some(ReminderStatus::Completed), Some(start), None)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "getRemindersAsync must be called with an endDate (date) to search for reminders"
        );
        assert!(binding.calls().is_empty());
    }

    #[tokio::test]
    async fn no_status_dispatches_null_bounds() {
        let (bridge, binding) = bridge(
            Platform::Ios,
            RecordingBinding::for_platform(Platform::Ios).with_reply(
                NativeMethod::GetReminders,
                json!([{"id": "r1", "title": "Buy milk", "completed": false}]),
            ),
        );

        let reminders = bridge.get_reminders(&ids(), None, None, None).await.unwrap();
        assert_eq!(reminders[0].title.as_deref(), Some("Buy milk"));
        assert_eq!(
            binding.last_call().unwrap().args,
            vec![Value::Null, Value::Null, json!(["r-list"]), Value::Null]
        );
    }

    #[tokio::test]
    async fn status_and_dates_are_dispatched() {
        let (bridge, binding) = bridge(
            Platform::Ios,
            RecordingBinding::for_platform(Platform::Ios)
                .with_reply(NativeMethod::GetReminders, json!([])),
        );
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        bridge
            .get_reminders(
                &ids(),
                Some(ReminderStatus::Incomplete),
                Some(start.into()),
                Some(end.into()),
            )
            .await
            .unwrap();
        assert_eq!(
            binding.last_call().unwrap().args,
            vec![
                json!("2024-01-01T00:00:00.000Z"),
                json!("2024-02-01T00:00:00.000Z"),
                json!(["r-list"]),
                json!("incomplete"),
            ]
        );
    }

    #[tokio::test]
    async fn empty_calendar_ids_rejected() {
        let (bridge, _) = native(Platform::Ios);
        let err = bridge.get_reminders(&[], None, None, None).await.unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn reminders_are_ios_only() {
        let (android, _) = native(Platform::Android);
        let err = android.get_reminders(&ids(), None, None, None).await.unwrap_err();
        assert!(err.is_unavailable());
        assert!(android.get_reminder("r1").await.unwrap_err().is_unavailable());
    }

    #[tokio::test]
    async fn create_reminder_calendar_id_handling() {
        let (bridge, binding) = bridge(
            Platform::Ios,
            RecordingBinding::for_platform(Platform::Ios)
                .with_reply(NativeMethod::SaveReminder, json!("r-new")),
        );
        let mut details = ReminderPatch::new().with_title("Call back");
        details.id = Patch::Value("stale".into());

        let id = bridge.create_reminder(Some("r-list"), &details).await.unwrap();
        assert_eq!(id, "r-new");
        assert_eq!(
            binding.last_call().unwrap().args,
            vec![json!({"title": "Call back", "calendarId": "r-list"})]
        );

        bridge.create_reminder(None, &details).await.unwrap();
        assert_eq!(
            binding.last_call().unwrap().args,
            vec![json!({"title": "Call back"})]
        );
    }

    #[tokio::test]
    async fn update_reminder_keeps_read_only_fields() {
        let (bridge, binding) = bridge(
            Platform::Ios,
            RecordingBinding::for_platform(Platform::Ios)
                .with_reply(NativeMethod::SaveReminder, json!("r1")),
        );
        let mut details = ReminderPatch::new().with_completed(true);
        details.creation_date = Patch::Value("2023-12-01T00:00:00.000Z".into());

        bridge.update_reminder("r1", &details).await.unwrap();
        assert_eq!(
            binding.last_call().unwrap().args,
            vec![json!({
                "id": "r1",
                "completed": true,
                "creationDate": "2023-12-01T00:00:00.000Z"
            })]
        );
    }

    #[tokio::test]
    async fn delete_reminder_requires_id() {
        let (bridge, _) = native(Platform::Ios);
        let err = bridge.delete_reminder("").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "deleteReminderAsync must be called with an id (string) of the target reminder"
        );
    }
}
