//! Event records and their nested alarm and recurrence types.

use serde::{Deserialize, Serialize};

use crate::patch::Patch;
use crate::time::DateValue;
use crate::vocab::{
    AlarmMethod, AlarmProximity, Availability, DayOfTheWeek, EventAccessLevel, EventStatus,
    Frequency, MonthOfTheYear,
};

/// Coordinates of a location-based alarm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Location trigger of an alarm (iOS).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlarmLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity: Option<AlarmProximity>,
    /// Radius in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coordinates>,
}

/// An alarm attached to an event or reminder.
///
/// Exactly one trigger is expected: an absolute date, a relative offset, or
/// a structured location. The native layer decides what to do otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    /// Absolute trigger time (iOS).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_date: Option<DateValue>,
    /// Minutes relative to the start; negative values fire before it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_offset: Option<i32>,
    /// Location trigger (iOS).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_location: Option<AlarmLocation>,
    /// Delivery method (Android).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<AlarmMethod>,
}

impl Alarm {
    /// An alarm firing `minutes` before the start.
    pub fn minutes_before(minutes: i32) -> Self {
        Self {
            relative_offset: Some(-minutes),
            ..Default::default()
        }
    }

    /// An alarm firing at a fixed time.
    pub fn at(date: impl Into<DateValue>) -> Self {
        Self {
            absolute_date: Some(date.into()),
            ..Default::default()
        }
    }

    /// Builder method to set the delivery method.
    pub fn with_method(mut self, method: AlarmMethod) -> Self {
        self.method = Some(method);
        self
    }
}

/// A weekday entry of a recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceDay {
    pub day_of_the_week: DayOfTheWeek,
    /// Ordinal week within the period, e.g. `-1` for "last".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_number: Option<i32>,
}

/// Recurrence of an event or reminder.
///
/// `end_date` and `occurrence` are alternative terminations. Which of the
/// fine-grained pattern fields are honored depends on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_the_week: Option<Vec<RecurrenceDay>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_the_month: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months_of_the_year: Option<Vec<MonthOfTheYear>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks_of_the_year: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_the_year: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_positions: Option<Vec<i32>>,
}

impl RecurrenceRule {
    /// Creates a rule with the given frequency and no termination.
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: None,
            end_date: None,
            occurrence: None,
            days_of_the_week: None,
            days_of_the_month: None,
            months_of_the_year: None,
            weeks_of_the_year: None,
            days_of_the_year: None,
            set_positions: None,
        }
    }

    /// Builder method to set the interval.
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Builder method to end the recurrence at a date.
    pub fn until(mut self, end: impl Into<DateValue>) -> Self {
        self.end_date = Some(end.into());
        self
    }

    /// Builder method to end the recurrence after a number of occurrences.
    pub fn times(mut self, occurrence: u32) -> Self {
        self.occurrence = Some(occurrence);
        self
    }

    /// Builder method to restrict the rule to weekdays.
    pub fn on_days(mut self, days: impl IntoIterator<Item = DayOfTheWeek>) -> Self {
        self.days_of_the_week = Some(
            days.into_iter()
                .map(|day_of_the_week| RecurrenceDay {
                    day_of_the_week,
                    week_number: None,
                })
                .collect(),
        );
        self
    }
}

/// An event as reported by the native provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub calendar_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    pub start_date: DateValue,
    pub end_date: DateValue,
    #[serde(default)]
    pub all_day: bool,
    pub availability: Availability,
    pub status: EventStatus,
    #[serde(default)]
    pub alarms: Vec<Alarm>,
    #[serde(default)]
    pub recurrence_rule: Option<RecurrenceRule>,

    /// iOS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateValue>,
    /// iOS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateValue>,
    /// iOS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_start_date: Option<DateValue>,
    /// iOS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_detached: Option<bool>,
    /// iOS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    /// iOS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time_zone: Option<String>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_email: Option<String>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<EventAccessLevel>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests_can_modify: Option<bool>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests_can_invite_others: Option<bool>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests_can_see_guests: Option<bool>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<String>,
    /// Android.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
}

impl Event {
    /// Returns `true` if the event belongs to a recurring series.
    pub fn is_recurring(&self) -> bool {
        self.recurrence_rule.is_some()
    }
}

/// Fields supplied when creating or updating an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub calendar_id: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub location: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub notes: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub time_zone: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub end_time_zone: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub url: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub start_date: Patch<DateValue>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub end_date: Patch<DateValue>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub all_day: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub availability: Patch<Availability>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub status: Patch<EventStatus>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub alarms: Patch<Vec<Alarm>>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub recurrence_rule: Patch<RecurrenceRule>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub creation_date: Patch<DateValue>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub last_modified_date: Patch<DateValue>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub original_start_date: Patch<DateValue>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub is_detached: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub organizer: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub organizer_email: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub access_level: Patch<EventAccessLevel>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub guests_can_modify: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub guests_can_invite_others: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub guests_can_see_guests: Patch<bool>,
}

impl EventPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Patch::Value(title.into());
        self
    }

    /// Builder method to set start and end.
    pub fn with_dates(mut self, start: impl Into<DateValue>, end: impl Into<DateValue>) -> Self {
        self.start_date = Patch::Value(start.into());
        self.end_date = Patch::Value(end.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Patch::Value(location.into());
        self
    }

    /// Builder method to set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Patch::Value(notes.into());
        self
    }

    /// Builder method to set the time zone.
    pub fn with_time_zone(mut self, tz: impl Into<String>) -> Self {
        self.time_zone = Patch::Value(tz.into());
        self
    }

    /// Builder method to mark the event all-day.
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = Patch::Value(all_day);
        self
    }

    /// Builder method to set the availability.
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = Patch::Value(availability);
        self
    }

    /// Builder method to set the alarms.
    pub fn with_alarms(mut self, alarms: Vec<Alarm>) -> Self {
        self.alarms = Patch::Value(alarms);
        self
    }

    /// Builder method to set the recurrence rule.
    pub fn with_recurrence_rule(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence_rule = Patch::Value(rule);
        self
    }

    /// Builder method to remove recurrence from the event.
    pub fn without_recurrence(mut self) -> Self {
        self.recurrence_rule = Patch::Null;
        self
    }
}

/// Addressing of one occurrence of a recurring event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurringEventOptions {
    /// Apply the operation to this and all future occurrences.
    pub future_events: bool,
    /// Start date of the addressed occurrence. Only iOS honors it.
    pub instance_start_date: Option<DateValue>,
}

impl RecurringEventOptions {
    /// Options addressing the whole event (or its first occurrence).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to address the occurrence starting at `date`.
    pub fn instance(mut self, date: impl Into<DateValue>) -> Self {
        self.instance_start_date = Some(date.into());
        self
    }

    /// Builder method to extend the operation to future occurrences.
    pub fn with_future_events(mut self, future_events: bool) -> Self {
        self.future_events = future_events;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn patch_dates_serialize_at_every_depth() {
        let start = Utc.with_ymd_and_hms(2025, 2, 5, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 2, 5, 10, 0, 0).unwrap();
        let until = Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap();

        let patch = EventPatch::new()
            .with_dates(start, end)
            .with_alarms(vec![Alarm::at(start), Alarm::minutes_before(15)])
            .with_recurrence_rule(RecurrenceRule::new(Frequency::Weekly).until(until));

        insta::assert_json_snapshot!(serde_json::to_value(&patch).unwrap(), @r###"
        {
          "alarms": [
            {
              "absoluteDate": "2025-02-05T09:00:00.000Z"
            },
            {
              "relativeOffset": -15
            }
          ],
          "endDate": "2025-02-05T10:00:00.000Z",
          "recurrenceRule": {
            "endDate": "2025-06-30T00:00:00.000Z",
            "frequency": "weekly"
          },
          "startDate": "2025-02-05T09:00:00.000Z"
        }
        "###);
    }

    #[test]
    fn cleared_recurrence_is_sent_as_null() {
        let patch = EventPatch::new().without_recurrence();
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"recurrenceRule": null})
        );
    }

    #[test]
    fn event_from_native_payload() {
        let event: Event = serde_json::from_value(json!({
            "id": "evt-1",
            "calendarId": "cal-1",
            "title": "Standup",
            "location": null,
            "notes": "",
            "timeZone": "UTC",
            "startDate": "2025-02-05T09:00:00.000Z",
            "endDate": "2025-02-05T09:15:00.000Z",
            "allDay": false,
            "availability": "busy",
            "status": "confirmed",
            "alarms": [{"relativeOffset": -5, "method": "alert"}],
            "recurrenceRule": {
                "frequency": "weekly",
                "interval": 1,
                "daysOfTheWeek": [{"dayOfTheWeek": 2}, {"dayOfTheWeek": 4}]
            },
            "isDetached": false,
            "organizer": "someone"
        }))
        .unwrap();

        assert!(event.is_recurring());
        assert!(event.location.is_none());
        assert_eq!(event.alarms[0].method, Some(AlarmMethod::Alert));
        let rule = event.recurrence_rule.unwrap();
        assert_eq!(
            rule.days_of_the_week.unwrap()[1].day_of_the_week,
            DayOfTheWeek::Wednesday
        );
        assert!(event.start_date.as_datetime().is_some());
    }

    #[test]
    fn recurring_options_builder() {
        let opts = RecurringEventOptions::new()
            .instance("2025-02-05T09:00:00.000Z")
            .with_future_events(true);
        assert!(opts.future_events);
        assert!(opts.instance_start_date.is_some());
        assert!(!RecurringEventOptions::default().future_events);
    }

    #[test]
    fn recurrence_day_builder() {
        let rule = RecurrenceRule::new(Frequency::Weekly)
            .with_interval(2)
            .times(10)
            .on_days([DayOfTheWeek::Monday, DayOfTheWeek::Friday]);
        insta::assert_json_snapshot!(serde_json::to_value(&rule).unwrap(), @r###"
        {
          "daysOfTheWeek": [
            {
              "dayOfTheWeek": 2
            },
            {
              "dayOfTheWeek": 6
            }
          ],
          "frequency": "weekly",
          "interval": 2,
          "occurrence": 10
        }
        "###);
    }
}
