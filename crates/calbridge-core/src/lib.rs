//! Core types: entities, patches, vocabularies, wire dates, permissions

pub mod attendee;
pub mod calendar;
pub mod event;
pub mod patch;
pub mod permission;
pub mod platform;
pub mod reminder;
pub mod time;
pub mod tracing;
pub mod vocab;

pub use attendee::{Attendee, AttendeePatch};
pub use calendar::{Calendar, CalendarPatch, Source};
pub use event::{
    Alarm, AlarmLocation, Coordinates, Event, EventPatch, RecurrenceDay, RecurrenceRule,
    RecurringEventOptions,
};
pub use patch::Patch;
pub use permission::{PermissionExpiration, PermissionResource, PermissionResponse, PermissionStatus};
pub use platform::Platform;
pub use reminder::{Reminder, ReminderPatch};
pub use time::{DateValue, format_wire_date};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use vocab::{
    AlarmMethod, AlarmProximity, AttendeeRole, AttendeeStatus, AttendeeType, Availability,
    CalendarAccessLevel, CalendarType, DayOfTheWeek, EntityType, EventAccessLevel, EventStatus,
    Frequency, MonthOfTheYear, ReminderStatus, SourceType, UnknownVariant,
};
