//! Controlled vocabularies for string-typed record fields.
//!
//! The wire strings are the ones the native providers emit and accept. Some
//! values only exist on one platform; they are noted per variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string that is not part of a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {vocabulary} value: {value:?}")]
pub struct UnknownVariant {
    /// The vocabulary that was parsed.
    pub vocabulary: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// Every value of this vocabulary.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Returns the wire string.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err(UnknownVariant {
                        vocabulary: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

vocabulary! {
    /// Kind of entity a calendar holds.
    EntityType {
        Event => "event",
        Reminder => "reminder",
    }
}

vocabulary! {
    /// Recurrence frequency.
    Frequency {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
        Yearly => "yearly",
    }
}

vocabulary! {
    /// Busy/free availability of an event.
    Availability {
        /// iOS only.
        NotSupported => "notSupported",
        Busy => "busy",
        Free => "free",
        Tentative => "tentative",
        /// iOS only.
        Unavailable => "unavailable",
    }
}

vocabulary! {
    /// Calendar backing type (iOS).
    CalendarType {
        Local => "local",
        CalDav => "caldav",
        Exchange => "exchange",
        Subscribed => "subscribed",
        Birthdays => "birthdays",
        Unknown => "unknown",
    }
}

vocabulary! {
    /// Event confirmation status.
    EventStatus {
        None => "none",
        Confirmed => "confirmed",
        Tentative => "tentative",
        Canceled => "canceled",
    }
}

vocabulary! {
    /// Account type of a source.
    SourceType {
        Local => "local",
        Exchange => "exchange",
        CalDav => "caldav",
        MobileMe => "mobileme",
        Subscribed => "subscribed",
        Birthdays => "birthdays",
    }
}

vocabulary! {
    /// Attendee role.
    AttendeeRole {
        /// iOS only.
        Unknown => "unknown",
        /// iOS only.
        Required => "required",
        /// iOS only.
        Optional => "optional",
        /// iOS only.
        Chair => "chair",
        /// iOS only.
        NonParticipant => "nonParticipant",
        /// Android only.
        Attendee => "attendee",
        /// Android only.
        Organizer => "organizer",
        /// Android only.
        Performer => "performer",
        /// Android only.
        Speaker => "speaker",
        /// Android only.
        None => "none",
    }
}

vocabulary! {
    /// Attendee response status.
    AttendeeStatus {
        /// iOS only.
        Unknown => "unknown",
        /// iOS only.
        Pending => "pending",
        Accepted => "accepted",
        Declined => "declined",
        Tentative => "tentative",
        /// iOS only.
        Delegated => "delegated",
        /// iOS only.
        Completed => "completed",
        /// iOS only.
        InProcess => "inProcess",
        /// Android only.
        Invited => "invited",
        /// Android only.
        None => "none",
    }
}

vocabulary! {
    /// Attendee kind.
    AttendeeType {
        /// iOS only.
        Unknown => "unknown",
        /// iOS only.
        Person => "person",
        /// iOS only.
        Room => "room",
        /// iOS only.
        Group => "group",
        Resource => "resource",
        /// Android only.
        Optional => "optional",
        /// Android only.
        Required => "required",
        /// Android only.
        None => "none",
    }
}

vocabulary! {
    /// Alarm delivery method (Android).
    AlarmMethod {
        Alarm => "alarm",
        Alert => "alert",
        Email => "email",
        Sms => "sms",
        Default => "default",
    }
}

vocabulary! {
    /// Proximity trigger of a location alarm (iOS).
    AlarmProximity {
        None => "none",
        Enter => "enter",
        Leave => "leave",
    }
}

vocabulary! {
    /// Event visibility (Android).
    EventAccessLevel {
        Confidential => "confidential",
        Private => "private",
        Public => "public",
        Default => "default",
    }
}

vocabulary! {
    /// Calendar access level (Android).
    CalendarAccessLevel {
        Contributor => "contributor",
        Editor => "editor",
        FreeBusy => "freebusy",
        Override => "override",
        Owner => "owner",
        Read => "read",
        Respond => "respond",
        Root => "root",
        None => "none",
    }
}

vocabulary! {
    /// Completion filter for reminder queries.
    ReminderStatus {
        Completed => "completed",
        Incomplete => "incomplete",
    }
}

/// Day of the week in recurrence rules, `Sunday = 1` through `Saturday = 7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DayOfTheWeek {
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
    Saturday = 7,
}

impl From<DayOfTheWeek> for u8 {
    fn from(day: DayOfTheWeek) -> Self {
        day as u8
    }
}

impl TryFrom<u8> for DayOfTheWeek {
    type Error = UnknownVariant;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Sunday,
            2 => Self::Monday,
            3 => Self::Tuesday,
            4 => Self::Wednesday,
            5 => Self::Thursday,
            6 => Self::Friday,
            7 => Self::Saturday,
            other => {
                return Err(UnknownVariant {
                    vocabulary: "DayOfTheWeek",
                    value: other.to_string(),
                });
            }
        })
    }
}

/// Month in recurrence rules, `January = 1` through `December = 12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum MonthOfTheYear {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

impl From<MonthOfTheYear> for u8 {
    fn from(month: MonthOfTheYear) -> Self {
        month as u8
    }
}

impl TryFrom<u8> for MonthOfTheYear {
    type Error = UnknownVariant;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        const MONTHS: [MonthOfTheYear; 12] = [
            MonthOfTheYear::January,
            MonthOfTheYear::February,
            MonthOfTheYear::March,
            MonthOfTheYear::April,
            MonthOfTheYear::May,
            MonthOfTheYear::June,
            MonthOfTheYear::July,
            MonthOfTheYear::August,
            MonthOfTheYear::September,
            MonthOfTheYear::October,
            MonthOfTheYear::November,
            MonthOfTheYear::December,
        ];
        MONTHS
            .get(usize::from(value).wrapping_sub(1))
            .copied()
            .ok_or_else(|| UnknownVariant {
                vocabulary: "MonthOfTheYear",
                value: value.to_string(),
            })
    }
}
