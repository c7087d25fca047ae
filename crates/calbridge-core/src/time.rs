//! Wire date type for values crossing the bridge.
//!
//! The native provider only understands string dates. [`DateValue`] holds
//! either a real [`DateTime<Utc>`] or a string the caller already
//! serialized, and always serializes as a string. Every date-bearing field of
//! every record in this crate is a `DateValue`, so serializing a record
//! stringifies its dates wherever they are nested.
//!
//! Strings read back from the native layer stay [`DateValue::Text`], so a
//! record fetched and saved again carries its dates byte for byte.

use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Formats a datetime the way the native layer expects it.
///
/// Millisecond precision with a `Z` suffix, e.g. `2025-02-05T10:30:00.000Z`.
pub fn format_wire_date(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A date as accepted or returned by the native provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateValue {
    /// A concrete point in time.
    Date(DateTime<Utc>),
    /// A pre-serialized date string, passed through untouched.
    Text(String),
}

impl DateValue {
    /// Parses a string into a `DateValue`.
    ///
    /// RFC 3339 strings become [`DateValue::Date`]; anything else is kept as
    /// [`DateValue::Text`] so the native layer can decide what to do with it.
    pub fn parse(raw: &str) -> Self {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => Self::Date(dt.with_timezone(&Utc)),
            Err(_) => Self::Text(raw.to_string()),
        }
    }

    /// Returns the string sent over the wire.
    pub fn to_wire_string(&self) -> String {
        match self {
            Self::Date(dt) => format_wire_date(dt),
            Self::Text(text) => text.clone(),
        }
    }

    /// Returns `true` if this is an empty or whitespace-only string.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Date(_) => false,
            Self::Text(text) => text.trim().is_empty(),
        }
    }

    /// Returns the point in time, parsing RFC 3339 text on demand.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(dt) => Some(*dt),
            Self::Text(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire_string())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateValue {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::Date(dt.with_timezone(&Utc))
    }
}

/// All-day dates are anchored at midnight UTC.
impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl From<&str> for DateValue {
    fn from(raw: &str) -> Self {
        Self::Text(raw.to_string())
    }
}

impl From<String> for DateValue {
    fn from(raw: String) -> Self {
        Self::Text(raw)
    }
}

impl Serialize for DateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Date(dt) => serializer.serialize_str(&format_wire_date(dt)),
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn wire_format_has_millis_and_z() {
        assert_eq!(
            format_wire_date(&utc(2025, 2, 5, 10, 30, 0)),
            "2025-02-05T10:30:00.000Z"
        );
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = tz.with_ymd_and_hms(2025, 2, 5, 12, 0, 0).unwrap();
        let value = DateValue::from(local);
        assert_eq!(value.to_wire_string(), "2025-02-05T10:00:00.000Z");
    }

    #[test]
    fn all_day_dates_anchor_at_midnight() {
        let value = DateValue::from(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(value.to_wire_string(), "2025-03-01T00:00:00.000Z");
    }

    #[test]
    fn text_passes_through() {
        let value = DateValue::from("tomorrow-ish");
        assert_eq!(value.to_wire_string(), "tomorrow-ish");
        assert!(value.as_datetime().is_none());
    }

    #[test]
    fn parse_recognizes_rfc3339() {
        let value = DateValue::parse("2025-02-05T10:30:00+00:00");
        assert_eq!(value, DateValue::Date(utc(2025, 2, 5, 10, 30, 0)));

        let value = DateValue::parse("not a date");
        assert_eq!(value, DateValue::Text("not a date".into()));
    }

    #[test]
    fn blank_detection() {
        assert!(DateValue::from("").is_blank());
        assert!(DateValue::from("   ").is_blank());
        assert!(!DateValue::from("2025").is_blank());
        assert!(!DateValue::from(utc(2025, 1, 1, 0, 0, 0)).is_blank());
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_value(DateValue::from(utc(2025, 2, 5, 10, 30, 0))).unwrap();
        assert_eq!(json, serde_json::json!("2025-02-05T10:30:00.000Z"));
    }

    #[test]
    fn native_strings_are_kept_verbatim() {
        let value: DateValue = serde_json::from_str("\"2025-02-05T10:30:00+02:00\"").unwrap();
        assert_eq!(value, DateValue::Text("2025-02-05T10:30:00+02:00".into()));
        assert_eq!(value.as_datetime(), Some(utc(2025, 2, 5, 8, 30, 0)));
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            "\"2025-02-05T10:30:00+02:00\""
        );
    }
}
