//! Payload shaping applied before a call crosses into native code.
//!
//! The normalization steps:
//! 1. Serializes a typed patch into a JSON object (dates become ISO strings)
//! 2. Removes or injects the record identifier
//! 3. Converts calendar colors to the native integer form
//! 4. Reports which read-only fields the caller tried to change

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{BridgeError, BridgeResult};

/// A JSON object about to be dispatched as one positional argument.
pub type Payload = Map<String, Value>;

static RGB_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*(\d*\.?\d+)\s*)?\)$",
    )
    .expect("Invalid rgb regex")
});

static LEADING_INTEGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("Invalid integer regex"));

/// Serializes `record` into a JSON object.
///
/// Absent patch fields are omitted, explicit nulls are kept, and every date
/// field at any depth comes out as an ISO 8601 string.
pub fn to_payload<T: Serialize>(operation: &'static str, record: &T) -> BridgeResult<Payload> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(BridgeError::invalid_argument(
            operation,
            format!("{operation} expects an object of details, got {other}"),
        )),
        Err(e) => Err(BridgeError::invalid_argument(
            operation,
            format!("{operation} could not serialize its details: {e}"),
        )),
    }
}

/// Removes a caller-supplied identifier so creation never targets a record.
pub fn strip_id(payload: &mut Payload) {
    payload.remove("id");
}

/// Sets the identifier of the record being updated.
pub fn set_id(payload: &mut Payload, id: &str) {
    payload.insert("id".to_string(), Value::String(id.to_string()));
}

/// Returns the members of `denylist` present in `payload`, in denylist order.
pub fn read_only_fields(payload: &Payload, denylist: &[&'static str]) -> Vec<&'static str> {
    denylist
        .iter()
        .copied()
        .filter(|field| payload.contains_key(*field))
        .collect()
}

/// Returns the first member of `required` that is missing, null, or a blank
/// string in `payload`.
pub fn first_missing(payload: &Payload, required: &[&'static str]) -> Option<&'static str> {
    required
        .iter()
        .copied()
        .find(|field| payload.get(*field).is_none_or(is_empty_value))
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Replaces the `color` string of a calendar payload with its native integer.
///
/// A null, empty, or absent color is not sent at all.
pub fn process_color_field(
    operation: &'static str,
    payload: &mut Payload,
    signed: bool,
) -> BridgeResult<()> {
    let Some(color) = payload.remove("color") else {
        return Ok(());
    };
    let raw = match color {
        Value::String(raw) if raw.is_empty() => return Ok(()),
        Value::String(raw) => raw,
        Value::Null => return Ok(()),
        other => {
            return Err(BridgeError::invalid_argument(
                operation,
                format!("{operation} expects color to be a string, got {other}"),
            ));
        }
    };
    let argb = parse_color(&raw).ok_or_else(|| {
        BridgeError::invalid_argument(operation, format!("{operation} got an invalid color: {raw:?}"))
    })?;
    payload.insert("color".to_string(), color_value(argb, signed));
    Ok(())
}

/// Encodes an ARGB color the way the platform's native module reads it.
pub fn color_value(argb: u32, signed: bool) -> Value {
    if signed {
        Value::from(argb as i32)
    } else {
        Value::from(argb)
    }
}

/// Parses a CSS-style color into a packed `0xAARRGGBB` integer.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
/// `rgba(r, g, b, a)` with `a` in `0..=1`, and a few named colors.
pub fn parse_color(raw: &str) -> Option<u32> {
    let color = raw.trim().to_ascii_lowercase();

    if let Some(hex) = color.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(caps) = RGB_REGEX.captures(&color) {
        let channel = |i: usize| -> Option<u32> {
            let value: u32 = caps.get(i)?.as_str().parse().ok()?;
            (value <= 255).then_some(value)
        };
        let (r, g, b) = (channel(1)?, channel(2)?, channel(3)?);
        let a = match caps.get(4) {
            Some(alpha) => {
                let alpha: f64 = alpha.as_str().parse().ok()?;
                if !(0.0..=1.0).contains(&alpha) {
                    return None;
                }
                (alpha * 255.0).round() as u32
            }
            None => 0xff,
        };
        return Some(pack(r, g, b, a));
    }
    named_color(&color)
}

fn parse_hex(hex: &str) -> Option<u32> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u32::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u32::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(pack(nibble(0)?, nibble(1)?, nibble(2)?, 0xff)),
        4 => Some(pack(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(pack(byte(0)?, byte(2)?, byte(4)?, 0xff)),
        8 => Some(pack(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<u32> {
    let rgb = match name {
        "transparent" => return Some(0),
        "black" => 0x000000,
        "white" => 0xffffff,
        "red" => 0xff0000,
        "green" => 0x008000,
        "lime" => 0x00ff00,
        "blue" => 0x0000ff,
        "yellow" => 0xffff00,
        "cyan" | "aqua" => 0x00ffff,
        "magenta" | "fuchsia" => 0xff00ff,
        "gray" | "grey" => 0x808080,
        "orange" => 0xffa500,
        "purple" => 0x800080,
        "pink" => 0xffc0cb,
        "brown" => 0xa52a2a,
        "navy" => 0x000080,
        "teal" => 0x008080,
        _ => return None,
    };
    Some(0xff00_0000 | rgb)
}

fn pack(r: u32, g: u32, b: u32, a: u32) -> u32 {
    (a << 24) | (r << 16) | (g << 8) | b
}

/// Coerces an identifier to an integer the way a lenient integer parse does:
/// leading whitespace, an optional sign, then at least one digit; anything
/// after the digits is ignored.
pub fn coerce_integer(raw: &str) -> Option<i64> {
    LEADING_INTEGER_REGEX
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}
