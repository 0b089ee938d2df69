//! Total decoders from raw stored strings to typed values.
//!
//! Every decoder maps "absent" and "malformed" to `None`; callers substitute
//! their own default. Nothing in here panics or returns an error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Parses the leading integer of `raw`, ignoring leading whitespace and any
/// trailing garbage (`" 12px"` gives 12). No digits at all gives `None`.
pub fn decode_int(raw: Option<&str>) -> Option<i64> {
    let s = raw?.trim_start();
    let (sign, rest) = split_sign(s);
    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }
    let magnitude: i64 = digits.parse().ok()?;
    magnitude.checked_mul(sign)
}

/// Parses the leading decimal number of `raw` (`"0.5dB"` gives 0.5).
/// Non-finite results are treated as malformed.
pub fn decode_float(raw: Option<&str>) -> Option<f64> {
    let s = raw?.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        // A dangling exponent marker is not part of the number
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A flag is set only when the stored value is exactly `truthy`.
pub fn decode_flag(raw: Option<&str>, truthy: &str) -> bool {
    raw == Some(truthy)
}

/// Deserializes a JSON-encoded entry; wrong shape or invalid JSON gives `None`.
pub fn decode_json<T: DeserializeOwned>(raw: Option<&str>) -> Option<T> {
    serde_json::from_str(raw?).ok()
}

/// A JSON string payload; `null`, non-strings and the empty string give `None`.
pub fn decode_json_string(raw: Option<&str>) -> Option<String> {
    match decode_json::<Value>(raw)? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

fn split_sign(s: &str) -> (i64, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (-1, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (1, rest)
    } else {
        (1, s)
    }
}
