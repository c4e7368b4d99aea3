//! Forgiving deserializers for hand-edited JSON.
//!
//! Catalog documents are written by hand and cart snapshots may come from
//! older builds, so a field of the wrong JSON type falls back to a default
//! instead of rejecting the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize `T`, falling back to `T::default()` if the value has the
/// wrong shape.
///
/// # Errors
///
/// Only fails if the underlying input is not valid JSON.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserialize a number that may also be written as a numeric string.
///
/// Anything unparseable yields `0.0`.
///
/// # Errors
///
/// Only fails if the underlying input is not valid JSON.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_number(&value).filter(|n| n.is_finite()).unwrap_or(0.0))
}

/// Deserialize a positive count; zero, negative or missing values become 1.
///
/// # Errors
///
/// Only fails if the underlying input is not valid JSON.
pub fn positive_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let n = value_as_number(&value).unwrap_or(1.0).trunc();
    if n.is_nan() || n < 1.0 {
        return Ok(1);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped above
    Ok(n.min(f64::from(u32::MAX)) as u32)
}

/// Read a JSON value as a number the way a browser's `parseFloat` would.
#[must_use]
pub fn value_as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float(s),
        _ => None,
    }
}

/// Parse the longest numeric prefix of `text`, ignoring leading whitespace.
///
/// Mirrors `parseFloat`: `"1200 INR"` is `1200`, `"abc"` is `None`.
///
/// ```
/// use bandhan_core::lenient::parse_float;
///
/// assert_eq!(parse_float(" 1,299"), Some(1.0));
/// assert_eq!(parse_float("-2.5e2kg"), Some(-250.0));
/// assert_eq!(parse_float("Rs. 10"), None);
/// ```
#[must_use]
pub fn parse_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if s.get(end..).is_some_and(|rest| rest.starts_with("Infinity")) {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s.get(..end)?.parse::<f64>().ok()
}

/// Whether a JSON value counts as "set": non-empty strings, non-zero
/// numbers, `true`, arrays and objects.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a truthy scalar as text; `None` for falsy values and containers.
#[must_use]
pub fn truthy_text(value: Option<&Value>) -> Option<String> {
    let value = value?;
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
        _ => None,
    }
}
