//! Field normalization: raw spreadsheet cells into nullable typed values.
//!
//! Every function here is total — malformed input degrades to `None` rather
//! than raising, so a single bad cell never aborts an import run.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::schema::PropertyType;

/// A typed property value as accepted by the recommendation store.
///
/// Serializes to the bare JSON scalar (`"..."`, `42`, `4.5`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    String(String),
    Int(i64),
    Double(f64),
}

/// Trims the input; returns `None` iff the input is empty after trimming.
pub fn normalize_string(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Coerces the input to an integer.
///
/// Accepts plain integers directly; fractional input ("12.7") is parsed as a
/// float and truncated toward zero. Non-numeric, non-finite, or empty input
/// yields `None`.
pub fn normalize_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Some(parsed);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value.trunc() as i64),
        _ => None,
    }
}

/// Coerces the input to a double; `None` on empty or unparseable input.
pub fn normalize_double(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Extracts a year from a free-form date string.
///
/// Slash-delimited dates ("9/15/2020") take the last `/` token as the year.
/// Everything else falls back to multi-format date parsing, then to a bare
/// integer year ("2020"). Returns `None` when no year can be recovered.
pub fn year_from_date(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains('/')
        && let Some(token) = trimmed.rsplit('/').next()
        && let Ok(year) = token.trim().parse::<i32>()
    {
        return Some(year);
    }
    if let Some(date) = parse_naive_date(trimmed) {
        return Some(date.year());
    }
    trimmed
        .parse::<i32>()
        .ok()
        .filter(|year| (1..=9999).contains(year))
}

pub fn parse_naive_date(value: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Normalizes a raw cell according to the property's declared type.
pub fn normalize_typed_value(raw: &str, data_type: PropertyType) -> Option<PropertyValue> {
    match data_type {
        PropertyType::String => normalize_string(raw).map(PropertyValue::String),
        PropertyType::Int => normalize_int(raw).map(PropertyValue::Int),
        PropertyType::Double => normalize_double(raw).map(PropertyValue::Double),
    }
}
