//! Bar timestamp parsing.
//!
//! Upstream timestamps come as epoch seconds, epoch milliseconds, or date
//! text, with nothing to say which. Numbers up to [`MILLIS_THRESHOLD`] are
//! read as seconds, larger ones as milliseconds.

use crate::error::NormalizeError;
use crate::shared::try_coerce;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Epoch values above this are milliseconds.
pub const MILLIS_THRESHOLD: f64 = 1e12;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

fn from_epoch(value: f64) -> Option<DateTime<Utc>> {
    let millis = if value <= MILLIS_THRESHOLD {
        value * 1000.0
    } else {
        value
    };
    DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)
}

/// Offset-less text is taken as UTC.
fn from_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Strict timestamp parsing.
pub fn try_parse_timestamp(value: &Value) -> Result<DateTime<Utc>, NormalizeError> {
    let parsed = match value {
        Value::Number(_) => try_coerce(value).ok().and_then(from_epoch),
        Value::String(text) => match try_coerce(value) {
            Ok(epoch) => from_epoch(epoch),
            Err(_) => from_text(text),
        },
        _ => None,
    };

    parsed.ok_or_else(|| NormalizeError::UnparsableTimestamp(value.to_string()))
}

/// Lenient timestamp parsing: `None` when the value is not a usable instant.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match try_parse_timestamp(value) {
        Ok(dt) => Some(dt),
        Err(err) => {
            tracing::trace!(%err, "timestamp parse failed");
            None
        }
    }
}
