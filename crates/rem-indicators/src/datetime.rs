//! Timestamp parsing for record fields.
//!
//! Timestamps are read as wall-clock values in whatever zone the store wrote
//! them. A trailing `Z` or UTC offset is accepted and dropped; no conversion
//! between zones is ever applied.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use rem_model::{RemError, Result};

/// Parse a record timestamp, naming the field in the error when it fails.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime> {
    try_parse_timestamp(value).ok_or_else(|| RemError::invalid_input(field, value))
}

/// Parse an optional timestamp field. Missing and blank values are `None`.
pub fn parse_optional(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDateTime>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_timestamp(field, raw).map(Some),
    }
}

fn try_parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Offsets are kept as wall-clock time, not shifted to UTC.
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    let local = trimmed.strip_suffix('Z').unwrap_or(trimmed);

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in &formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(local, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(local, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}
