//! Period keys for evolution series.
//!
//! Keys sort lexicographically in chronological order:
//! - day: `YYYY-MM-DD`
//! - week: `YYYY-W##`
//! - month: `YYYY-MM`

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use rem_model::{Granularity, Result};

use crate::datetime::parse_timestamp;

/// Week numbering scheme used for weekly keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekNumbering {
    /// Sunday-start weeks counted from 1 January:
    /// `ceil((day_of_year + weekday_of_jan_1) / 7)` with Sunday = 0.
    /// Week 1 is the partial week containing 1 January; no 4-day rule.
    SundayStart,
    /// ISO-8601 weeks (Monday start, week-based year).
    Iso8601,
}

/// Week numbering applied by [`bucket_key`].
///
/// Existing dashboards were built on Sunday-start weeks, which differ from
/// ISO weeks around the turn of the year.
pub const WEEK_NUMBERING: WeekNumbering = WeekNumbering::SundayStart;

/// Period key for a timestamp at the given granularity.
pub fn bucket_key(timestamp: &NaiveDateTime, granularity: Granularity) -> String {
    bucket_key_with(timestamp.date(), granularity, WEEK_NUMBERING)
}

/// Parse a raw timestamp and return its period key.
pub fn bucket_key_str(field: &'static str, value: &str, granularity: Granularity) -> Result<String> {
    let timestamp = parse_timestamp(field, value)?;
    Ok(bucket_key(&timestamp, granularity))
}

pub fn bucket_key_with(date: NaiveDate, granularity: Granularity, weeks: WeekNumbering) -> String {
    match granularity {
        Granularity::Day => date.format("%Y-%m-%d").to_string(),
        Granularity::Month => date.format("%Y-%m").to_string(),
        Granularity::Week => week_key(date, weeks),
    }
}

fn week_key(date: NaiveDate, weeks: WeekNumbering) -> String {
    match weeks {
        WeekNumbering::SundayStart => {
            let (year, week) = sunday_start_week(date);
            format!("{year:04}-W{week:02}")
        }
        WeekNumbering::Iso8601 => {
            let iso = date.iso_week();
            format!("{:04}-W{:02}", iso.year(), iso.week())
        }
    }
}

fn sunday_start_week(date: NaiveDate) -> (i32, u32) {
    let jan_1_offset = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0);
    let week = (date.ordinal() + jan_1_offset).div_ceil(7);
    (date.year(), week)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_and_month_keys() {
        let ts = date(2025, 1, 5).and_hms_opt(23, 59, 0).unwrap();
        assert_eq!(bucket_key(&ts, Granularity::Day), "2025-01-05");
        assert_eq!(bucket_key(&ts, Granularity::Month), "2025-01");
    }

    #[test]
    fn sunday_start_weeks() {
        // 2025-01-01 is a Wednesday; the first Sunday opens week 2.
        let key = |d| bucket_key_with(d, Granularity::Week, WeekNumbering::SundayStart);
        assert_eq!(key(date(2025, 1, 1)), "2025-W01");
        assert_eq!(key(date(2025, 1, 4)), "2025-W01");
        assert_eq!(key(date(2025, 1, 5)), "2025-W02");
        assert_eq!(key(date(2024, 12, 31)), "2024-W53");
    }

    #[test]
    fn iso_weeks_differ_at_year_boundary() {
        let key = |d| bucket_key_with(d, Granularity::Week, WeekNumbering::Iso8601);
        assert_eq!(key(date(2025, 1, 5)), "2025-W01");
        assert_eq!(key(date(2024, 12, 31)), "2025-W01");
        assert_eq!(key(date(2025, 1, 6)), "2025-W02");
    }

    #[test]
    fn configured_numbering_is_sunday_start() {
        let ts = date(2025, 1, 5).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(WEEK_NUMBERING, WeekNumbering::SundayStart);
        assert_eq!(bucket_key(&ts, Granularity::Week), "2025-W02");
    }

    #[test]
    fn unparseable_timestamp_is_invalid_input() {
        assert!(bucket_key_str("birthAt", "05/01/2025", Granularity::Day).is_err());
        assert_eq!(
            bucket_key_str("birthAt", "2025-01-05T08:00:00", Granularity::Month).unwrap(),
            "2025-01"
        );
    }
}
