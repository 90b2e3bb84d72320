//! Reporting period and options for report generation.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trailing window used for the recent-activity counters.
pub const DEFAULT_RECENT_WINDOW_DAYS: u32 = 30;

/// Calendar granularity for evolution series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Granularity {
    Day,
    Week,
    #[default]
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }

    /// Parse a grouping value, falling back to month for anything unknown.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            _ => Err(format!("Unknown granularity: {s}")),
        }
    }
}

impl From<String> for Granularity {
    fn from(value: String) -> Self {
        Granularity::parse_lenient(&value)
    }
}

/// How a missing numeric value is treated by classifiers and averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NullPolicy {
    /// Leave the record out of numerator and denominator.
    #[default]
    Exclude,
    /// Count the record as if its value were zero.
    AsZero,
}

/// Reporting period. An absent bound means the period is open on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub group_by: Granularity,
}

impl ReportPeriod {
    pub fn new(group_by: Granularity) -> Self {
        Self {
            start: None,
            end: None,
            group_by,
        }
    }

    #[must_use]
    pub fn with_start(mut self, start: Option<NaiveDate>) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: Option<NaiveDate>) -> Self {
        self.end = end;
        self
    }
}

/// Options for building the indicators dashboard.
///
/// The reference instant is explicit so that building the same record set
/// twice yields identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    pub period: ReportPeriod,
    /// Instant the recent-activity window is measured back from.
    pub as_of: NaiveDateTime,
    pub recent_window_days: u32,
    pub null_policy: NullPolicy,
}

impl ReportOptions {
    pub fn new(period: ReportPeriod, as_of: NaiveDateTime) -> Self {
        Self {
            period,
            as_of,
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
            null_policy: NullPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_recent_window_days(mut self, days: u32) -> Self {
        self.recent_window_days = days;
        self
    }

    #[must_use]
    pub fn with_null_policy(mut self, policy: NullPolicy) -> Self {
        self.null_policy = policy;
        self
    }
}
