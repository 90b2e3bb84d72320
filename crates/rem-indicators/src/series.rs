//! Evolution series: per-period record counts.
//!
//! Only periods with at least one event appear; empty periods are not
//! filled in. Points are ordered by period key, which is chronological for
//! every key format produced by [`crate::bucket`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rem_model::{Granularity, Result};

use crate::bucket::bucket_key;
use crate::datetime::parse_optional;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(rename = "periodKey")]
    pub period_key: String,
    #[serde(rename = "cantidad")]
    pub count: usize,
}

/// A period of a start/end series (admissions vs. discharges).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualSeriesPoint {
    #[serde(rename = "periodKey")]
    pub period_key: String,
    pub started: usize,
    pub ended: usize,
}

/// Count records per period of one timestamp field.
///
/// Records without the timestamp are skipped; an unparseable timestamp fails
/// the whole series.
pub fn series<T, F>(
    records: &[T],
    field: &'static str,
    timestamp: F,
    granularity: Granularity,
) -> Result<Vec<SeriesPoint>>
where
    F: Fn(&T) -> Option<&str>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        if let Some(ts) = parse_optional(field, timestamp(record))? {
            *counts.entry(bucket_key(&ts, granularity)).or_default() += 1;
        }
    }
    Ok(counts
        .into_iter()
        .map(|(period_key, count)| SeriesPoint { period_key, count })
        .collect())
}

/// Count starts and ends per period.
///
/// A record adds one to `started` in its start period and, when it has an
/// end, one to `ended` in its end period, which may be a different period.
pub fn dual_series<T, S, E>(
    records: &[T],
    fields: (&'static str, &'static str),
    start: S,
    end: E,
    granularity: Granularity,
) -> Result<Vec<DualSeriesPoint>>
where
    S: Fn(&T) -> Option<&str>,
    E: Fn(&T) -> Option<&str>,
{
    let (start_field, end_field) = fields;
    let mut counts: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for record in records {
        if let Some(ts) = parse_optional(start_field, start(record))? {
            counts.entry(bucket_key(&ts, granularity)).or_default().0 += 1;
        }
        if let Some(ts) = parse_optional(end_field, end(record))? {
            counts.entry(bucket_key(&ts, granularity)).or_default().1 += 1;
        }
    }
    Ok(counts
        .into_iter()
        .map(|(period_key, (started, ended))| DualSeriesPoint {
            period_key,
            started,
            ended,
        })
        .collect())
}
