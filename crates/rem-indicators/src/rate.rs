//! Percentage of records satisfying a boolean flag.

use serde::{Deserialize, Serialize};

/// Outcome of [`rate`]; `rate` is a percentage with exactly one decimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateResult {
    pub count: usize,
    pub total: usize,
    pub rate: String,
}

impl RateResult {
    pub fn empty() -> Self {
        Self {
            count: 0,
            total: 0,
            rate: format_tenths(0),
        }
    }
}

/// Share of `records` whose flag is exactly `Some(true)`.
///
/// Missing flags count towards the total but never as true.
pub fn rate<T, F>(records: &[T], flag: F) -> RateResult
where
    F: Fn(&T) -> Option<bool>,
{
    let total = records.len();
    let count = records.iter().filter(|r| flag(r) == Some(true)).count();
    RateResult {
        count,
        total,
        rate: format_tenths(percent_tenths(count, total)),
    }
}

/// `100 * part / whole` in tenths of a percent, rounded half away from zero.
/// Integer arithmetic keeps the last digit exact.
pub fn percent_tenths(part: usize, whole: usize) -> u64 {
    if whole == 0 {
        return 0;
    }
    let part = part as u64;
    let whole = whole as u64;
    (2000 * part + whole) / (2 * whole)
}

/// `100 * part / whole` rounded half away from zero to a whole percent.
pub fn percent_rounded(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = part as u64;
    let whole = whole as u64;
    ((200 * part + whole) / (2 * whole)) as u32
}

fn format_tenths(tenths: u64) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}
