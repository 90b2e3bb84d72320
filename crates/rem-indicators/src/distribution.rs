//! Classification of numeric values into labelled, ordered buckets.
//!
//! A [`BucketDefinition`] covers `[0, +inf)` with contiguous half-open ranges
//! `[lower, upper)`; the last bucket is unbounded. Every non-negative value
//! therefore lands in exactly one bucket. Negative and NaN values are not
//! classified.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rem_model::{NullPolicy, RemError, Result};

use crate::rate::percent_rounded;

/// One labelled range `[lower, upper)`; `upper: None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub label: &'static str,
    pub lower: f64,
    pub upper: Option<f64>,
}

impl Bucket {
    pub const fn range(label: &'static str, lower: f64, upper: f64) -> Self {
        Self {
            label,
            lower,
            upper: Some(upper),
        }
    }

    pub const fn from(label: &'static str, lower: f64) -> Self {
        Self {
            label,
            lower,
            upper: None,
        }
    }

    fn contains(&self, value: f64) -> bool {
        value >= self.lower && self.upper.is_none_or(|upper| value < upper)
    }
}

/// Birth weight in grams.
pub const WEIGHT_BUCKETS: &[Bucket] = &[
    Bucket::range("<500", 0.0, 500.0),
    Bucket::range("500-999", 500.0, 1000.0),
    Bucket::range("1000-1499", 1000.0, 1500.0),
    Bucket::range("1500-1999", 1500.0, 2000.0),
    Bucket::range("2000-2499", 2000.0, 2500.0),
    Bucket::range("2500-2999", 2500.0, 3000.0),
    Bucket::range("3000-3999", 3000.0, 4000.0),
    Bucket::from(">=4000", 4000.0),
];

/// Apgar score (0-10).
pub const APGAR_BUCKETS: &[Bucket] = &[
    Bucket::range("low", 0.0, 7.0),
    Bucket::range("normal", 7.0, 10.0),
    Bucket::from("excellent", 10.0),
];

/// Gestational age in completed weeks.
pub const GESTATIONAL_AGE_BUCKETS: &[Bucket] = &[
    Bucket::range("<28", 0.0, 28.0),
    Bucket::range("28-31", 28.0, 32.0),
    Bucket::range("32-36", 32.0, 37.0),
    Bucket::range("37-41", 37.0, 42.0),
    Bucket::from(">=42", 42.0),
];

/// Maternal age in completed years.
pub const MATERNAL_AGE_BUCKETS: &[Bucket] = &[
    Bucket::range("<15", 0.0, 15.0),
    Bucket::range("15-19", 15.0, 20.0),
    Bucket::range("20-34", 20.0, 35.0),
    Bucket::from(">=35", 35.0),
];

/// Ordered, exhaustive set of buckets over `[0, +inf)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketDefinition {
    buckets: Vec<Bucket>,
    unclassified: Option<&'static str>,
}

impl BucketDefinition {
    /// Build a definition, checking that the buckets start at 0, are
    /// contiguous, and end with an unbounded bucket.
    pub fn new(buckets: Vec<Bucket>) -> Result<Self> {
        validate(&buckets)?;
        Ok(Self {
            buckets,
            unclassified: None,
        })
    }

    pub fn weight() -> Self {
        Self::reference(WEIGHT_BUCKETS)
    }

    pub fn apgar() -> Self {
        Self::reference(APGAR_BUCKETS)
    }

    pub fn gestational_age() -> Self {
        Self::reference(GESTATIONAL_AGE_BUCKETS)
    }

    pub fn maternal_age() -> Self {
        Self::reference(MATERNAL_AGE_BUCKETS)
    }

    // Reference tables are checked by the tests below.
    fn reference(buckets: &'static [Bucket]) -> Self {
        Self {
            buckets: buckets.to_vec(),
            unclassified: None,
        }
    }

    /// Count missing values under `label` instead of dropping them.
    #[must_use]
    pub fn with_unclassified(mut self, label: &'static str) -> Self {
        self.unclassified = Some(label);
        self
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.buckets
            .iter()
            .map(|b| b.label)
            .chain(self.unclassified)
    }
}

fn validate(buckets: &[Bucket]) -> Result<()> {
    let invalid = |reason: String| -> Result<()> {
        Err(RemError::invalid_input("buckets", reason))
    };
    let Some(first) = buckets.first() else {
        return invalid("no buckets".to_string());
    };
    if first.lower != 0.0 {
        return invalid(format!("first bucket {} does not start at 0", first.label));
    }
    for pair in buckets.windows(2) {
        match pair[0].upper {
            Some(upper) if upper == pair[1].lower && upper > pair[0].lower => {}
            _ => {
                return invalid(format!(
                    "buckets {} and {} are not contiguous",
                    pair[0].label, pair[1].label
                ));
            }
        }
    }
    if let Some(last) = buckets.last()
        && last.upper.is_some()
    {
        return invalid(format!("last bucket {} is bounded", last.label));
    }
    Ok(())
}

/// Label of the bucket containing `value`, or `None` for negative/NaN.
pub fn classify(value: f64, definition: &BucketDefinition) -> Option<&'static str> {
    bucket_index(value, &definition.buckets).map(|index| definition.buckets[index].label)
}

/// Position of the bucket containing `value` in `buckets`, or `None` for
/// negative/NaN values and values no bucket covers.
pub fn bucket_index(value: f64, buckets: &[Bucket]) -> Option<usize> {
    if value.is_nan() || value < 0.0 {
        return None;
    }
    buckets.iter().position(|bucket| bucket.contains(value))
}

/// A labelled count with its share of the classified total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub label: String,
    #[serde(rename = "cantidad")]
    pub count: usize,
    /// Whole percent, rounded half away from zero.
    #[serde(rename = "porcentaje")]
    pub percentage: u32,
}

/// Counts per bucket, in definition order (zero-count buckets included).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistributionResult {
    pub buckets: Vec<CategoryShare>,
    /// Inputs assigned to a bucket; the percentage denominator.
    pub classified: usize,
    /// Inputs left out: missing (under [`NullPolicy::Exclude`]), NaN or negative.
    pub excluded: usize,
}

impl DistributionResult {
    pub fn count(&self, label: &str) -> usize {
        self.get(label).map_or(0, |share| share.count)
    }

    pub fn percentage(&self, label: &str) -> u32 {
        self.get(label).map_or(0, |share| share.percentage)
    }

    fn get(&self, label: &str) -> Option<&CategoryShare> {
        self.buckets.iter().find(|share| share.label == label)
    }
}

/// Classify one numeric field of every record.
///
/// Percentages use the number of classified inputs as denominator, so an
/// empty or fully-missing input yields all-zero buckets.
pub fn distribution<T, F>(
    records: &[T],
    value: F,
    definition: &BucketDefinition,
    policy: NullPolicy,
) -> DistributionResult
where
    F: Fn(&T) -> Option<f64>,
{
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut excluded = 0usize;

    for record in records {
        let label = match (value(record), policy) {
            (Some(v), _) => classify(v, definition),
            (None, NullPolicy::AsZero) => classify(0.0, definition),
            (None, NullPolicy::Exclude) => definition.unclassified,
        };
        match label {
            Some(label) => *counts.entry(label).or_default() += 1,
            None => excluded += 1,
        }
    }

    let classified: usize = counts.values().sum();
    let buckets = definition
        .labels()
        .map(|label| {
            let count = counts.get(label).copied().unwrap_or(0);
            CategoryShare {
                label: label.to_string(),
                count,
                percentage: percent_rounded(count, classified),
            }
        })
        .collect();

    DistributionResult {
        buckets,
        classified,
        excluded,
    }
}

/// Mean of a numeric field, rounded to one decimal. `None` without values.
pub fn average<T, F>(records: &[T], value: F, policy: NullPolicy) -> Option<f64>
where
    F: Fn(&T) -> Option<f64>,
{
    let mut sum = 0.0;
    let mut n = 0usize;
    for record in records {
        let v = match (value(record), policy) {
            (Some(v), _) if !v.is_nan() => v,
            (Some(_), _) | (None, NullPolicy::Exclude) => continue,
            (None, NullPolicy::AsZero) => 0.0,
        };
        sum += v;
        n += 1;
    }
    (n > 0).then(|| round_to_tenth(sum / n as f64))
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Counts per categorical code, largest first, ties by label.
/// Records without a code are left out.
pub fn category_breakdown<T, F>(records: &[T], label: F) -> Vec<CategoryShare>
where
    F: Fn(&T) -> Option<&str>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        if let Some(code) = label(record).map(str::trim).filter(|code| !code.is_empty()) {
            *counts.entry(code.to_string()).or_default() += 1;
        }
    }

    let total: usize = counts.values().sum();
    let mut shares: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(label, count)| CategoryShare {
            label,
            count,
            percentage: percent_rounded(count, total),
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    shares
}
