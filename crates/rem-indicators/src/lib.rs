//! Indicators dashboard for maternity and neonatal records.
//!
//! - **datetime**: record timestamp parsing
//! - **bucket**: period keys (day, week, month)
//! - **rate**: share of records with a flag set
//! - **distribution**: numeric buckets, averages and categorical breakdowns
//! - **series**: single and start/end evolution series
//! - **aggregate**: the full dashboard across all record domains
//!
//! Every function here is pure; nothing is cached between calls.

pub mod aggregate;
pub mod bucket;
pub mod datetime;
pub mod distribution;
pub mod rate;
pub mod report;
pub mod series;

pub use aggregate::{build_indicators, stay_length_days};
pub use bucket::{WEEK_NUMBERING, WeekNumbering, bucket_key, bucket_key_str};
pub use distribution::{
    APGAR_BUCKETS, Bucket, BucketDefinition, CategoryShare, DistributionResult,
    GESTATIONAL_AGE_BUCKETS, MATERNAL_AGE_BUCKETS, WEIGHT_BUCKETS, average, bucket_index,
    category_breakdown, classify, distribution,
};
pub use rate::{RateResult, rate};
pub use report::{DomainCounts, DomainFailure, DomainSection, Evolution, IndicatorsReport};
pub use series::{DualSeriesPoint, SeriesPoint, dual_series, series};
