//! Property tests for the classification and rate helpers.

use proptest::prelude::*;
use rem_indicators::{BucketDefinition, classify, distribution, rate};
use rem_model::NullPolicy;

const WEIGHT_LABELS: [&str; 8] = [
    "<500",
    "500-999",
    "1000-1499",
    "1500-1999",
    "2000-2499",
    "2500-2999",
    "3000-3999",
    ">=4000",
];

proptest! {
    #[test]
    fn every_weight_lands_in_exactly_one_bucket(weight in 0.0f64..20_000.0) {
        let weights = BucketDefinition::weight();
        let label = classify(weight, &weights);
        prop_assert!(label.is_some());
        let matching = weights
            .buckets()
            .iter()
            .filter(|b| weight >= b.lower && b.upper.is_none_or(|u| weight < u))
            .count();
        prop_assert_eq!(matching, 1);
        prop_assert!(WEIGHT_LABELS.contains(&label.unwrap()));
    }

    #[test]
    fn rate_stays_within_bounds(flags in proptest::collection::vec(proptest::option::of(any::<bool>()), 0..200)) {
        let result = rate(&flags, |f| *f);
        let value: f64 = result.rate.parse().unwrap();
        prop_assert!((0.0..=100.0).contains(&value));
        prop_assert_eq!(result.total, flags.len());
        prop_assert!(result.count <= result.total);
        // Exactly one decimal digit.
        prop_assert_eq!(result.rate.split('.').nth(1).map(str::len), Some(1));
    }

    #[test]
    fn percentages_sum_to_one_hundred_within_rounding_slack(
        weights in proptest::collection::vec(0.0f64..6_000.0, 1..300)
    ) {
        let values: Vec<Option<f64>> = weights.into_iter().map(Some).collect();
        let result = distribution(&values, |v| *v, &BucketDefinition::weight(), NullPolicy::Exclude);
        let populated = result.buckets.iter().filter(|b| b.count > 0).count() as i64;
        let sum: i64 = result.buckets.iter().map(|b| i64::from(b.percentage)).sum();
        // Each populated bucket rounds independently by at most half a point.
        prop_assert!((sum - 100).abs() <= populated, "sum {} with {} buckets", sum, populated);
        prop_assert_eq!(result.classified, values.len());
    }
}

#[test]
fn literal_weight_boundaries() {
    let weights = BucketDefinition::weight();
    assert_eq!(classify(499.0, &weights), Some("<500"));
    assert_eq!(classify(500.0, &weights), Some("500-999"));
    assert_ne!(classify(3999.0, &weights), classify(4000.0, &weights));
    assert_eq!(classify(4000.0, &weights), Some(">=4000"));
}
