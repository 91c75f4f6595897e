//! Property-based tests for the summary statistics

use super::StatSummary;
use proptest::collection::vec;
use proptest::prelude::*;

/// Property-based test generators
mod generators {
    use super::*;

    /// Plausible latencies in milliseconds
    pub fn durations() -> impl Strategy<Value = f64> {
        0.001f64..100_000.0
    }

    pub fn duration_vectors() -> impl Strategy<Value = Vec<f64>> {
        vec(durations(), 1..500)
    }
}

mod property_tests {
    use super::*;

    proptest! {
        #[test]
        fn median_between_min_max(samples in generators::duration_vectors()) {
            let summary = StatSummary::compute(&samples, 0);
            prop_assert!(summary.min <= summary.median);
            prop_assert!(summary.median <= summary.max);
        }

        #[test]
        fn mean_between_min_max(samples in generators::duration_vectors()) {
            let summary = StatSummary::compute(&samples, 0);
            prop_assert!(summary.min <= summary.mean);
            prop_assert!(summary.mean <= summary.max);
        }

        #[test]
        fn stdev_non_negative(samples in generators::duration_vectors()) {
            let summary = StatSummary::compute(&samples, 0);
            prop_assert!(summary.stdev >= 0.0);
            prop_assert!(summary.stdev.is_finite());
        }

        #[test]
        fn counts_are_preserved(samples in generators::duration_vectors(), failed in 0u32..100) {
            let summary = StatSummary::compute(&samples, failed);
            prop_assert_eq!(summary.successful_count as usize, samples.len());
            prop_assert_eq!(summary.failed_count, failed);
            prop_assert_eq!(summary.total_attempts() as usize, samples.len() + failed as usize);
        }

        #[test]
        fn order_does_not_matter(samples in generators::duration_vectors()) {
            let mut reversed = samples.clone();
            reversed.reverse();
            let a = StatSummary::compute(&samples, 0);
            let b = StatSummary::compute(&reversed, 0);
            prop_assert_eq!(a.min, b.min);
            prop_assert_eq!(a.max, b.max);
            prop_assert_eq!(a.median, b.median);
        }

        #[test]
        fn constant_samples_have_zero_spread(value in generators::durations(), len in 1usize..50) {
            let samples = std::iter::repeat(value).take(len).collect::<Vec<_>>();
            let summary = StatSummary::compute(&samples, 0);
            prop_assert_eq!(summary.min, value);
            prop_assert_eq!(summary.max, value);
            prop_assert_eq!(summary.median, value);
            prop_assert_eq!(summary.mean, value);
            prop_assert_eq!(summary.stdev, 0.0);
        }
    }
}

mod edge_cases {
    use super::*;

    #[test]
    fn empty_input_never_panics() {
        for failed in [0, 1, 10_000] {
            let summary = StatSummary::compute(&[], failed);
            assert_eq!(summary.mean, 0.0);
            assert_eq!(summary.median, 0.0);
            assert_eq!(summary.failed_count, failed);
        }
    }

    #[test]
    fn two_samples_use_sample_deviation() {
        let summary = StatSummary::compute(&[1.0, 3.0], 0);
        assert!((summary.stdev - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.median, 2.0);
    }

    #[test]
    fn summary_serializes_to_json() {
        let summary = StatSummary::compute(&[1.0, 2.0], 1);
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["successful_count"], 2);
        assert_eq!(json["failed_count"], 1);
        assert_eq!(json["min"], 1.0);
    }
}
