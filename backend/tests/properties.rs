//! Property tests for the detection pipeline invariants.

use proptest::prelude::*;

use calls_inflection::algorithms::{
    aggregate_annual, classify, compute_transitions, detect, DetectionStrategy, HybridParams,
    PatternCategory, SensitiveParams, StrictParams,
};
use calls_inflection::models::{circular_distance, MONTHS_PER_YEAR};

fn series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..1000.0, MONTHS_PER_YEAR)
}

fn integer_series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((0u32..20).prop_map(f64::from), MONTHS_PER_YEAR)
}

fn local_strategy() -> impl Strategy<Value = DetectionStrategy> {
    prop_oneof![
        (1usize..=4).prop_map(|s| DetectionStrategy::Sensitive(SensitiveParams { min_separation: s })),
        (3usize..=4).prop_map(|s| DetectionStrategy::Hybrid(HybridParams { min_separation: s })),
    ]
}

fn min_separation(strategy: &DetectionStrategy) -> usize {
    match strategy {
        DetectionStrategy::Sensitive(p) => p.min_separation,
        DetectionStrategy::Hybrid(p) => p.min_separation,
        DetectionStrategy::Strict(_) => 0,
    }
}

proptest! {
    #[test]
    fn strict_always_returns_two_of_each(values in prop_oneof![series(), integer_series()]) {
        let extrema = detect(&values, &DetectionStrategy::Strict(StrictParams::default())).unwrap();
        prop_assert_eq!(extrema.peaks.len(), 2);
        prop_assert_eq!(extrema.valleys.len(), 2);
        prop_assert!(!extrema.has_overlap());
    }

    #[test]
    fn local_strategies_respect_separation(
        values in prop_oneof![series(), integer_series()],
        strategy in local_strategy(),
    ) {
        let extrema = detect(&values, &strategy).unwrap();
        let separation = min_separation(&strategy);
        prop_assert!(!extrema.has_overlap());

        for group in [extrema.peak_months(), extrema.valley_months()] {
            prop_assert!(group.iter().all(|&m| m < MONTHS_PER_YEAR));
            for (i, &a) in group.iter().enumerate() {
                for &b in &group[i + 1..] {
                    prop_assert!(circular_distance(a, b) >= separation);
                }
            }
        }
    }

    #[test]
    fn classification_is_total_and_consistent(
        values in prop_oneof![series(), integer_series()],
        strategy in local_strategy(),
    ) {
        let extrema = detect(&values, &strategy).unwrap();
        let diagnosis = classify(&extrema);
        prop_assert_eq!(diagnosis.total_points, extrema.total());
        prop_assert_eq!(diagnosis.is_well_formed, diagnosis.category == PatternCategory::Normal);
        prop_assert!(!diagnosis.recommendations.is_empty());
        if extrema.total() < 4 {
            prop_assert_eq!(diagnosis.category, PatternCategory::InsufficientPoints);
        }
    }

    #[test]
    fn alternating_extrema_yield_one_marker_each(values in series(), strategy in local_strategy()) {
        let extrema = detect(&values, &strategy).unwrap();
        let diagnosis = classify(&extrema);
        match compute_transitions(&extrema) {
            Ok(markers) => {
                prop_assert!(diagnosis.is_alternating);
                prop_assert_eq!(markers.len(), extrema.total());
                for marker in markers {
                    prop_assert!(marker.midpoint >= 0.0 && marker.midpoint < MONTHS_PER_YEAR as f64);
                }
            }
            Err(_) => prop_assert!(!diagnosis.is_alternating),
        }
    }

    #[test]
    fn annual_rows_flag_extremes(totals in prop::collection::btree_map(2015i32..2026, 0u64..10_000, 1..8)) {
        let historical: u64 = totals.values().sum();
        let rows = aggregate_annual(&totals, Some(historical));
        let last = rows.last().unwrap();
        prop_assert!(last.is_historical);
        prop_assert_eq!(last.total_calls, historical);

        let year_rows = &rows[..rows.len() - 1];
        prop_assert!(year_rows.iter().any(|r| r.is_max));
        prop_assert!(year_rows.iter().any(|r| r.is_min));
        prop_assert!(year_rows.windows(2).all(|w| w[0].year < w[1].year));
    }
}

#[test]
fn malformed_series_is_rejected_by_every_strategy() {
    for strategy in [
        DetectionStrategy::default(),
        DetectionStrategy::Strict(StrictParams::default()),
        DetectionStrategy::Sensitive(SensitiveParams::default()),
    ] {
        assert!(detect(&[1.0; 11], &strategy).is_err());
        let mut with_nan = [1.0; 12];
        with_nan[4] = f64::NAN;
        assert!(detect(&with_nan, &strategy).is_err());
    }
}
