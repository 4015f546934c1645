//! Property-based checks for the derivation and the trend fit.

use proptest::prelude::*;

use solow_residual::fit::{fit_line, fit_trend};
use solow_residual::residual::derive_log_a;

/// Equal-length series with `gdp > labour > 0` in every period.
fn series_of_len(len: std::ops::Range<usize>) -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    prop::collection::vec((2i64..5_000_000).prop_flat_map(|g| (Just(g), 1..g)), len)
        .prop_map(|rows: Vec<(i64, i64)>| -> (Vec<i64>, Vec<i64>) { rows.into_iter().unzip() })
}

fn valid_series() -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    series_of_len(2..80)
}

proptest! {
    #[test]
    fn valid_inputs_give_finite_results((gdp, labour) in valid_series()) {
        let rows = derive_log_a(&gdp, &labour).unwrap();
        prop_assert_eq!(rows.len(), gdp.len());
        prop_assert!(rows.iter().all(|r| r.log_a.is_finite()));

        let log_a: Vec<f64> = rows.iter().map(|r| r.log_a).collect();
        let fit = fit_trend(&log_a).unwrap();
        prop_assert!(fit.c0.is_finite() && fit.c1.is_finite());
    }

    #[test]
    fn fit_is_deterministic((gdp, labour) in valid_series()) {
        let log_a: Vec<f64> = derive_log_a(&gdp, &labour).unwrap().iter().map(|r| r.log_a).collect();
        let a = fit_trend(&log_a).unwrap();
        let b = fit_trend(&log_a).unwrap();
        prop_assert_eq!(a.c0.to_bits(), b.c0.to_bits());
        prop_assert_eq!(a.c1.to_bits(), b.c1.to_bits());
    }

    #[test]
    fn fit_ignores_consistent_reordering(
        pairs in prop::collection::vec(-5.0f64..5.0, 2..60)
            .prop_map(|ys| ys.into_iter().enumerate().map(|(t, y)| (t as f64, y)).collect::<Vec<_>>())
            .prop_shuffle()
    ) {
        let mut sorted = pairs.clone();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (ts, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let (ts_sorted, ys_sorted): (Vec<f64>, Vec<f64>) = sorted.into_iter().unzip();

        let shuffled = fit_line(&ts, &ys).unwrap();
        let ordered = fit_line(&ts_sorted, &ys_sorted).unwrap();
        prop_assert!((shuffled.c0 - ordered.c0).abs() < 1e-9);
        prop_assert!((shuffled.c1 - ordered.c1).abs() < 1e-9);
    }

    #[test]
    fn exact_line_is_recovered(n in 2usize..300) {
        let log_a: Vec<f64> = (0..n).map(|t| 2.0 + 0.1 * t as f64).collect();
        let fit = fit_trend(&log_a).unwrap();
        prop_assert!((fit.c0 - 2.0).abs() < 1e-9, "c0={}", fit.c0);
        prop_assert!((fit.c1 - 0.1).abs() < 1e-9, "c1={}", fit.c1);
    }

    #[test]
    fn two_periods_fit_exactly((gdp, labour) in series_of_len(2..3)) {
        let rows = derive_log_a(&gdp, &labour).unwrap();
        let log_a: Vec<f64> = rows.iter().map(|r| r.log_a).collect();
        let fit = fit_trend(&log_a).unwrap();
        prop_assert!((fit.log_a_at(0.0) - log_a[0]).abs() < 1e-9);
        prop_assert!((fit.log_a_at(1.0) - log_a[1]).abs() < 1e-9);
    }
}
