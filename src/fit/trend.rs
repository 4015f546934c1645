//! Linear trend fit of log-productivity over the period index.
//!
//! Model: `log A(t) ≈ c0 + c1 * t`, solved by ordinary least squares on the
//! `[1, t]` design. The solution is the unique SSE minimizer and is fully
//! deterministic for a given input.

use nalgebra::DVector;
use tracing::debug;

use crate::domain::{FitQuality, PeriodResidual, TrendFit};
use crate::error::AppError;
use crate::math::{linear_design, solve_normal_equations};

/// Fit `log(A)` against `t = 0..T-1`.
pub fn fit_trend(log_a: &[f64]) -> Result<TrendFit, AppError> {
    let ts: Vec<f64> = (0..log_a.len()).map(|t| t as f64).collect();
    fit_line(&ts, log_a)
}

/// Fit the derived residual series.
pub fn fit_residuals(rows: &[PeriodResidual]) -> Result<TrendFit, AppError> {
    let ts: Vec<f64> = rows.iter().map(|r| r.t as f64).collect();
    let ys: Vec<f64> = rows.iter().map(|r| r.log_a).collect();
    fit_line(&ts, &ys)
}

/// Fit `y ≈ c0 + c1 * t` for arbitrary `(t, y)` pairs.
pub fn fit_line(ts: &[f64], ys: &[f64]) -> Result<TrendFit, AppError> {
    if ts.len() != ys.len() {
        return Err(AppError::input(format!(
            "Fit input length mismatch: {} abscissae vs {} observations.",
            ts.len(),
            ys.len()
        )));
    }
    if ys.iter().chain(ts.iter()).any(|v| !v.is_finite()) {
        return Err(AppError::numeric("Non-finite value in fit input."));
    }

    let x = linear_design(ts);
    let y = DVector::from_column_slice(ys);
    let beta = solve_normal_equations(&x, &y).ok_or_else(|| {
        AppError::runtime(format!(
            "Singular normal equations: need at least 2 distinct periods, got n={}.",
            ys.len()
        ))
    })?;

    let (c0, c1) = (beta[0], beta[1]);
    let quality = fit_quality(ts, ys, c0, c1);
    debug!(c0, c1, sse = quality.sse, "trend fit");

    Ok(TrendFit { c0, c1, quality })
}

fn fit_quality(ts: &[f64], ys: &[f64], c0: f64, c1: f64) -> FitQuality {
    let n = ys.len();
    let mean = ys.iter().sum::<f64>() / n as f64;

    let mut sse = 0.0;
    let mut sst = 0.0;
    for (&t, &y) in ts.iter().zip(ys) {
        let r = y - (c0 + c1 * t);
        sse += r * r;
        sst += (y - mean) * (y - mean);
    }

    let rmse = (sse / n as f64).sqrt();
    let r_squared = if sst > 0.0 { 1.0 - sse / sst } else { 1.0 };

    FitQuality { n, sse, rmse, r_squared }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EXIT_RUNTIME;

    #[test]
    fn recovers_exact_line() {
        let ys: Vec<f64> = (0..50).map(|t| 2.0 + 0.1 * t as f64).collect();
        let fit = fit_trend(&ys).unwrap();
        assert!((fit.c0 - 2.0).abs() < 1e-9, "c0={}", fit.c0);
        assert!((fit.c1 - 0.1).abs() < 1e-9, "c1={}", fit.c1);
        assert!(fit.quality.sse < 1e-18);
        assert!((fit.quality.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn two_points_fit_exactly() {
        let fit = fit_trend(&[3.0, 5.5]).unwrap();
        assert!((fit.log_a_at(0.0) - 3.0).abs() < 1e-12);
        assert!((fit.log_a_at(1.0) - 5.5).abs() < 1e-12);
        assert!(fit.quality.sse < 1e-20);
    }

    #[test]
    fn single_point_is_singular() {
        let err = fit_trend(&[1.0]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_RUNTIME);
    }

    #[test]
    fn identical_periods_are_singular() {
        let err = fit_line(&[4.0, 4.0, 4.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_RUNTIME);
    }

    #[test]
    fn matches_closed_form_on_noisy_data() {
        let ys = [1.0, 2.5, 2.0, 4.5, 4.0];
        let fit = fit_trend(&ys).unwrap();

        let n = ys.len() as f64;
        let t_mean = (0..ys.len()).map(|t| t as f64).sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;
        let (mut sxy, mut sxx) = (0.0, 0.0);
        for (t, y) in ys.iter().enumerate() {
            sxy += (t as f64 - t_mean) * (y - y_mean);
            sxx += (t as f64 - t_mean).powi(2);
        }
        let c1 = sxy / sxx;
        let c0 = y_mean - c1 * t_mean;

        assert!((fit.c0 - c0).abs() < 1e-12);
        assert!((fit.c1 - c1).abs() < 1e-12);
        assert!(fit.quality.r_squared > 0.0 && fit.quality.r_squared < 1.0);
    }
}
