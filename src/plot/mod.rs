//! Chart data preparation and renderers.
//!
//! - `ascii`: fixed-grid terminal plots (deterministic, golden-tested)
//! - `svg`: two-panel figure written with Plotters' SVG backend
//!
//! `ChartData` holds the series shared by every renderer (including the TUI),
//! so bounds and sampling are computed once outside any draw call.

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;

use crate::domain::TrendFit;

/// Number of samples used to draw a fitted trend line.
const CURVE_SAMPLES: usize = 200;

/// Series and bounds for the two stacked panels.
#[derive(Debug, Clone)]
pub struct ChartData {
    /// Observed `exp(log A)` per period.
    pub level_points: Vec<(f64, f64)>,
    /// Fitted `exp(c0 + c1 t)`.
    pub level_curve: Vec<(f64, f64)>,
    /// Observed `log A` per period.
    pub log_points: Vec<(f64, f64)>,
    /// Fitted `c0 + c1 t`.
    pub log_curve: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub level_bounds: [f64; 2],
    pub log_bounds: [f64; 2],
}

impl ChartData {
    pub fn new(log_a: &[f64], fit: &TrendFit) -> Self {
        let (t0, t1) = period_range(log_a.len());

        let log_points: Vec<(f64, f64)> = log_a.iter().enumerate().map(|(t, &y)| (t as f64, y)).collect();
        let level_points: Vec<(f64, f64)> = log_points.iter().map(|&(t, y)| (t, y.exp())).collect();
        let log_curve = sample_trend(t0, t1, CURVE_SAMPLES, |t| fit.log_a_at(t));
        let level_curve = sample_trend(t0, t1, CURVE_SAMPLES, |t| fit.a_at(t));

        let level_bounds = bounds(&level_points, &level_curve);
        let log_bounds = bounds(&log_points, &log_curve);

        Self {
            level_points,
            level_curve,
            log_points,
            log_curve,
            x_bounds: [t0, t1],
            level_bounds,
            log_bounds,
        }
    }
}

fn bounds(points: &[(f64, f64)], curve: &[(f64, f64)]) -> [f64; 2] {
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in points.iter().chain(curve) {
        if y.is_finite() {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }

    if !y_min.is_finite() || !y_max.is_finite() {
        return [0.0, 1.0];
    }
    if y_max <= y_min {
        y_min -= 0.5;
        y_max += 0.5;
    }

    let (lo, hi) = ascii::pad_range(y_min, y_max, 0.05);
    [lo, hi]
}
