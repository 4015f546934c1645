//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during derivation and fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Number of periods per calendar year (quarterly data).
pub const PERIODS_PER_YEAR: usize = 4;

/// Input values are stored in millions of currency units.
pub const INPUT_SCALE: f64 = 1_000_000.0;

/// A calendar quarter, used to label period indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quarter {
    pub year: i32,
    pub quarter: u8,
}

impl Quarter {
    /// Q1 1961, the first period of the Statistics Canada income-based series.
    pub const DEFAULT_ANCHOR: Quarter = Quarter { year: 1961, quarter: 1 };

    pub fn new(year: i32, quarter: u8) -> Result<Self, AppError> {
        if !(1..=4).contains(&quarter) {
            return Err(AppError::input(format!(
                "Invalid quarter {quarter} (expected 1-4)."
            )));
        }
        Ok(Self { year, quarter })
    }

    /// The quarter `t` periods after `self`.
    pub fn offset(self, t: usize) -> Quarter {
        let zero_based = self.year as i64 * 4 + (self.quarter as i64 - 1) + t as i64;
        Quarter {
            year: zero_based.div_euclid(4) as i32,
            quarter: (zero_based.rem_euclid(4) + 1) as u8,
        }
    }

    /// First calendar day of the quarter.
    pub fn start_date(self) -> Option<NaiveDate> {
        let month = (self.quarter as u32 - 1) * 3 + 1;
        NaiveDate::from_ymd_opt(self.year, month, 1)
    }
}

impl std::fmt::Display for Quarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

/// The two observed input series, aligned by period index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPair {
    /// GDP per period, in millions.
    pub gdp: Vec<i64>,
    /// Labour income per period, in millions.
    pub labour: Vec<i64>,
}

impl SeriesPair {
    /// Number of periods `T` (taken from the GDP series).
    pub fn len(&self) -> usize {
        self.gdp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gdp.is_empty()
    }
}

/// Per-period values derived from the production identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodResidual {
    /// Period index (0 = anchor quarter).
    pub t: usize,
    pub gdp: i64,
    pub labour: i64,
    /// Capital share of output, `1 - labour / gdp`.
    pub capital_share: f64,
    /// Capital stock proxy, `gdp - labour` (millions).
    pub capital: i64,
    /// Implied `log(A)` for the period.
    pub log_a: f64,
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub n: usize,
    pub sse: f64,
    pub rmse: f64,
    pub r_squared: f64,
}

/// Linear trend in log-productivity: `log A(t) = c0 + c1 * t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendFit {
    pub c0: f64,
    pub c1: f64,
    pub quality: FitQuality,
}

impl TrendFit {
    /// Fitted `log A(t)`.
    pub fn log_a_at(&self, t: f64) -> f64 {
        self.c0 + self.c1 * t
    }

    /// Fitted `A(t) = exp(c0 + c1 * t)`.
    pub fn a_at(&self, t: f64) -> f64 {
        self.log_a_at(t).exp()
    }

    /// `e^c0`, the level of `A` at the anchor quarter.
    pub fn scale_factor(&self) -> f64 {
        self.c0.exp()
    }

    /// `e^c1`, the per-period growth factor of `A`.
    pub fn growth_factor(&self) -> f64 {
        self.c1.exp()
    }

    /// Trend growth in log points per year.
    pub fn annualized_log_growth(&self) -> f64 {
        self.c1 * PERIODS_PER_YEAR as f64
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags, environment variables and defaults.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub gdp_path: PathBuf,
    pub labour_path: PathBuf,
    /// Calendar quarter of period `t = 0`.
    pub anchor: Quarter,

    /// Print the per-period table after the summary.
    pub table: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_fit: Option<PathBuf>,
    pub export_svg: Option<PathBuf>,
}

/// A saved fit file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub generated: String,
    pub anchor: Quarter,
    pub anchor_date: Option<NaiveDate>,
    pub fit: TrendFit,
    /// Observed `log(A)` per period, in period order.
    pub log_a: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_offset_wraps_years() {
        let q = Quarter::DEFAULT_ANCHOR;
        assert_eq!(q.offset(0), q);
        assert_eq!(q.offset(3), Quarter { year: 1961, quarter: 4 });
        assert_eq!(q.offset(4), Quarter { year: 1962, quarter: 1 });
        assert_eq!(q.offset(237).to_string(), "2020Q2");
    }

    #[test]
    fn quarter_start_date() {
        let q = Quarter::new(2020, 3).unwrap();
        assert_eq!(q.start_date(), NaiveDate::from_ymd_opt(2020, 7, 1));
    }

    #[test]
    fn quarter_rejects_out_of_range() {
        assert!(Quarter::new(2020, 0).is_err());
        assert!(Quarter::new(2020, 5).is_err());
    }

    #[test]
    fn trend_fit_exponentiates() {
        let fit = TrendFit {
            c0: 1.0,
            c1: 0.5,
            quality: FitQuality { n: 2, sse: 0.0, rmse: 0.0, r_squared: 1.0 },
        };
        assert!((fit.log_a_at(2.0) - 2.0).abs() < 1e-12);
        assert!((fit.a_at(2.0) - 2.0_f64.exp()).abs() < 1e-12);
        assert!((fit.scale_factor() * fit.growth_factor().powi(2) - fit.a_at(2.0)).abs() < 1e-9);
        assert!((fit.annualized_log_growth() - 2.0).abs() < 1e-12);
    }
}
