//! Shared pipeline logic used by both the console and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load series -> derive log(A) -> fit trend -> fitted values
//!
//! The front-ends can then focus on presentation (printing vs widgets).

use tracing::info;

use crate::domain::{PeriodResidual, RunConfig, SeriesPair, TrendFit};
use crate::error::AppError;
use crate::report::PeriodFit;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub periods: Vec<PeriodResidual>,
    pub fit: TrendFit,
    pub fits: Vec<PeriodFit>,
}

impl RunOutput {
    /// Observed `log(A)` in period order.
    pub fn log_a(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.log_a).collect()
    }
}

/// Execute the full pipeline from the configured input files.
pub fn run_pipeline(config: &RunConfig) -> Result<RunOutput, AppError> {
    info!("Starting...");
    let series = crate::io::load_pair(&config.gdp_path, &config.labour_path)?;
    run_with_series(series)
}

/// Execute the pipeline on already-loaded series.
pub fn run_with_series(series: SeriesPair) -> Result<RunOutput, AppError> {
    let series = crate::io::validate_pair(series)?;

    info!("Computing log(A)...");
    let periods = crate::residual::derive_log_a(&series.gdp, &series.labour)?;

    info!("Computing regression...");
    let fit = crate::fit::fit_residuals(&periods)?;
    info!("Done");

    let fits = crate::report::compute_period_fits(&periods, &fit);

    Ok(RunOutput {
        periods,
        fit,
        fits,
    })
}
