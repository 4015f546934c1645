//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the observed input series (`SeriesPair`) and calendar labels (`Quarter`)
//! - per-period derived values (`PeriodResidual`)
//! - fit outputs (`TrendFit`, `FitQuality`) and the saved `FitFile`

pub mod types;

pub use types::*;
