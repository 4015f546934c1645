//! Trend fitting of the derived log-productivity series.

pub mod trend;

pub use trend::*;
