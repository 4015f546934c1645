//! Input/output helpers.
//!
//! - line-delimited series ingest + validation (`series`)
//! - per-period CSV export (`export`)
//! - fit JSON read/write (`fit_file`)

pub mod export;
pub mod fit_file;
pub mod series;

pub use export::*;
pub use fit_file::*;
pub use series::*;
