//! Read/write fit JSON files.
//!
//! A fit file is the "portable" representation of a run:
//! - the trend coefficients and fit diagnostics
//! - the anchor quarter for period `t = 0`
//! - the observed `log(A)` series, so plots can be redrawn without the inputs
//!
//! The schema is defined by `domain::FitFile`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::domain::{FitFile, PeriodResidual, Quarter, TrendFit};
use crate::error::AppError;

/// Assemble a fit file from in-memory results.
pub fn build_fit_file(rows: &[PeriodResidual], fit: &TrendFit, anchor: Quarter) -> FitFile {
    FitFile {
        tool: "solow".to_string(),
        generated: Local::now().to_rfc3339(),
        anchor,
        anchor_date: anchor.start_date(),
        fit: *fit,
        log_a: rows.iter().map(|r| r.log_a).collect(),
    }
}

/// Write a fit JSON file.
pub fn write_fit_json(path: &Path, file: &FitFile) -> Result<(), AppError> {
    let out = File::create(path)
        .map_err(|e| AppError::runtime(format!("Failed to create fit JSON '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(out);
    serde_json::to_writer_pretty(&mut writer, file)
        .map_err(|e| AppError::runtime(format!("Failed to write fit JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::runtime(format!("Failed to flush fit JSON '{}': {e}", path.display())))?;
    Ok(())
}

/// Read a fit JSON file.
pub fn read_fit_json(path: &Path) -> Result<FitFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open fit JSON '{}': {e}", path.display())))?;
    let fit: FitFile =
        serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid fit JSON: {e}")))?;
    Ok(fit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitQuality;

    #[test]
    fn fit_file_survives_a_disk_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fit.json");
        let rows = vec![
            PeriodResidual { t: 0, gdp: 100, labour: 60, capital_share: 0.4, capital: 40, log_a: 18.42 },
            PeriodResidual { t: 1, gdp: 110, labour: 65, capital_share: 0.41, capital: 45, log_a: 18.51 },
        ];
        let fit = TrendFit {
            c0: 18.42,
            c1: 0.09,
            quality: FitQuality { n: 2, sse: 0.0, rmse: 0.0, r_squared: 1.0 },
        };

        write_fit_json(&path, &build_fit_file(&rows, &fit, Quarter::DEFAULT_ANCHOR)).unwrap();
        let back = read_fit_json(&path).unwrap();

        assert_eq!(back.tool, "solow");
        assert_eq!(back.anchor, Quarter::DEFAULT_ANCHOR);
        assert_eq!(back.fit, fit);
        assert_eq!(back.log_a, vec![18.42, 18.51]);
    }

    #[cfg(unix)]
    #[test]
    fn full_device_fails_the_fit_export() {
        let fit = TrendFit {
            c0: 18.42,
            c1: 0.09,
            quality: FitQuality { n: 0, sse: 0.0, rmse: 0.0, r_squared: 1.0 },
        };
        let file = build_fit_file(&[], &fit, Quarter::DEFAULT_ANCHOR);
        let err = write_fit_json(Path::new("/dev/full"), &file).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_RUNTIME);
    }

    #[test]
    fn malformed_json_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(read_fit_json(&path).unwrap_err().exit_code(), crate::error::EXIT_INPUT);
    }
}
