//! Export per-period results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::Quarter;
use crate::error::AppError;
use crate::report::PeriodFit;

pub const RESULTS_HEADER: &str =
    "t,quarter,period_start,gdp,labour,capital_share,capital,log_a,log_a_fit,a_obs,a_fit,residual";

/// Write per-period results to a CSV file.
pub fn write_results_csv(path: &Path, fits: &[PeriodFit], anchor: Quarter) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::runtime(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{RESULTS_HEADER}")
        .map_err(|e| AppError::runtime(format!("Failed to write export CSV header: {e}")))?;

    for f in fits {
        let p = &f.period;
        let quarter = anchor.offset(p.t);
        writeln!(
            out,
            "{},{},{},{},{},{:.10},{},{:.12},{:.12},{:.6e},{:.6e},{:.6e}",
            p.t,
            quarter,
            quarter.start_date().map(|d| d.to_string()).unwrap_or_default(),
            p.gdp,
            p.labour,
            p.capital_share,
            p.capital,
            p.log_a,
            f.log_a_fit,
            f.a_obs(),
            f.a_fit(),
            f.residual,
        )
        .map_err(|e| AppError::runtime(format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::runtime(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PeriodResidual;

    #[test]
    fn writes_header_and_one_row_per_period() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let fits: Vec<PeriodFit> = (0..3)
            .map(|t| PeriodFit {
                period: PeriodResidual {
                    t,
                    gdp: 100,
                    labour: 60,
                    capital_share: 0.4,
                    capital: 40,
                    log_a: 18.4,
                },
                log_a_fit: 18.4,
                residual: 0.0,
            })
            .collect();

        write_results_csv(&path, &fits, Quarter::DEFAULT_ANCHOR).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], RESULTS_HEADER);
        assert!(lines[3].starts_with("2,1961Q3,1961-07-01,100,60,"), "{}", lines[3]);
    }
}
