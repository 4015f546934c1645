//! Line-delimited series ingest.
//!
//! Each input file holds one base-10 integer per line, in chronological order,
//! with no header. Blank lines are ignored; anything else that fails to parse
//! aborts the run with exit code 2.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::SeriesPair;
use crate::error::AppError;

/// Least squares needs at least two points.
pub const MIN_PERIODS: usize = 2;

/// Load one series from a file.
pub fn load_series(path: &Path) -> Result<Vec<i64>, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::input(format!("Failed to read '{}': {e}", path.display())))?;
    let values = parse_series(&text).map_err(|e| {
        AppError::input(format!("{}: {}", path.display(), e.message()))
    })?;
    debug!(path = %path.display(), periods = values.len(), "loaded series");
    Ok(values)
}

/// Parse series text (one integer per non-empty line).
pub fn parse_series(text: &str) -> Result<Vec<i64>, AppError> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let value = line.parse::<i64>().map_err(|e| {
            AppError::input(format!("line {}: '{line}' is not an integer ({e})", idx + 1))
        })?;
        out.push(value);
    }
    Ok(out)
}

/// Load the GDP and labour-income series and check they line up.
pub fn load_pair(gdp_path: &Path, labour_path: &Path) -> Result<SeriesPair, AppError> {
    let gdp = load_series(gdp_path)?;
    let labour = load_series(labour_path)?;
    validate_pair(SeriesPair { gdp, labour })
}

/// Enforce equal length and the minimum period count.
pub fn validate_pair(pair: SeriesPair) -> Result<SeriesPair, AppError> {
    if pair.gdp.len() != pair.labour.len() {
        return Err(AppError::input(format!(
            "Series length mismatch: {} GDP periods vs {} labour periods.",
            pair.gdp.len(),
            pair.labour.len()
        )));
    }
    if pair.len() < MIN_PERIODS {
        return Err(AppError::input(format!(
            "Need at least {MIN_PERIODS} periods to fit a trend, got {}.",
            pair.len()
        )));
    }
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EXIT_INPUT;

    #[test]
    fn parse_preserves_order_and_skips_blank_lines() {
        let values = parse_series("100\n\n110\r\n 121 \n").unwrap();
        assert_eq!(values, vec![100, 110, 121]);
    }

    #[test]
    fn parse_reports_line_number() {
        let err = parse_series("100\n1.5\n").unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.message().starts_with("line 2:"), "{err}");
    }

    #[test]
    fn validate_rejects_mismatch_and_short_series() {
        let mismatch = SeriesPair { gdp: vec![1, 2, 3], labour: vec![1, 2] };
        assert!(validate_pair(mismatch).is_err());

        let short = SeriesPair { gdp: vec![1], labour: vec![1] };
        assert!(validate_pair(short).is_err());

        let ok = SeriesPair { gdp: vec![100, 110], labour: vec![60, 65] };
        assert_eq!(validate_pair(ok).unwrap().len(), 2);
    }
}
