//! Per-period Solow residual derivation.
//!
//! For every period we derive capital's share of output and a capital proxy
//! from the two observed series, then evaluate the production identity to
//! isolate `log(A)`:
//!
//! ```text
//! a      = 1 - N / Y
//! K      = Y - N
//! log(A) = ln( Y·1e6 - (a·ln(K·1e6) + (1 - a)·ln(N·1e6)) )
//! ```
//!
//! The outer expression subtracts the weighted log inputs from the GDP level,
//! not from `ln(Y)`. This is the established behavior of the analysis and is
//! kept as-is until the modeling question is settled (see DESIGN.md).

use tracing::info;

use crate::domain::{INPUT_SCALE, PeriodResidual};
use crate::error::AppError;

/// Capital share of output, `1 - labour / gdp` in real arithmetic.
pub fn capital_share(gdp: i64, labour: i64) -> f64 {
    1.0 - labour as f64 / gdp as f64
}

/// Capital stock proxy, `gdp - labour`. `None` when the difference overflows `i64`.
pub fn capital_stock(gdp: i64, labour: i64) -> Option<i64> {
    gdp.checked_sub(labour)
}

/// Evaluate `log(A)` for a single period.
///
/// `capital_share` is passed in so the caller can log it once.
pub fn log_productivity(gdp: i64, labour: i64, capital_share: f64) -> Result<f64, AppError> {
    let fault = |what: &str| AppError::numeric(format!("{what} (gdp={gdp}, labour={labour})"));

    if !capital_share.is_finite() {
        return Err(fault("Non-finite capital share"));
    }
    if labour <= 0 {
        return Err(fault("Labour income is not positive; log undefined"));
    }
    let capital = capital_stock(gdp, labour).ok_or_else(|| fault("Capital stock overflows"))?;
    if capital <= 0 {
        return Err(fault("Capital stock is not positive; log undefined"));
    }

    let y = gdp as f64 * INPUT_SCALE;
    let k = capital as f64 * INPUT_SCALE;
    let n = labour as f64 * INPUT_SCALE;

    let inner = y - (capital_share * k.ln() + (1.0 - capital_share) * n.ln());
    if !(inner > 0.0) {
        return Err(fault("Production identity operand is not positive; log undefined"));
    }

    let log_a = inner.ln();
    if !log_a.is_finite() {
        return Err(fault("Non-finite log(A)"));
    }
    Ok(log_a)
}

/// Derive `log(A)` for every period.
///
/// Iterates over the GDP series. A labour series shorter than GDP is a fatal
/// input error, never truncated or padded.
pub fn derive_log_a(gdp: &[i64], labour: &[i64]) -> Result<Vec<PeriodResidual>, AppError> {
    let mut out = Vec::with_capacity(gdp.len());
    for (t, &y) in gdp.iter().enumerate() {
        let n = *labour.get(t).ok_or_else(|| {
            AppError::input(format!(
                "Labour series ends at {} periods but GDP has {}.",
                labour.len(),
                gdp.len()
            ))
        })?;

        let a = capital_share(y, n);
        info!("Capital share t={t}: {a}");

        let at_period = |e: AppError| AppError::new(e.exit_code(), format!("t={t}: {}", e.message()));
        let log_a = log_productivity(y, n, a).map_err(at_period)?;
        let capital = capital_stock(y, n)
            .ok_or_else(|| at_period(AppError::numeric(format!("Capital stock overflows (gdp={y}, labour={n})"))))?;

        out.push(PeriodResidual {
            t,
            gdp: y,
            labour: n,
            capital_share: a,
            capital,
            log_a,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EXIT_INPUT, EXIT_NUMERIC};

    #[test]
    fn shares_and_capital_match_hand_values() {
        assert!((capital_share(100, 60) - 0.4).abs() < 1e-12);
        assert!((capital_share(110, 65) - 0.409_090_909_090_909).abs() < 1e-12);
        assert_eq!(capital_stock(121, 70), Some(51));
        assert_eq!(capital_stock(i64::MIN, 1), None);
    }

    #[test]
    fn log_a_follows_the_identity() {
        let a = capital_share(100, 60);
        let expected = (100.0e6 - (a * (40.0e6_f64).ln() + (1.0 - a) * (60.0e6_f64).ln())).ln();
        let got = log_productivity(100, 60, a).unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn zero_capital_is_a_numeric_fault() {
        let err = derive_log_a(&[100, 100], &[60, 100]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NUMERIC);
        assert!(err.message().starts_with("t=1:"), "{err}");
    }

    #[test]
    fn zero_gdp_and_non_positive_labour_are_numeric_faults() {
        assert_eq!(derive_log_a(&[0], &[0]).unwrap_err().exit_code(), EXIT_NUMERIC);
        assert_eq!(derive_log_a(&[100], &[-5]).unwrap_err().exit_code(), EXIT_NUMERIC);
    }

    #[test]
    fn extreme_inputs_fault_instead_of_overflowing() {
        let err = derive_log_a(&[i64::MAX], &[-1]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NUMERIC);
        assert!(err.message().contains("Labour income"), "{err}");

        let err = derive_log_a(&[i64::MIN], &[1]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NUMERIC);
        assert!(err.message().starts_with("t=0:"), "{err}");
    }

    #[test]
    fn short_labour_series_is_an_input_error() {
        let err = derive_log_a(&[100, 110], &[60]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }

    #[test]
    fn derives_one_value_per_period() {
        let rows = derive_log_a(&[100, 110, 121], &[60, 65, 70]).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().map(|r| r.capital).collect::<Vec<_>>(), vec![40, 45, 51]);
        assert!(rows.iter().all(|r| r.log_a.is_finite()));
    }
}
