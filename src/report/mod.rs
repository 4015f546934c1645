//! Reporting utilities: fitted values, residuals, and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{PeriodResidual, Quarter, RunConfig, TrendFit};

/// Observed vs fitted values for one period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodFit {
    pub period: PeriodResidual,
    pub log_a_fit: f64,
    /// `log_a - log_a_fit`.
    pub residual: f64,
}

impl PeriodFit {
    /// Observed productivity level, `exp(log_a)`.
    pub fn a_obs(&self) -> f64 {
        self.period.log_a.exp()
    }

    /// Fitted productivity level, `exp(c0 + c1 * t)`.
    pub fn a_fit(&self) -> f64 {
        self.log_a_fit.exp()
    }
}

/// Compute fitted values and residuals for each period.
pub fn compute_period_fits(rows: &[PeriodResidual], fit: &TrendFit) -> Vec<PeriodFit> {
    rows.iter()
        .map(|p| {
            let log_a_fit = fit.log_a_at(p.t as f64);
            PeriodFit {
                period: *p,
                log_a_fit,
                residual: p.log_a - log_a_fit,
            }
        })
        .collect()
}

/// Format the full run summary (dataset stats + fitted trend + diagnostics).
pub fn format_run_summary(rows: &[PeriodResidual], fit: &TrendFit, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== solow - Solow residual (OLS trend) ===\n");
    out.push_str(&format!(
        "Inputs: gdp={} | labour={}\n",
        config.gdp_path.display(),
        config.labour_path.display()
    ));

    let n = rows.len();
    let last = config.anchor.offset(n.saturating_sub(1));
    out.push_str(&format!("Periods: T={n} | {} .. {last}\n", config.anchor));

    if let Some((lo, mean, hi)) = min_mean_max(rows.iter().map(|r| r.capital_share)) {
        out.push_str(&format!("Capital share: min={lo:.4} mean={mean:.4} max={hi:.4}\n"));
    }
    if let Some((lo, _, hi)) = min_mean_max(rows.iter().map(|r| r.log_a)) {
        out.push_str(&format!("log(A): [{lo:.6}, {hi:.6}]\n"));
    }

    out.push_str("\nFitted trend (t = 0 at ");
    out.push_str(&config.anchor.to_string());
    out.push_str("):\n");
    out.push_str(&format_coefficients(fit));

    out.push_str(&format!(
        "\nFit: n={} SSE={:.6e} RMSE={:.6e} R^2={:.6}\n",
        fit.quality.n, fit.quality.sse, fit.quality.rmse, fit.quality.r_squared
    ));

    out
}

/// Format `c0`, `c1` and the productivity function they imply.
pub fn format_coefficients(fit: &TrendFit) -> String {
    let mut out = String::new();
    out.push_str(&format!("c_0 = {}, c_1 = {}\n", fit.c0, fit.c1));
    out.push_str(&format!("log(A(t)) = {} + {} * t\n", fit.c0, fit.c1));
    out.push_str(&format!(
        "A(t) = exp(c_0 + c_1 * t) = {} * {}^t\n",
        fit.scale_factor(),
        fit.growth_factor()
    ));
    out.push_str(&format!(
        "Trend growth: {:.4} log points per year\n",
        fit.annualized_log_growth()
    ));
    out
}

/// Format the per-period table.
pub fn format_period_table(fits: &[PeriodFit], anchor: Quarter) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>5} {:<7} {:>12} {:>12} {:>8} {:>12} {:>12} {:>12} {:>12}\n",
            "t", "quarter", "gdp", "labour", "share", "capital", "log_a", "log_a_fit", "residual"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:->5} {:-<7} {:->12} {:->12} {:->8} {:->12} {:->12} {:->12} {:->12}\n",
            "", "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for f in fits {
        let p = &f.period;
        out.push_str(
            format!(
                "{:>5} {:<7} {:>12} {:>12} {:>8.4} {:>12} {:>12.6} {:>12.6} {:>12.3e}\n",
                p.t,
                anchor.offset(p.t).to_string(),
                p.gdp,
                p.labour,
                p.capital_share,
                p.capital,
                p.log_a,
                f.log_a_fit,
                f.residual,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn min_mean_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
        sum += v;
        n += 1;
    }
    if n == 0 {
        None
    } else {
        Some((lo, sum / n as f64, hi))
    }
}
