//! Command-line parsing for the Solow residual estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numeric code.
//!
//! Input paths and the anchor quarter can also come from the environment (or a
//! `.env` file loaded before parsing); explicit flags always win.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "solow", version, about = "Solow residual (TFP) trend estimator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the trend, print the summary, and open the interactive chart window.
    Show(RunArgs),
    /// Fit the trend, print the summary and ASCII plots, and optionally export.
    Fit(RunArgs),
    /// Plot a previously exported fit JSON.
    Plot(PlotArgs),
}

/// Common options for running the pipeline.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// GDP series: one integer (millions) per line, chronological.
    #[arg(long, env = "SOLOW_GDP_FILE", default_value = "gdp.txt")]
    pub gdp: PathBuf,

    /// Labour-income series: one integer (millions) per line, aligned with GDP.
    #[arg(long, env = "SOLOW_LABOUR_FILE", default_value = "labour.txt")]
    pub labour: PathBuf,

    /// Calendar year of period t = 0.
    #[arg(long, env = "SOLOW_ANCHOR_YEAR", default_value_t = 1961)]
    pub anchor_year: i32,

    /// Calendar quarter (1-4) of period t = 0.
    #[arg(long, env = "SOLOW_ANCHOR_QUARTER", default_value_t = 1)]
    pub anchor_quarter: u8,

    /// Print the per-period table after the summary.
    #[arg(long)]
    pub table: bool,

    /// ASCII plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// ASCII plot height (rows per panel).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export per-period results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fit (coefficients + observed log(A)) to JSON.
    #[arg(long = "export-fit")]
    pub export_fit: Option<PathBuf>,

    /// Save the two-panel chart as SVG.
    #[arg(long = "export-svg")]
    pub export_svg: Option<PathBuf>,
}

/// Options for plotting a saved fit.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Fit JSON file produced by `solow fit --export-fit`.
    #[arg(long, value_name = "JSON")]
    pub fit: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows per panel).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_command_parses_paths_and_exports() {
        let cli = Cli::parse_from([
            "solow", "fit", "--gdp", "g.txt", "--labour", "n.txt", "--anchor-quarter", "3", "--export", "out.csv",
        ]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.gdp, PathBuf::from("g.txt"));
        assert_eq!(args.labour, PathBuf::from("n.txt"));
        assert_eq!(args.anchor_quarter, 3);
        assert_eq!(args.export, Some(PathBuf::from("out.csv")));
        assert!(args.export_svg.is_none());
    }

    #[test]
    fn plot_command_requires_fit_file() {
        assert!(Cli::try_parse_from(["solow", "plot"]).is_err());
        assert!(Cli::try_parse_from(["solow", "plot", "--fit", "fit.json"]).is_ok());
    }
}
