//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` configuration
//! - parses CLI arguments
//! - runs the derivation + fit pipeline
//! - prints reports/plots
//! - writes optional exports
//! - opens the chart window

use clap::Parser;

use crate::cli::{Command, PlotArgs, RunArgs};
use crate::domain::{Quarter, RunConfig};
use crate::error::AppError;
use crate::plot::ChartData;

pub mod pipeline;

/// Entry point for the `solow` binary.
pub fn run() -> Result<(), AppError> {
    // Values from `.env` feed clap's `env` fallbacks; a missing file is fine.
    dotenvy::dotenv().ok();

    // We want `solow` and `solow --gdp x.txt` to behave like `solow show ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_run(args, OutputMode::Window),
        Command::Fit(args) => handle_run(args, OutputMode::Console),
        Command::Plot(args) => handle_plot(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Window,
    Console,
}

fn handle_run(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let run = pipeline::run_pipeline(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.periods, &run.fit, &config)
    );
    if config.table {
        println!(
            "{}",
            crate::report::format_period_table(&run.fits, config.anchor)
        );
    }

    let log_a = run.log_a();

    if mode == OutputMode::Console {
        let plot = crate::plot::render_ascii_panels(&log_a, &run.fit, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::write_results_csv(path, &run.fits, config.anchor)?;
    }
    if let Some(path) = &config.export_fit {
        let file = crate::io::build_fit_file(&run.periods, &run.fit, config.anchor);
        crate::io::write_fit_json(path, &file)?;
    }
    if let Some(path) = &config.export_svg {
        crate::plot::write_svg(path, &ChartData::new(&log_a, &run.fit), config.anchor)?;
    }

    if mode == OutputMode::Window {
        crate::tui::run(&run, config.anchor)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file = crate::io::read_fit_json(&args.fit)?;
    println!("{}", crate::report::format_coefficients(&file.fit));
    println!(
        "{}",
        crate::plot::render_ascii_panels_from_fit_file(&file, args.width, args.height)
    );
    Ok(())
}

pub fn run_config_from_args(args: &RunArgs) -> Result<RunConfig, AppError> {
    Ok(RunConfig {
        gdp_path: args.gdp.clone(),
        labour_path: args.labour.clone(),
        anchor: Quarter::new(args.anchor_year, args.anchor_quarter)?,
        table: args.table,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_fit: args.export_fit.clone(),
        export_svg: args.export_svg.clone(),
    })
}

/// Rewrite argv so `solow` defaults to `solow show`.
///
/// Rules:
/// - `solow`                      -> `solow show`
/// - `solow --gdp g.txt ...`      -> `solow show --gdp g.txt ...`
/// - `solow --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("show".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "fit" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "show flags".
    if arg1.starts_with('-') {
        argv.insert(1, "show".to_string());
        return argv;
    }

    argv
}
