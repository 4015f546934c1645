//! `solow-residual` library crate.
//!
//! Estimates the Solow residual (total factor productivity) from quarterly GDP
//! and labour-income series: derive `log(A)` per period from the production
//! identity, fit a linear trend by least squares, and report/plot the result.
//!
//! The binary (`solow`) is a thin wrapper around this library so that:
//!
//! - every pipeline stage is testable without spawning processes
//! - the console, TUI and export front-ends share one pipeline

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod residual;
pub mod tui;
