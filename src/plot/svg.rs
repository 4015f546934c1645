//! Two-panel SVG figure.
//!
//! Layout matches the chart window: productivity level on top, `log(A)` below,
//! both sharing the period axis. Fitted trends are red lines; observed values
//! are translucent dots.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::Quarter;
use crate::error::AppError;
use crate::plot::ChartData;

const FIGURE_SIZE: (u32, u32) = (1024, 768);

/// Write the two-panel figure to `path`.
pub fn write_svg(path: &Path, data: &ChartData, anchor: Quarter) -> Result<(), AppError> {
    let draw_err = |e: &dyn std::fmt::Display| {
        AppError::runtime(format!("Failed to render SVG '{}': {e}", path.display()))
    };

    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_err(&e))?;
    let root = root
        .titled("Solow Residual", ("sans-serif", 24))
        .map_err(|e| draw_err(&e))?;

    let panels = root.split_evenly((2, 1));
    let x_desc = format!("Time (0 = {anchor})");

    draw_panel(
        &panels[0],
        &data.level_points,
        &data.level_curve,
        data.x_bounds,
        data.level_bounds,
        "",
        "A",
        |v| format!("{v:.3e}"),
    )
    .map_err(|e| draw_err(&e))?;

    draw_panel(
        &panels[1],
        &data.log_points,
        &data.log_curve,
        data.x_bounds,
        data.log_bounds,
        &x_desc,
        "log(A)",
        |v| format!("{v:.4}"),
    )
    .map_err(|e| draw_err(&e))?;

    root.present().map_err(|e| draw_err(&e))?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    points: &[(f64, f64)],
    curve: &[(f64, f64)],
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_desc: &str,
    y_desc: &str,
    fmt_y: fn(f64) -> String,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x_bounds[0]..x_bounds[1], y_bounds[0]..y_bounds[1])?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_labels(10)
        .y_labels(6)
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| fmt_y(*v))
        .draw()?;

    chart.draw_series(LineSeries::new(curve.iter().copied(), RED.stroke_width(2)))?;
    chart.draw_series(
        points
            .iter()
            .filter(|(_, y)| y.is_finite())
            .map(|&(x, y)| Circle::new((x, y), 2, BLUE.mix(0.5).filled())),
    )?;

    Ok(())
}
