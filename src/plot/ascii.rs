//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Two panels are stacked, mirroring the chart window:
//! - top: productivity level `A` (observed `exp(log A)` vs `exp(c0 + c1 t)`)
//! - bottom: `log(A)` (observed vs `c0 + c1 t`)
//!
//! Plot elements: observed points `o`, fitted trend `-`.

use crate::domain::{FitFile, TrendFit};
use crate::plot::ChartData;

/// Render both panels for an observed `log(A)` series and its trend.
pub fn render_ascii_panels(log_a: &[f64], fit: &TrendFit, width: usize, height: usize) -> String {
    let data = ChartData::new(log_a, fit);
    let [t_min, t_max] = data.x_bounds;

    let mut out = render_panel("A", &data.level_points, &data.level_curve, t_min, t_max, width, height);
    out.push('\n');
    out.push_str(&render_panel("log(A)", &data.log_points, &data.log_curve, t_min, t_max, width, height));
    out
}

/// Render both panels from a saved fit file.
pub fn render_ascii_panels_from_fit_file(file: &FitFile, width: usize, height: usize) -> String {
    render_ascii_panels(&file.log_a, &file.fit, width, height)
}

/// Render a single panel: trend line first, observed points on top.
pub fn render_panel(
    title: &str,
    points: &[(f64, f64)],
    curve: &[(f64, f64)],
    t_min: f64,
    t_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(points, curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    draw_curve(&mut grid, curve, t_min, t_max, y_min, y_max);

    for &(t, y) in points {
        if !y.is_finite() {
            continue;
        }
        let x = map_x(t, t_min, t_max, width);
        let yy = map_y(y, y_min, y_max, height);
        grid[yy][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{title}: t=[{t_min:.0}, {t_max:.0}] | y=[{y_min:.4e}, {y_max:.4e}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

/// Period index range `[0, T-1]`, widened to `[0, 1]` for degenerate series.
pub fn period_range(n: usize) -> (f64, f64) {
    let t_max = n.saturating_sub(1) as f64;
    if t_max > 0.0 { (0.0, t_max) } else { (0.0, 1.0) }
}

/// Evenly sample a trend function over `[t_min, t_max]`.
pub fn sample_trend(t_min: f64, t_max: f64, n: usize, f: impl Fn(f64) -> f64) -> Vec<(f64, f64)> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let t = t_min + u * (t_max - t_min);
            (t, f(t))
        })
        .collect()
}

fn y_range(points: &[(f64, f64)], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(_, y) in points.iter().chain(curve) {
        if y.is_finite() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else if min_y.is_finite() && min_y == max_y {
        // Flat series: centre it in a unit-wide window.
        Some((min_y - 0.5, max_y + 0.5))
    } else {
        None
    }
}

pub(crate) fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], t_min: f64, t_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, y) in curve {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let x = map_x(t, t_min, t_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, '-');
        } else {
            grid[yy][x] = '-';
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitQuality;

    #[test]
    fn panel_golden_snapshot_small() {
        let points = [(0.0, 0.0), (1.0, 1.0)];
        let curve = sample_trend(0.0, 1.0, 10, |t| t);

        let txt = render_panel("log(A)", &points, &curve, 0.0, 1.0, 10, 5);
        let expected = concat!(
            "log(A): t=[0, 1] | y=[-5.0000e-2, 1.0500e0]\n",
            "         o\n",
            "      --- \n",
            "    --    \n",
            " ---      \n",
            "o         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn panels_stack_level_above_log() {
        let fit = TrendFit {
            c0: 0.0,
            c1: 1.0,
            quality: FitQuality { n: 3, sse: 0.0, rmse: 0.0, r_squared: 1.0 },
        };
        let txt = render_ascii_panels(&[0.0, 1.0, 2.0], &fit, 20, 6);
        let headers: Vec<&str> = txt.lines().filter(|l| l.contains(": t=[0, 2]")).collect();
        assert_eq!(headers.len(), 2);
        assert!(headers[0].starts_with("A:"));
        assert!(headers[1].starts_with("log(A):"));
        // 2 headers + 2 * 6 rows + 1 separator line.
        assert_eq!(txt.lines().count(), 15);
    }

    #[test]
    fn degenerate_period_range_is_widened() {
        assert_eq!(period_range(1), (0.0, 1.0));
        assert_eq!(period_range(238), (0.0, 237.0));
    }
}
