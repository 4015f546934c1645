//! Ratatui-based chart window.
//!
//! Shows the fitted coefficients and two vertically stacked charts: the
//! productivity level `A` and `log(A)`, each with the fitted trend overlaid on
//! the observed periods. The window is read-only; it closes on `q` or `Esc`.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline::RunOutput;
use crate::domain::Quarter;
use crate::error::AppError;
use crate::plot::ChartData;

mod plotters_chart;

use plotters_chart::TrendPlottersChart;

/// Open the chart window and block until the user closes it.
pub fn run(run: &RunOutput, anchor: Quarter) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(run, anchor);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App<'a> {
    run: &'a RunOutput,
    anchor: Quarter,
    data: ChartData,
    x_label: String,
    show_summary: bool,
}

impl<'a> App<'a> {
    fn new(run: &'a RunOutput, anchor: Quarter) -> Self {
        Self {
            run,
            anchor,
            data: ChartData::new(&run.log_a(), &run.fit),
            x_label: format!("Time (0 = {anchor})"),
            show_summary: true,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the window should close.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('t') => self.show_summary = !self.show_summary,
            _ => {}
        }
        false
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let header = if self.show_summary { 5 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header),
                Constraint::Percentage(50),
                Constraint::Percentage(50),
                Constraint::Length(3),
            ])
            .split(frame.area());

        if self.show_summary {
            self.draw_header(frame, chunks[0]);
        }
        self.draw_chart(
            frame,
            chunks[1],
            "Solow Residual: A",
            &self.data.level_curve,
            &self.data.level_points,
            self.data.level_bounds,
            "A",
            fmt_axis_sci,
        );
        self.draw_chart(
            frame,
            chunks[2],
            "log(A)",
            &self.data.log_curve,
            &self.data.log_points,
            self.data.log_bounds,
            "log(A)",
            fmt_axis_log,
        );
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let fit = &self.run.fit;
        let n = self.run.periods.len();
        let last = self.anchor.offset(n.saturating_sub(1));

        let lines = vec![
            Line::from(vec![
                Span::styled("solow", Style::default().fg(Color::Cyan)),
                Span::raw(format!(" | T={n} | {} .. {last}", self.anchor)),
            ]),
            Line::from(Span::styled(
                format!(
                    "c_0 = {:.6}, c_1 = {:.6e} | A(t) = exp(c_0 + c_1 t) = {:.6e} * {:.8}^t",
                    fit.c0,
                    fit.c1,
                    fit.scale_factor(),
                    fit.growth_factor()
                ),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format!(
                    "rmse={:.4e} | r^2={:.4} | trend growth {:.4} log points/yr",
                    fit.quality.rmse,
                    fit.quality.r_squared,
                    fit.annualized_log_growth()
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_chart(
        &self,
        frame: &mut ratatui::Frame<'_>,
        area: Rect,
        title: &str,
        curve: &[(f64, f64)],
        points: &[(f64, f64)],
        y_bounds: [f64; 2],
        y_label: &str,
        fmt_y: fn(f64) -> String,
    ) {
        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let widget = TrendPlottersChart {
            curve,
            points,
            x_bounds: self.data.x_bounds,
            y_bounds,
            x_label: &self.x_label,
            y_label,
            fmt_x: fmt_axis_period,
            fmt_y,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "t toggle summary  q/Esc quit";
        let line = Line::from(Span::styled(help, Style::default().fg(Color::Gray)));
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn fmt_axis_period(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_sci(v: f64) -> String {
    format!("{v:.2e}")
}

fn fmt_axis_log(v: f64) -> String {
    format!("{v:.3}")
}
