//! Ratatui-based terminal UI.
//!
//! One tab per indicator (colored by diagnosis), the active indicator's chart
//! with its legend, and the summary row underneath.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs},
};

use crate::analytics::{Tab, assemble};
use crate::analytics::chart::{annual_bars, bar_extent, line_extent, quarterly_lines};
use crate::app::pipeline::{DashboardRun, run_dashboard};
use crate::domain::{Cadence, ComparisonResult, DashboardConfig, Diagnosis, Quarter};
use crate::error::AppError;
use crate::report::format::{
    LegendItem, annual_legend, bar_label, quarterly_legend, table_cells, table_headers,
};

mod plotters_chart;

use plotters_chart::{BarSpec, ChartSeries, IndicatorChart, LineSpec};

const CURRENT_COLOR: RGBColor = RGBColor(0, 255, 255);
const PRIOR_COLOR: RGBColor = RGBColor(150, 150, 150);
const PROVISIONAL_COLOR: RGBColor = RGBColor(255, 200, 0);

/// Start the TUI.
pub fn run(config: DashboardConfig) -> Result<(), AppError> {
    // Load before touching the terminal so load errors print normally.
    let mut app = App::new(config)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
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

struct App {
    config: DashboardConfig,
    run: DashboardRun,
    active: usize,
    status: String,
}

impl App {
    fn new(config: DashboardConfig) -> Result<Self, AppError> {
        let run = run_dashboard(&config)?;
        if !run.has_data() {
            return Err(AppError::no_data("No data available."));
        }
        let active = run.default_tab().unwrap_or(0);
        Ok(Self {
            status: format!("Loaded {}", run.source),
            config,
            run,
            active,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
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

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left | KeyCode::BackTab => {
                self.active = step_tab(&self.run.tabs, self.active, false);
            }
            KeyCode::Right | KeyCode::Tab => {
                self.active = step_tab(&self.run.tabs, self.active, true);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = usize::from(c as u8 - b'1');
                match self.run.tabs.get(index) {
                    Some(tab) if tab.enabled => self.active = index,
                    Some(tab) => self.status = format!("{} has no data.", tab.indicator),
                    None => {}
                }
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('d') => match crate::debug::write_debug_bundle(&self.run) {
                Ok(path) => self.status = format!("Wrote debug bundle: {}", path.display()),
                Err(err) => self.status = format!("Debug write failed: {err}"),
            },
            _ => {}
        }
        false
    }

    fn reload(&mut self) {
        let previous = self.run.tabs.get(self.active).map(|t| t.indicator.clone());
        match run_dashboard(&self.config) {
            Ok(run) => {
                self.active = previous
                    .and_then(|ind| run.tab_index(&ind))
                    .filter(|&i| run.tabs[i].enabled)
                    .or_else(|| run.default_tab())
                    .unwrap_or(0);
                self.status = format!(
                    "Reloaded {} ({} values).",
                    run.source,
                    run.store.len()
                );
                self.run = run;
            }
            Err(err) => self.status = format!("Reload failed: {err}"),
        }
    }

    fn export(&mut self) {
        let ts = Local::now().format("%Y%m%d_%H%M%S");
        let json = PathBuf::from(format!("taxdash_summary_{ts}.json"));
        let csv = PathBuf::from(format!("taxdash_summary_{ts}.csv"));
        let result = crate::io::export::write_summary_json(&json, &self.run)
            .and_then(|()| crate::io::export::write_summary_csv(&csv, &self.run.summaries));
        self.status = match result {
            Ok(()) => format!("Exported {} and {}", json.display(), csv.display()),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(6),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_tabs(frame, chunks[1]);
        self.draw_chart(frame, chunks[2]);
        self.draw_summary(frame, chunks[3]);
        self.draw_footer(frame, chunks[4]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let window = self
            .run
            .window
            .map(|w| format!("{}–{}", w.previous(), w.current))
            .unwrap_or_else(|| "-".to_string());
        let currency = self.run.dataset.meta.currency.as_deref().unwrap_or("-");

        let line = Line::from(vec![
            Span::styled("taxdash", Style::default().fg(Color::Cyan)),
            Span::raw(" — tax indicators"),
            Span::styled(
                format!(
                    " | source: {} | currency: {currency} | window: {window} | values: {}",
                    self.run.source,
                    self.run.store.len()
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<Line> = self
            .run
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let style = if tab.enabled {
                    Style::default().fg(diagnosis_color(tab.diagnosis))
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Line::from(Span::styled(
                    format!("{} {} {}", i + 1, tab.indicator, tab.diagnosis.symbol()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.active)
            .divider(" | ")
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
            .block(Block::default().title("Indicators").borders(Borders::ALL));
        frame.render_widget(tabs, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(tab) = self.run.tabs.get(self.active) else {
            return;
        };
        let title = match tab.cadence {
            Cadence::Quarterly => format!("{} (quarterly)", tab.indicator),
            Cadence::Annual => format!("{} (annual)", tab.indicator),
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(data) = chart_data(&self.run, tab) else {
            let msg = Paragraph::new(format!("No data for {}.", tab.indicator))
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        frame.render_widget(Paragraph::new(legend_line(&data.legend, &data.value_labels)), rows[0]);

        let series = match tab.cadence {
            Cadence::Quarterly => ChartSeries::Lines(&data.lines),
            Cadence::Annual => ChartSeries::Bars(&data.bars),
        };
        let (chart_rect, insets) = chart_layout(rows[1]);
        let widget = IndicatorChart {
            series,
            x_bounds: data.x_bounds,
            y_bounds: data.y_bounds,
        };
        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, rows[1], chart_rect, insets, &data);
        }
    }

    fn draw_summary(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Summary").borders(Borders::ALL);
        let Some(comparison) = active_comparison(&self.run, &self.config, self.active) else {
            frame.render_widget(block, area);
            return;
        };
        let c = &comparison;

        let header = Row::new(
            table_headers(c.cadence, c.current_provisional_quarter)
                .map(|h| Cell::from(h).style(Style::default().fg(Color::Gray))),
        );
        let [prior, current, delta, diagnosis] = table_cells(c);
        let row = Row::new(vec![
            Cell::from(prior),
            Cell::from(current),
            Cell::from(delta),
            Cell::from(diagnosis).style(Style::default().fg(diagnosis_color(c.diagnosis))),
        ]);

        let mut rows = vec![row];
        if let (Some(prior_at), Some(current_at)) = (c.prior_at, c.current_at) {
            rows.push(Row::new(vec![
                Cell::from(prior_at.to_string()),
                Cell::from(current_at.to_string()),
            ]).style(Style::default().fg(Color::DarkGray)));
        }

        let table = Table::new(rows, [Constraint::Percentage(25); 4])
            .header(header)
            .block(block);
        frame.render_widget(table, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ or 1-9 switch tab  r reload  e export  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Comparison for the tab at `active`, assembled fresh from the store.
fn active_comparison(
    run: &DashboardRun,
    config: &DashboardConfig,
    active: usize,
) -> Option<ComparisonResult> {
    let tab = run.tabs.get(active)?;
    Some(assemble(&run.store, &tab.indicator, config))
}

/// Next (or previous) enabled tab, wrapping around. Stays put when no other tab is enabled.
fn step_tab(tabs: &[Tab], from: usize, forward: bool) -> usize {
    let n = tabs.len();
    if n == 0 {
        return from;
    }
    (1..n)
        .map(|k| if forward { (from + k) % n } else { (from + n - k) % n })
        .find(|&i| tabs[i].enabled)
        .unwrap_or(from)
}

fn diagnosis_color(diagnosis: Diagnosis) -> Color {
    match diagnosis {
        Diagnosis::Green => Color::Green,
        Diagnosis::Yellow => Color::Yellow,
        Diagnosis::Red => Color::Red,
    }
}

fn to_tui_color(c: RGBColor) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// Everything the chart panel draws for one indicator.
struct ChartData {
    lines: Vec<LineSpec>,
    bars: Vec<BarSpec>,
    legend: Vec<(LegendItem, RGBColor)>,
    /// Per-bar value labels (annual only).
    value_labels: Vec<String>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_ticks: Vec<(f64, String)>,
}

/// Build chart series for Plotters. `None` when the indicator has nothing to draw.
fn chart_data(run: &DashboardRun, tab: &Tab) -> Option<ChartData> {
    match tab.cadence {
        Cadence::Quarterly => {
            let window = run.window?;
            let lines = quarterly_lines(&run.store, &tab.indicator, window);
            let (lo, hi) = line_extent(&lines)?;

            let legend = quarterly_legend(&lines)
                .into_iter()
                .map(|item| {
                    let color = if item.is_current { CURRENT_COLOR } else { PRIOR_COLOR };
                    (item, color)
                })
                .collect();

            let specs = lines
                .iter()
                .map(|line| LineSpec {
                    segments: segments(&line.values),
                    color: if line.is_current { CURRENT_COLOR } else { PRIOR_COLOR },
                })
                .collect();

            Some(ChartData {
                lines: specs,
                bars: Vec::new(),
                legend,
                value_labels: Vec::new(),
                x_bounds: [0.5, 4.5],
                y_bounds: pad_bounds(lo, hi),
                x_ticks: Quarter::ALL
                    .iter()
                    .map(|q| (f64::from(q.index()), q.label().to_string()))
                    .collect(),
            })
        }
        Cadence::Annual => {
            let bars = annual_bars(&run.store, &tab.indicator);
            let (lo, hi) = bar_extent(&bars)?;
            let first = bars.first()?.year;
            let last = bars.last()?.year;

            let bar_color = |is_current: bool, provisional: bool| match (is_current, provisional) {
                (true, true) => PROVISIONAL_COLOR,
                (true, false) => CURRENT_COLOR,
                _ => PRIOR_COLOR,
            };
            let current_provisional = bars.iter().any(|b| b.is_current && b.provisional);

            let legend = annual_legend(&bars)
                .into_iter()
                .map(|item| {
                    let color = bar_color(item.is_current, current_provisional);
                    (item, color)
                })
                .collect();

            let specs = bars
                .iter()
                .map(|b| BarSpec {
                    x: f64::from(b.year),
                    value: b.value,
                    color: bar_color(b.is_current, b.provisional),
                })
                .collect();

            Some(ChartData {
                lines: Vec::new(),
                bars: specs,
                legend,
                value_labels: bars
                    .iter()
                    .map(|b| format!("{}: {}", b.year, bar_label(b)))
                    .collect(),
                x_bounds: [f64::from(first) - 0.6, f64::from(last) + 0.6],
                y_bounds: pad_bounds(lo.min(0.0), hi.max(0.0)),
                x_ticks: bars
                    .iter()
                    .map(|b| (f64::from(b.year), bar_tick(b)))
                    .collect(),
            })
        }
    }
}

fn bar_tick(bar: &crate::analytics::chart::AnnualBar) -> String {
    if bar.provisional {
        format!("{}*", bar.year)
    } else {
        bar.year.to_string()
    }
}

/// Split `Q1..Q4` values into contiguous `(x, y)` runs; gaps are not bridged.
fn segments(values: &[Option<f64>; 4]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) if v.is_finite() => current.push((i as f64 + 1.0, *v)),
            _ => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn pad_bounds(lo: f64, hi: f64) -> [f64; 2] {
    if hi <= lo {
        return [lo - 1.0, hi + 1.0];
    }
    let pad = ((hi - lo).abs() * 0.05).max(1e-12);
    [lo - pad, hi + pad]
}

fn legend_line(items: &[(LegendItem, RGBColor)], value_labels: &[String]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (item, color)) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled("■ ", Style::default().fg(to_tui_color(*color))));
        spans.push(Span::raw(item.label.clone()));
    }
    if !value_labels.is_empty() {
        spans.push(Span::styled(
            format!("   [{}]", value_labels.join(" | ")),
            Style::default().fg(Color::Gray),
        ));
    }
    Line::from(spans)
}

/// Compact tick label: `1.2M`, `850K`, `42`.
fn fmt_axis_y(v: f64) -> String {
    let a = v.abs();
    if a >= 1e9 {
        format!("{:.1}B", v / 1e9)
    } else if a >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if a >= 1e4 {
        format!("{:.0}K", v / 1e3)
    } else {
        format!("{v:.0}")
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 0,
        bottom: 1,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    data: &ChartData,
) {
    let style = Style::default().fg(Color::Gray);
    let [x0, x1] = data.x_bounds;
    let [y0, y1] = data.y_bounds;

    let y = chart.y + chart.height;
    if y < inner.y + inner.height {
        for (value, label) in &data.x_ticks {
            let u = ((value - x0) / (x1 - x0)).clamp(0.0, 1.0);
            let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
            let width = label.chars().count() as u16;
            let start = x.saturating_sub(width / 2).max(inner.x);
            frame.render_widget(
                Paragraph::new(label.as_str()).style(style),
                Rect {
                    x: start,
                    y,
                    width: width.min(inner.x + inner.width - start),
                    height: 1,
                },
            );
        }
    }

    let ticks = 5usize;
    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let label = fmt_axis_y(y0 + u * (y1 - y0));
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label_len = label.chars().count() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(Text::from(label)).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_with_dataset;
    use crate::domain::{DataSource, Indicator};
    use crate::io::ingest::parse_dataset;

    fn tab(key: &str, enabled: bool) -> Tab {
        Tab {
            indicator: Indicator::new(key),
            cadence: Cadence::Quarterly,
            enabled,
            diagnosis: Diagnosis::Yellow,
        }
    }

    #[test]
    fn tab_stepping_skips_disabled_tabs() {
        let tabs = vec![tab("VAT", true), tab("PIT", false), tab("CIT", true)];
        assert_eq!(step_tab(&tabs, 0, true), 2);
        assert_eq!(step_tab(&tabs, 2, true), 0);
        assert_eq!(step_tab(&tabs, 0, false), 2);
        assert_eq!(step_tab(&tabs, 2, false), 0);

        let lonely = vec![tab("VAT", true), tab("PIT", false)];
        assert_eq!(step_tab(&lonely, 0, true), 0);
        assert_eq!(step_tab(&[], 0, true), 0);
    }

    #[test]
    fn gaps_split_line_segments() {
        let segs = segments(&[Some(1.0), None, Some(3.0), Some(4.0)]);
        assert_eq!(segs, vec![vec![(1.0, 1.0)], vec![(3.0, 3.0), (4.0, 4.0)]]);
        assert!(segments(&[None; 4]).is_empty());
    }

    #[test]
    fn chart_data_for_both_cadences() {
        let dataset = parse_dataset(
            r#"{ "data": [
                { "year": 2024, "quarter": "Q4", "PIT": 100, "VAT": 200, "CIT": 400 },
                { "year": 2025, "quarter": "Q2", "PIT": 90, "VAT": null, "CIT": 150 }
            ] }"#,
        )
        .unwrap();
        let run = run_with_dataset(&DashboardConfig::new(DataSource::Stdin), dataset);

        let pit = &run.tabs[run.tab_index(&Indicator::new("PIT")).unwrap()];
        let data = chart_data(&run, pit).unwrap();
        assert_eq!(data.lines.len(), 2);
        assert_eq!(data.x_ticks.len(), 4);
        assert_eq!(data.legend[0].0.label, "This year (2025)");

        let cit = &run.tabs[run.tab_index(&Indicator::new("CIT")).unwrap()];
        let data = chart_data(&run, cit).unwrap();
        assert_eq!(data.bars.len(), 2);
        assert_eq!(data.bars[1].color, PROVISIONAL_COLOR);
        assert_eq!(data.x_ticks[1].1, "2025*");
        assert!(data.y_bounds[0] < 0.0);
        assert_eq!(data.legend[0].0.label, "This year (Provisional)");
        assert_eq!(data.value_labels[1], "2025: 150 (Provisional – Q2)");
    }

    #[test]
    fn summary_row_follows_the_session_config() {
        let dataset = parse_dataset(
            r#"{ "data": [
                { "year": 2024, "quarter": "Q4", "PIT": 100 },
                { "year": 2025, "quarter": "Q1", "PIT": 30 },
                { "year": 2025, "quarter": "Q2", "PIT": 60 }
            ] }"#,
        )
        .unwrap();
        let config = DashboardConfig::new(DataSource::Stdin);
        let run = run_with_dataset(&config, dataset);
        let pit = run.tab_index(&Indicator::new("PIT")).unwrap();

        let quarterly = active_comparison(&run, &config, pit).unwrap();
        assert_eq!(quarterly, run.summary(&Indicator::new("PIT")).unwrap().comparison);
        assert_eq!((quarterly.prior_period, quarterly.current_period), (Some(30.0), Some(60.0)));

        let mut annual_pit = config.clone();
        annual_pit.annual = vec![Indicator::new("PIT")];
        let annual = active_comparison(&run, &annual_pit, pit).unwrap();
        assert_eq!(annual.cadence, Cadence::Annual);
        assert_eq!((annual.prior_period, annual.current_period), (Some(50.0), Some(60.0)));
        assert_eq!(annual.current_provisional_quarter, Some(Quarter::Q2));

        assert_eq!(active_comparison(&run, &config, run.tabs.len()), None);
    }

    #[test]
    fn compact_axis_labels() {
        assert_eq!(fmt_axis_y(42.0), "42");
        assert_eq!(fmt_axis_y(85_000.0), "85K");
        assert_eq!(fmt_axis_y(1_260_000.0), "1.3M");
    }
}
