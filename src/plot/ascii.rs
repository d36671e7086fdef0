//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Quarterly plot elements:
//! - current year: `*` points joined by `-`
//! - prior year: `o` points joined by `.`
//!
//! Annual plot: one horizontal bar per year, `#` for final years and `=` for
//! provisional ones.

use crate::analytics::chart::{AnnualBar, YearLine, bar_extent, line_extent};
use crate::domain::Quarter;
use crate::report::format::bar_label;

/// Render the two-year quarterly line chart.
pub fn render_quarterly_plot(lines: &[YearLine], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((lo, hi)) = line_extent(lines) else {
        return "No chart data.\n".to_string();
    };
    let (y_min, y_max) = if hi > lo { pad_range(lo, hi, 0.05) } else { (lo - 1.0, hi + 1.0) };

    let mut grid = vec![vec![' '; width]; height];

    // Prior years first so the current year overlays them.
    let mut ordered: Vec<&YearLine> = lines.iter().collect();
    ordered.sort_by_key(|l| l.is_current);

    for line in &ordered {
        let ch = if line.is_current { '-' } else { '.' };
        let mut prev = None;
        for (i, value) in line.values.iter().enumerate() {
            let Some(v) = value.filter(|v| v.is_finite()) else {
                prev = None;
                continue;
            };
            let x = map_x(i, width);
            let y = map_y(v, y_min, y_max, height);
            if let Some((x0, y0)) = prev {
                draw_line(&mut grid, x0, y0, x, y, ch);
            }
            prev = Some((x, y));
        }
    }

    for line in &ordered {
        let marker = if line.is_current { '*' } else { 'o' };
        for (i, value) in line.values.iter().enumerate() {
            if let Some(v) = value.filter(|v| v.is_finite()) {
                grid[map_y(v, y_min, y_max, height)][map_x(i, width)] = marker;
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!("Plot: Q1-Q4 | y=[{y_min:.2}, {y_max:.2}]\n"));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&axis_row(width));
    out.push('\n');

    let legend: Vec<String> = lines
        .iter()
        .map(|l| format!("{} {}", if l.is_current { '*' } else { 'o' }, l.year))
        .collect();
    out.push_str(&format!("Legend: {}\n", legend.join(" | ")));
    out
}

/// Render the annual bar chart, one row per year.
pub fn render_annual_plot(bars: &[AnnualBar], width: usize) -> String {
    let width = width.max(10);
    let Some((lo, hi)) = bar_extent(bars) else {
        return "No chart data.\n".to_string();
    };
    let max_abs = lo.abs().max(hi.abs());

    let mut out = String::new();
    out.push_str(&format!("Plot: annual | max={max_abs:.2}\n"));
    for bar in bars {
        let len = if max_abs > 0.0 {
            ((bar.value.abs() / max_abs) * width as f64).round() as usize
        } else {
            0
        };
        let fill = if bar.provisional { '=' } else { '#' };
        let body: String = std::iter::repeat_n(fill, len.min(width)).collect();
        let line = format!("{} |{body:<width$} {}", bar.year, bar_label(bar));
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn axis_row(width: usize) -> String {
    let mut row = vec![' '; width + 2];
    for q in Quarter::ALL {
        let x = map_x(usize::from(q.index() - 1), width);
        for (offset, ch) in q.label().chars().enumerate() {
            if let Some(cell) = row.get_mut(x + offset) {
                *cell = ch;
            }
        }
    }
    row.into_iter().collect::<String>().trim_end().to_string()
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(quarter_slot: usize, width: usize) -> usize {
    let width = width.max(2);
    let u = (quarter_slot as f64 / 3.0).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
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

    #[test]
    fn quarterly_plot_golden_snapshot_small() {
        let lines = vec![
            YearLine {
                year: 2025,
                values: [Some(10.0), Some(20.0), None, None],
                is_current: true,
            },
            YearLine {
                year: 2024,
                values: [Some(10.0); 4],
                is_current: false,
            },
        ];

        let txt = render_quarterly_plot(&lines, 10, 5);
        let expected = concat!(
            "Plot: Q1-Q4 | y=[9.50, 20.50]\n",
            "   *      \n",
            "  -       \n",
            "  -       \n",
            " -        \n",
            "*..o..o..o\n",
            "Q1 Q2 Q3 Q4\n",
            "Legend: * 2025 | o 2024\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn annual_plot_marks_provisional_bars() {
        let bars = vec![
            AnnualBar {
                year: 2024,
                value: 100.0,
                quarter: Quarter::Q4,
                provisional: false,
                is_current: false,
            },
            AnnualBar {
                year: 2025,
                value: 50.0,
                quarter: Quarter::Q2,
                provisional: true,
                is_current: true,
            },
        ];

        let txt = render_annual_plot(&bars, 10);
        let expected = concat!(
            "Plot: annual | max=100.00\n",
            "2024 |########## 100\n",
            "2025 |=====      50 (Provisional – Q2)\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_series_render_placeholder() {
        assert_eq!(render_annual_plot(&[], 20), "No chart data.\n");
        let lines = vec![YearLine {
            year: 2025,
            values: [None; 4],
            is_current: true,
        }];
        assert_eq!(render_quarterly_plot(&lines, 20, 8), "No chart data.\n");
    }
}
