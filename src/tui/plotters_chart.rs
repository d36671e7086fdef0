//! Plotters-powered indicator chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - bars and lines share one coordinate system
//! - less manual work for ticks/labels
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// One year's quarterly line, already split at gaps.
pub struct LineSpec {
    pub segments: Vec<Vec<(f64, f64)>>,
    pub color: RGBColor,
}

/// One annual bar centred on `x`.
pub struct BarSpec {
    pub x: f64,
    pub value: f64,
    pub color: RGBColor,
}

/// What to draw inside the axes.
#[derive(Clone, Copy)]
pub enum ChartSeries<'a> {
    Lines(&'a [LineSpec]),
    Bars(&'a [BarSpec]),
}

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct IndicatorChart<'a> {
    pub series: ChartSeries<'a>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

/// Half of a bar's width in x units (years).
const BAR_HALF_WIDTH: f64 = 0.3;

impl<'a> Widget for IndicatorChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Tick labels are drawn by the caller in terminal cells; here we only
            // draw the axes.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(0)
                .y_labels(0)
                .axis_style(&WHITE)
                .draw()?;

            match self.series {
                ChartSeries::Lines(lines) => {
                    for line in lines {
                        for segment in &line.segments {
                            chart.draw_series(LineSeries::new(segment.iter().copied(), &line.color))?;
                        }
                        // Single-point segments would be invisible as a line.
                        //
                        // Pixels instead of `Circle`: the backend maps circle radii
                        // to canvas units and produces huge circles.
                        chart.draw_series(
                            line.segments
                                .iter()
                                .flatten()
                                .map(|&(x, y)| Pixel::new((x, y), line.color)),
                        )?;
                    }
                }
                ChartSeries::Bars(bars) => {
                    let base = 0.0_f64.clamp(y0, y1);
                    chart.draw_series(bars.iter().map(|bar| {
                        Rectangle::new(
                            [(bar.x - BAR_HALF_WIDTH, base), (bar.x + BAR_HALF_WIDTH, bar.value)],
                            bar.color.filled(),
                        )
                    }))?;
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
