//! Chart-ready series derived from the store.
//!
//! The front-ends (ASCII plot, TUI) draw from these records and never touch
//! the store directly.

use serde::Serialize;

use crate::analytics::picker::{pick_latest, select_years};
use crate::analytics::store::TimeSeriesStore;
use crate::domain::{Indicator, Quarter, YearWindow};

/// One year's line for a quarterly indicator (`Q1..Q4`, gaps stay `None`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearLine {
    pub year: i32,
    pub values: [Option<f64>; 4],
    /// `true` for the window's current year.
    pub is_current: bool,
}

/// One bar of the annual chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualBar {
    pub year: i32,
    pub value: f64,
    pub quarter: Quarter,
    pub provisional: bool,
    /// `true` for the latest axis year.
    pub is_current: bool,
}

/// Lines for the window years, current year first.
pub fn quarterly_lines(
    store: &TimeSeriesStore,
    indicator: &Indicator,
    window: YearWindow,
) -> Vec<YearLine> {
    let mut years = window.years();
    years.reverse();
    years
        .into_iter()
        .map(|year| YearLine {
            year,
            values: Quarter::ALL.map(|q| store.get(year, q, indicator)),
            is_current: year == window.current,
        })
        .collect()
}

/// Bars for the axis years that have a picked value, ascending by year.
pub fn annual_bars(store: &TimeSeriesStore, indicator: &Indicator) -> Vec<AnnualBar> {
    let axis_years = select_years(store, indicator);
    let latest = axis_years.last().copied();
    axis_years
        .into_iter()
        .filter_map(|year| {
            pick_latest(store, year, indicator).map(|picked| AnnualBar {
                year,
                value: picked.value,
                quarter: picked.quarter,
                provisional: picked.provisional,
                is_current: Some(year) == latest,
            })
        })
        .collect()
}

/// Value range `(min, max)` across all reported values in the lines.
pub fn line_extent(lines: &[YearLine]) -> Option<(f64, f64)> {
    extent(lines.iter().flat_map(|l| l.values.iter().flatten().copied()))
}

/// Value range `(min, max)` across all bars.
pub fn bar_extent(bars: &[AnnualBar]) -> Option<(f64, f64)> {
    extent(bars.iter().map(|b| b.value))
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
