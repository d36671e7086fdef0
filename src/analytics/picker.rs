//! Annual-indicator helpers: latest-quarter picking and axis year selection.

use serde::{Deserialize, Serialize};

use crate::analytics::store::TimeSeriesStore;
use crate::domain::{Indicator, MAX_AXIS_YEARS, Quarter};

/// The value that represents a year for an annual-cadence indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickedQuarter {
    pub value: f64,
    pub quarter: Quarter,
    /// `true` when the figure is a partial-year (not Q4) estimate.
    pub provisional: bool,
}

/// Latest reported quarter of `year`, scanning Q4 → Q1.
///
/// A year with only Q2 data yields a provisional Q2 figure; nothing is
/// interpolated for the missing quarters.
pub fn pick_latest(
    store: &TimeSeriesStore,
    year: i32,
    indicator: &Indicator,
) -> Option<PickedQuarter> {
    Quarter::LATEST_FIRST.into_iter().find_map(|quarter| {
        store.get(year, quarter, indicator).map(|value| PickedQuarter {
            value,
            quarter,
            provisional: !quarter.is_final(),
        })
    })
}

/// Up to the four most recent years with data, ascending.
pub fn select_years(store: &TimeSeriesStore, indicator: &Indicator) -> Vec<i32> {
    let years = store.years(indicator);
    let skip = years.len().saturating_sub(MAX_AXIS_YEARS);
    years[skip..].to_vec()
}
