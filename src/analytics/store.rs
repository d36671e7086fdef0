//! Sparse `(year, quarter, indicator) → value` lookup.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::domain::{DataPoint, Indicator, PeriodRef, Quarter};

/// Immutable store of reported values.
///
/// Only reported points have keys; "not yet reported" is the absence of a key,
/// never a stored `0.0` or `NaN`.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesStore {
    series: HashMap<Indicator, BTreeMap<PeriodRef, f64>>,
}

impl TimeSeriesStore {
    /// Build the store from loader rows, dropping rows without a value.
    ///
    /// A later row for an already-seen key replaces the earlier one.
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = DataPoint>,
    {
        let mut series: HashMap<Indicator, BTreeMap<PeriodRef, f64>> = HashMap::new();
        for row in rows {
            let Some(value) = row.value else {
                continue;
            };
            let at = PeriodRef {
                year: row.year,
                quarter: row.quarter,
            };
            let previous = series.entry(row.indicator.clone()).or_default().insert(at, value);
            if previous.is_some() {
                log::warn!("duplicate value for {} {at}; keeping the later row", row.indicator);
            }
        }
        Self { series }
    }

    pub fn get(&self, year: i32, quarter: Quarter, indicator: &Indicator) -> Option<f64> {
        self.series
            .get(indicator)
            .and_then(|points| points.get(&PeriodRef { year, quarter }))
            .copied()
    }

    /// Ascending unique years with at least one reported quarter.
    pub fn years(&self, indicator: &Indicator) -> Vec<i32> {
        let Some(points) = self.series.get(indicator) else {
            return Vec::new();
        };
        let years: BTreeSet<i32> = points.keys().map(|at| at.year).collect();
        years.into_iter().collect()
    }

    pub fn latest_year(&self, indicator: &Indicator) -> Option<i32> {
        self.series
            .get(indicator)
            .and_then(|points| points.keys().next_back())
            .map(|at| at.year)
    }

    /// Latest year with data for any indicator.
    pub fn latest_year_overall(&self) -> Option<i32> {
        self.series
            .values()
            .filter_map(|points| points.keys().next_back())
            .map(|at| at.year)
            .max()
    }

    /// Indicators with at least one reported value, sorted by key.
    pub fn indicators(&self) -> Vec<Indicator> {
        let mut out: Vec<Indicator> = self
            .series
            .iter()
            .filter(|(_, points)| !points.is_empty())
            .map(|(indicator, _)| indicator.clone())
            .collect();
        out.sort();
        out
    }

    /// Reported points for an indicator in chronological order.
    pub fn points(&self, indicator: &Indicator) -> Vec<(PeriodRef, f64)> {
        self.series
            .get(indicator)
            .map(|points| points.iter().map(|(at, v)| (*at, *v)).collect())
            .unwrap_or_default()
    }

    /// Whether any of `years` has a reported value for `indicator`.
    pub fn has_data_in(&self, indicator: &Indicator, years: &[i32]) -> bool {
        self.series
            .get(indicator)
            .is_some_and(|points| points.keys().any(|at| years.contains(&at.year)))
    }

    /// Total number of stored values across all indicators.
    pub fn len(&self) -> usize {
        self.series.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, quarter: Quarter, key: &str, value: Option<f64>) -> DataPoint {
        DataPoint {
            year,
            quarter,
            indicator: Indicator::new(key),
            value,
        }
    }

    #[test]
    fn absent_values_are_not_stored_but_zero_is() {
        let store = TimeSeriesStore::build(vec![
            row(2024, Quarter::Q1, "VAT", Some(0.0)),
            row(2024, Quarter::Q2, "VAT", None),
        ]);
        let vat = Indicator::new("VAT");
        assert_eq!(store.get(2024, Quarter::Q1, &vat), Some(0.0));
        assert_eq!(store.get(2024, Quarter::Q2, &vat), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn empty_store_answers_absent() {
        let store = TimeSeriesStore::build(Vec::new());
        let pit = Indicator::new("PIT");
        assert!(store.is_empty());
        assert_eq!(store.get(2025, Quarter::Q4, &pit), None);
        assert!(store.years(&pit).is_empty());
        assert_eq!(store.latest_year(&pit), None);
        assert_eq!(store.latest_year_overall(), None);
    }

    #[test]
    fn years_are_ascending_and_unique() {
        let store = TimeSeriesStore::build(vec![
            row(2023, Quarter::Q4, "CIT", Some(5.0)),
            row(2021, Quarter::Q1, "CIT", Some(1.0)),
            row(2021, Quarter::Q3, "CIT", Some(2.0)),
            row(2022, Quarter::Q2, "VAT", Some(9.0)),
        ]);
        assert_eq!(store.years(&Indicator::new("CIT")), vec![2021, 2023]);
        assert_eq!(store.latest_year(&Indicator::new("VAT")), Some(2022));
        assert_eq!(store.latest_year_overall(), Some(2023));
        assert_eq!(
            store.indicators(),
            vec![Indicator::new("CIT"), Indicator::new("VAT")]
        );
    }

    #[test]
    fn later_duplicate_wins() {
        let store = TimeSeriesStore::build(vec![
            row(2024, Quarter::Q1, "PIT", Some(1.0)),
            row(2024, Quarter::Q1, "PIT", Some(2.0)),
        ]);
        assert_eq!(store.get(2024, Quarter::Q1, &Indicator::new("PIT")), Some(2.0));
        assert_eq!(store.len(), 1);
    }
}
