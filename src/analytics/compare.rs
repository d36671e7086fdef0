//! Period comparison strategies.
//!
//! Quarterly indicators compare their two most recent reported quarters as-is.
//! Annual indicators compare the current year against the previous one, each
//! represented by its latest reported quarter; when the two figures cover a
//! different share of the year they are rescaled to equal coverage first.
//!
//! The annual rescaling assumes a flat run-rate through the year. It is not a
//! seasonal adjustment.

use crate::analytics::diagnosis::{classify, relative_change_pct};
use crate::analytics::picker::pick_latest;
use crate::analytics::store::TimeSeriesStore;
use crate::domain::{Cadence, ComparisonResult, Indicator, PeriodRef, Quarter, YearWindow};

/// How an indicator's two comparison periods are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonStrategy {
    /// Last two reported quarters inside the window.
    Quarterly { window: Option<YearWindow> },
    /// Current year vs previous year with provisional normalization.
    Annual,
}

impl ComparisonStrategy {
    pub fn cadence(self) -> Cadence {
        match self {
            ComparisonStrategy::Quarterly { .. } => Cadence::Quarterly,
            ComparisonStrategy::Annual => Cadence::Annual,
        }
    }

    pub fn compare(self, store: &TimeSeriesStore, indicator: &Indicator) -> ComparisonResult {
        match self {
            ComparisonStrategy::Quarterly { window: Some(window) } => {
                compare_quarterly(store, indicator, window)
            }
            ComparisonStrategy::Quarterly { window: None } => {
                ComparisonResult::unavailable(Cadence::Quarterly)
            }
            ComparisonStrategy::Annual => compare_annual(store, indicator),
        }
    }
}

/// Compare the two chronologically last reported quarters in `window`.
pub fn compare_quarterly(
    store: &TimeSeriesStore,
    indicator: &Indicator,
    window: YearWindow,
) -> ComparisonResult {
    let reported: Vec<(PeriodRef, f64)> = window
        .timeline()
        .filter_map(|at| store.get(at.year, at.quarter, indicator).map(|v| (at, v)))
        .collect();

    let current = reported.last().copied();
    let prior = reported.len().checked_sub(2).map(|i| reported[i]);

    let prior_period = prior.map(|(_, v)| v);
    let current_period = current.map(|(_, v)| v);

    ComparisonResult {
        cadence: Cadence::Quarterly,
        prior_period,
        current_period,
        delta: delta(prior_period, current_period),
        relative_change_pct: relative_change_pct(prior_period, current_period),
        diagnosis: classify(prior_period, current_period),
        prior_at: prior.map(|(at, _)| at),
        current_at: current.map(|(at, _)| at),
        current_provisional_quarter: None,
    }
}

/// Compare the indicator's latest year against the year before it.
pub fn compare_annual(store: &TimeSeriesStore, indicator: &Indicator) -> ComparisonResult {
    let Some(current_year) = store.latest_year(indicator) else {
        return ComparisonResult::unavailable(Cadence::Annual);
    };
    let current = pick_latest(store, current_year, indicator);
    // No year precedes `i32::MIN`; treat the prior as unreported.
    let prior_year = current_year.checked_sub(1);
    let prior = prior_year.and_then(|year| pick_latest(store, year, indicator));

    let current_at = current.map(|p| PeriodRef {
        year: current_year,
        quarter: p.quarter,
    });
    let prior_at = prior_year.zip(prior).map(|(year, p)| PeriodRef {
        year,
        quarter: p.quarter,
    });
    let current_provisional_quarter = current.filter(|p| p.provisional).map(|p| p.quarter);

    let (prior_period, current_period) = match (prior, current) {
        (Some(prior), Some(current)) => {
            let (adj_prior, adj_current) =
                normalize_progress(prior.value, prior.quarter, current.value, current.quarter);
            (Some(adj_prior), Some(adj_current))
        }
        (prior, current) => (prior.map(|p| p.value), current.map(|p| p.value)),
    };

    ComparisonResult {
        cadence: Cadence::Annual,
        prior_period,
        current_period,
        delta: delta(prior_period, current_period),
        relative_change_pct: relative_change_pct(prior_period, current_period),
        diagnosis: classify(prior_period, current_period),
        prior_at,
        current_at,
        current_provisional_quarter,
    }
}

/// Rescale two year-to-date figures to the same share of the year.
///
/// Returns `(adjusted_prior, adjusted_current)`.
pub fn normalize_progress(
    prior_value: f64,
    prior_quarter: Quarter,
    current_value: f64,
    current_quarter: Quarter,
) -> (f64, f64) {
    let cur_idx = f64::from(current_quarter.index());
    let prior_idx = f64::from(prior_quarter.index());

    match (current_quarter.is_final(), prior_quarter.is_final()) {
        // Current is year-to-date, prior is a full year.
        (false, true) => (prior_value * current_quarter.progress_fraction(), current_value),
        // Current is a full year, prior stopped early.
        (true, false) => (prior_value, current_value * prior_quarter.progress_fraction()),
        // Both partial: bring the more complete one down to the less complete one.
        (false, false) => {
            let f = cur_idx.min(prior_idx);
            let adj_current = if cur_idx > f {
                current_value * (f / cur_idx)
            } else {
                current_value
            };
            let adj_prior = if prior_idx > f {
                prior_value * (f / prior_idx)
            } else {
                prior_value
            };
            (adj_prior, adj_current)
        }
        (true, true) => (prior_value, current_value),
    }
}

fn delta(prior: Option<f64>, current: Option<f64>) -> Option<f64> {
    Some(current? - prior?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataPoint, Diagnosis};

    fn point(year: i32, quarter: Quarter, key: &str, value: f64) -> DataPoint {
        DataPoint {
            year,
            quarter,
            indicator: Indicator::new(key),
            value: Some(value),
        }
    }

    #[test]
    fn quarterly_takes_last_two_reported_points() {
        let store = TimeSeriesStore::build(vec![
            point(2024, Quarter::Q1, "VAT", 100.0),
            point(2024, Quarter::Q4, "VAT", 120.0),
            point(2025, Quarter::Q2, "VAT", 126.0),
            // Outside the window.
            point(2026, Quarter::Q1, "VAT", 1.0),
        ]);
        let r = compare_quarterly(&store, &Indicator::new("VAT"), YearWindow::new(2025));

        assert_eq!(r.prior_period, Some(120.0));
        assert_eq!(r.current_period, Some(126.0));
        assert_eq!(r.delta, Some(6.0));
        assert_eq!(r.diagnosis, Diagnosis::Green);
        assert_eq!(r.prior_at, Some(PeriodRef { year: 2024, quarter: Quarter::Q4 }));
        assert_eq!(r.current_at, Some(PeriodRef { year: 2025, quarter: Quarter::Q2 }));
        assert_eq!(r.current_provisional_quarter, None);
    }

    #[test]
    fn quarterly_with_single_point_is_yellow() {
        let store = TimeSeriesStore::build(vec![point(2025, Quarter::Q1, "PIT", 50.0)]);
        let r = compare_quarterly(&store, &Indicator::new("PIT"), YearWindow::new(2025));

        assert_eq!(r.prior_period, None);
        assert_eq!(r.current_period, Some(50.0));
        assert_eq!(r.delta, None);
        assert_eq!(r.relative_change_pct, None);
        assert_eq!(r.diagnosis, Diagnosis::Yellow);
    }

    #[test]
    fn quarterly_without_window_is_unavailable() {
        let store = TimeSeriesStore::build(Vec::new());
        let r = ComparisonStrategy::Quarterly { window: None }
            .compare(&store, &Indicator::new("PIT"));
        assert_eq!(r, ComparisonResult::unavailable(Cadence::Quarterly));
    }

    #[test]
    fn annual_provisional_current_scales_prior() {
        let store = TimeSeriesStore::build(vec![
            point(2024, Quarter::Q4, "CIT", 200.0),
            point(2025, Quarter::Q1, "CIT", 20.0),
            point(2025, Quarter::Q2, "CIT", 50.0),
        ]);
        let r = compare_annual(&store, &Indicator::new("CIT"));

        assert_eq!(r.prior_period, Some(100.0));
        assert_eq!(r.current_period, Some(50.0));
        assert_eq!(r.delta, Some(-50.0));
        assert_eq!(r.relative_change_pct, Some(-50.0));
        assert_eq!(r.diagnosis, Diagnosis::Red);
        assert_eq!(r.current_provisional_quarter, Some(Quarter::Q2));
        assert_eq!(r.current_at, Some(PeriodRef { year: 2025, quarter: Quarter::Q2 }));
    }

    #[test]
    fn annual_both_final_is_unscaled() {
        let store = TimeSeriesStore::build(vec![
            point(2024, Quarter::Q4, "CIT", 100.0),
            point(2025, Quarter::Q4, "CIT", 110.0),
        ]);
        let r = compare_annual(&store, &Indicator::new("CIT"));

        assert_eq!(r.prior_period, Some(100.0));
        assert_eq!(r.current_period, Some(110.0));
        assert_eq!(r.delta, Some(10.0));
        assert_eq!(r.diagnosis, Diagnosis::Yellow);
        assert_eq!(r.current_provisional_quarter, None);
    }

    #[test]
    fn annual_final_current_scales_down_to_provisional_prior() {
        let (prior, current) = normalize_progress(90.0, Quarter::Q3, 200.0, Quarter::Q4);
        assert_eq!(prior, 90.0);
        assert_eq!(current, 150.0);
    }

    #[test]
    fn annual_both_provisional_harmonize_to_lesser_progress() {
        let (prior, current) = normalize_progress(40.0, Quarter::Q1, 90.0, Quarter::Q3);
        assert_eq!(prior, 40.0);
        assert!((current - 30.0).abs() < 1e-12);

        let (prior, current) = normalize_progress(60.0, Quarter::Q2, 25.0, Quarter::Q1);
        assert_eq!(prior, 30.0);
        assert_eq!(current, 25.0);
    }

    #[test]
    fn annual_missing_previous_year_keeps_current_only() {
        let store = TimeSeriesStore::build(vec![
            point(2022, Quarter::Q4, "CIT", 70.0),
            point(2024, Quarter::Q2, "CIT", 40.0),
        ]);
        let r = compare_annual(&store, &Indicator::new("CIT"));

        assert_eq!(r.prior_period, None);
        assert_eq!(r.current_period, Some(40.0));
        assert_eq!(r.delta, None);
        assert_eq!(r.diagnosis, Diagnosis::Yellow);
        assert_eq!(r.current_provisional_quarter, Some(Quarter::Q2));
    }

    #[test]
    fn annual_zero_baseline_is_yellow() {
        let store = TimeSeriesStore::build(vec![
            point(2024, Quarter::Q4, "CIT", 0.0),
            point(2025, Quarter::Q4, "CIT", 10.0),
        ]);
        let r = compare_annual(&store, &Indicator::new("CIT"));

        assert_eq!(r.delta, Some(10.0));
        assert_eq!(r.relative_change_pct, None);
        assert_eq!(r.diagnosis, Diagnosis::Yellow);
    }

    #[test]
    fn earliest_representable_year_has_no_prior() {
        let store = TimeSeriesStore::build(vec![point(i32::MIN, Quarter::Q4, "CIT", 10.0)]);
        let r = compare_annual(&store, &Indicator::new("CIT"));
        assert_eq!(r.prior_period, None);
        assert_eq!(r.prior_at, None);
        assert_eq!(r.current_period, Some(10.0));
        assert_eq!(r.diagnosis, Diagnosis::Yellow);

        let r = compare_quarterly(&store, &Indicator::new("CIT"), YearWindow::new(i32::MIN));
        assert_eq!(r.current_period, Some(10.0));
        assert_eq!(r.prior_period, None);
    }

    #[test]
    fn annual_without_data_is_unavailable() {
        let store = TimeSeriesStore::build(Vec::new());
        assert_eq!(
            compare_annual(&store, &Indicator::new("CIT")),
            ComparisonResult::unavailable(Cadence::Annual)
        );
    }
}
