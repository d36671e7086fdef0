//! Per-indicator comparison records and tab state.
//!
//! Everything here is a pure function of the store and the run configuration,
//! so callers recompute on every redraw instead of caching results.

use rayon::prelude::*;
use serde::Serialize;

use crate::analytics::compare::ComparisonStrategy;
use crate::analytics::store::TimeSeriesStore;
use crate::domain::{
    Cadence, ComparisonResult, DashboardConfig, Diagnosis, Indicator, TAB_ORDER, YearWindow,
};

/// Comparison record for one indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSummary {
    pub indicator: Indicator,
    pub comparison: ComparisonResult,
}

/// A selectable indicator tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub indicator: Indicator,
    pub cadence: Cadence,
    /// Disabled tabs have nothing to draw and cannot be selected.
    pub enabled: bool,
    pub diagnosis: Diagnosis,
}

/// Quarterly window: the configured year, else the latest year with any data.
pub fn resolve_window(store: &TimeSeriesStore, config: &DashboardConfig) -> Option<YearWindow> {
    config
        .window_year
        .or_else(|| store.latest_year_overall())
        .map(YearWindow::new)
}

pub fn strategy_for(
    store: &TimeSeriesStore,
    indicator: &Indicator,
    config: &DashboardConfig,
) -> ComparisonStrategy {
    match config.cadence_of(indicator) {
        Cadence::Quarterly => ComparisonStrategy::Quarterly {
            window: resolve_window(store, config),
        },
        Cadence::Annual => ComparisonStrategy::Annual,
    }
}

/// Comparison record for the active indicator.
pub fn assemble(
    store: &TimeSeriesStore,
    indicator: &Indicator,
    config: &DashboardConfig,
) -> ComparisonResult {
    strategy_for(store, indicator, config).compare(store, indicator)
}

/// Comparison records for every indicator, in the given order.
pub fn assemble_all(
    store: &TimeSeriesStore,
    indicators: &[Indicator],
    config: &DashboardConfig,
) -> Vec<IndicatorSummary> {
    indicators
        .par_iter()
        .map(|indicator| IndicatorSummary {
            indicator: indicator.clone(),
            comparison: assemble(store, indicator, config),
        })
        .collect()
}

/// Tab order: the known tabs first (`VAT`, `PIT`, `CIT`), then any other
/// declared series in declaration order.
pub fn tab_order(series: &[Indicator]) -> Vec<Indicator> {
    let mut out: Vec<Indicator> = TAB_ORDER
        .iter()
        .map(|k| Indicator::new(*k))
        .filter(|k| series.contains(k))
        .collect();
    for indicator in series {
        if !out.contains(indicator) {
            out.push(indicator.clone());
        }
    }
    out
}

/// Build tab records, each colored by its own indicator's diagnosis.
pub fn build_tabs(
    store: &TimeSeriesStore,
    series: &[Indicator],
    config: &DashboardConfig,
) -> Vec<Tab> {
    let summaries = assemble_all(store, &tab_order(series), config);
    tabs_from_summaries(store, &summaries, config)
}

/// Tab records for already-assembled summaries (same order).
pub fn tabs_from_summaries(
    store: &TimeSeriesStore,
    summaries: &[IndicatorSummary],
    config: &DashboardConfig,
) -> Vec<Tab> {
    let window = resolve_window(store, config);
    summaries
        .iter()
        .map(|summary| {
            let cadence = config.cadence_of(&summary.indicator);
            let enabled = match cadence {
                Cadence::Quarterly => {
                    window.is_some_and(|w| store.has_data_in(&summary.indicator, &w.years()))
                }
                Cadence::Annual => store.latest_year(&summary.indicator).is_some(),
            };
            Tab {
                indicator: summary.indicator.clone(),
                cadence,
                enabled,
                diagnosis: summary.comparison.diagnosis,
            }
        })
        .collect()
}

/// Initially selected tab: the first enabled one, else the first one.
pub fn default_active(tabs: &[Tab]) -> Option<usize> {
    if tabs.is_empty() {
        return None;
    }
    Some(tabs.iter().position(|t| t.enabled).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataPoint, DataSource, Quarter};

    fn point(year: i32, quarter: Quarter, key: &str, value: f64) -> DataPoint {
        DataPoint {
            year,
            quarter,
            indicator: Indicator::new(key),
            value: Some(value),
        }
    }

    fn fixture() -> TimeSeriesStore {
        TimeSeriesStore::build(vec![
            point(2024, Quarter::Q3, "VAT", 100.0),
            point(2024, Quarter::Q4, "VAT", 130.0),
            point(2024, Quarter::Q4, "CIT", 200.0),
            point(2025, Quarter::Q2, "CIT", 50.0),
            point(2025, Quarter::Q1, "VAT", 135.0),
        ])
    }

    fn series() -> Vec<Indicator> {
        ["PIT", "VAT", "CIT"].into_iter().map(Indicator::new).collect()
    }

    #[test]
    fn dispatches_on_cadence() {
        let store = fixture();
        let config = DashboardConfig::new(DataSource::Stdin);

        let vat = assemble(&store, &Indicator::new("VAT"), &config);
        assert_eq!(vat.cadence, Cadence::Quarterly);
        assert_eq!(vat.prior_period, Some(130.0));
        assert_eq!(vat.current_period, Some(135.0));
        assert_eq!(vat.diagnosis, Diagnosis::Green);

        let cit = assemble(&store, &Indicator::new("CIT"), &config);
        assert_eq!(cit.cadence, Cadence::Annual);
        assert_eq!(cit.prior_period, Some(100.0));
        assert_eq!(cit.diagnosis, Diagnosis::Red);
    }

    #[test]
    fn assemble_is_idempotent() {
        let store = fixture();
        let config = DashboardConfig::new(DataSource::Stdin);
        let indicator = Indicator::new("CIT");
        let a = assemble(&store, &indicator, &config);
        let b = assemble(&store, &indicator, &config);
        assert_eq!(a, b);
        assert_eq!(
            a.delta.map(f64::to_bits),
            b.delta.map(f64::to_bits)
        );
    }

    #[test]
    fn configured_window_year_overrides_latest() {
        let store = fixture();
        let mut config = DashboardConfig::new(DataSource::Stdin);
        config.window_year = Some(2024);

        let vat = assemble(&store, &Indicator::new("VAT"), &config);
        assert_eq!(vat.prior_period, Some(100.0));
        assert_eq!(vat.current_period, Some(130.0));
    }

    #[test]
    fn assemble_all_preserves_order() {
        let store = fixture();
        let config = DashboardConfig::new(DataSource::Stdin);
        let all = assemble_all(&store, &series(), &config);
        let keys: Vec<&str> = all.iter().map(|s| s.indicator.as_str()).collect();
        assert_eq!(keys, vec!["PIT", "VAT", "CIT"]);
        assert_eq!(all[0].comparison, ComparisonResult::unavailable(Cadence::Quarterly));
    }

    #[test]
    fn tabs_follow_display_order_and_enablement() {
        let store = fixture();
        let config = DashboardConfig::new(DataSource::Stdin);
        let tabs = build_tabs(&store, &series(), &config);

        let keys: Vec<&str> = tabs.iter().map(|t| t.indicator.as_str()).collect();
        assert_eq!(keys, vec!["VAT", "PIT", "CIT"]);
        assert!(tabs[0].enabled);
        assert!(!tabs[1].enabled);
        assert!(tabs[2].enabled);
        assert_eq!(tabs[1].diagnosis, Diagnosis::Yellow);
        assert_eq!(tabs[2].diagnosis, Diagnosis::Red);
        assert_eq!(default_active(&tabs), Some(0));
    }

    #[test]
    fn tab_order_appends_unknown_series() {
        let series: Vec<Indicator> = ["FEE", "CIT"].into_iter().map(Indicator::new).collect();
        let keys: Vec<Indicator> = tab_order(&series);
        assert_eq!(keys, vec![Indicator::new("CIT"), Indicator::new("FEE")]);
    }

    #[test]
    fn default_active_falls_back_to_first_tab() {
        let store = TimeSeriesStore::build(Vec::new());
        let config = DashboardConfig::new(DataSource::Stdin);
        let tabs = build_tabs(&store, &series(), &config);
        assert!(tabs.iter().all(|t| !t.enabled));
        assert_eq!(default_active(&tabs), Some(0));
        assert_eq!(default_active(&[]), None);
    }
}
