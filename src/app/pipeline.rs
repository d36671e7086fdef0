//! Shared "dashboard pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load → store → window → per-indicator comparisons → tabs
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::analytics::summary::{assemble_all, default_active, resolve_window, tab_order, tabs_from_summaries};
use crate::analytics::{IndicatorSummary, Tab, TimeSeriesStore};
use crate::domain::{Cadence, DashboardConfig, DataSource, Indicator, YearWindow};
use crate::error::AppError;
use crate::io::ingest::{LoadedDataset, load_dataset};

/// All computed outputs of a single dashboard refresh.
#[derive(Debug, Clone)]
pub struct DashboardRun {
    pub source: DataSource,
    pub dataset: LoadedDataset,
    pub store: TimeSeriesStore,
    pub window: Option<YearWindow>,
    /// Tabs in display order.
    pub tabs: Vec<Tab>,
    /// One record per tab, same order as `tabs`.
    pub summaries: Vec<IndicatorSummary>,
}

impl DashboardRun {
    pub fn summary(&self, indicator: &Indicator) -> Option<&IndicatorSummary> {
        self.summaries.iter().find(|s| &s.indicator == indicator)
    }

    pub fn tab_index(&self, indicator: &Indicator) -> Option<usize> {
        self.tabs.iter().position(|t| &t.indicator == indicator)
    }

    pub fn default_tab(&self) -> Option<usize> {
        default_active(&self.tabs)
    }

    pub fn has_data(&self) -> bool {
        !self.store.is_empty()
    }
}

/// Load the configured dataset and compute every comparison.
pub fn run_dashboard(config: &DashboardConfig) -> Result<DashboardRun, AppError> {
    let dataset = load_dataset(&config.source)?;
    Ok(run_with_dataset(config, dataset))
}

/// Compute every comparison for an already-loaded dataset.
///
/// This is useful for the TUI where we want to recompute without re-reading.
pub fn run_with_dataset(config: &DashboardConfig, dataset: LoadedDataset) -> DashboardRun {
    let store = TimeSeriesStore::build(dataset.rows.iter().cloned());
    let window = resolve_window(&store, config);

    let order = tab_order(&dataset.meta.series);
    let summaries = assemble_all(&store, &order, config);
    let tabs = tabs_from_summaries(&store, &summaries, config);

    for s in &summaries {
        log::debug!(
            "{} ({:?}): prior={:?} current={:?} delta={:?} → {}",
            s.indicator,
            config.cadence_of(&s.indicator),
            s.comparison.prior_period,
            s.comparison.current_period,
            s.comparison.delta,
            s.comparison.diagnosis
        );
    }

    DashboardRun {
        source: config.source.clone(),
        dataset,
        store,
        window,
        tabs,
        summaries,
    }
}

/// Resolve a user-supplied indicator key against the run's tabs.
pub fn find_indicator(run: &DashboardRun, key: &str) -> Result<Indicator, AppError> {
    run.tabs
        .iter()
        .find(|t| t.indicator.as_str().eq_ignore_ascii_case(key))
        .map(|t| t.indicator.clone())
        .ok_or_else(|| {
            let known: Vec<&str> = run.tabs.iter().map(|t| t.indicator.as_str()).collect();
            AppError::new(2, format!("Unknown indicator '{key}'. Known: {}", known.join(", ")))
        })
}

/// The active indicator: the requested one, else the default tab.
pub fn active_indicator(run: &DashboardRun, requested: Option<&str>) -> Result<Indicator, AppError> {
    if let Some(key) = requested {
        return find_indicator(run, key);
    }
    run.default_tab()
        .and_then(|i| run.tabs.get(i))
        .map(|t| t.indicator.clone())
        .ok_or_else(|| AppError::new(3, "Dataset declares no series."))
}

/// Cadence of a tab's indicator.
pub fn cadence_of(run: &DashboardRun, indicator: &Indicator) -> Cadence {
    run.tabs
        .iter()
        .find(|t| &t.indicator == indicator)
        .map(|t| t.cadence)
        .unwrap_or(Cadence::Quarterly)
}
