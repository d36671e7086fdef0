//! Dashboard analytics: the only part of the crate with business rules.
//!
//! Flow: loader rows → `store` → (`picker`, `chart`) → `compare` → `diagnosis`
//! → `summary`.

pub mod chart;
pub mod compare;
pub mod diagnosis;
pub mod picker;
pub mod store;
pub mod summary;

pub use compare::{ComparisonStrategy, compare_annual, compare_quarterly};
pub use diagnosis::classify;
pub use picker::{PickedQuarter, pick_latest, select_years};
pub use store::TimeSeriesStore;
pub use summary::{IndicatorSummary, Tab, assemble, assemble_all, build_tabs};
