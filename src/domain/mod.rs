//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - timeline primitives (`Quarter`, `PeriodRef`, `YearWindow`)
//! - series identity and cadence (`Indicator`, `Cadence`)
//! - raw observations (`DataPoint`) and comparison outputs (`ComparisonResult`, `Diagnosis`)
//! - run configuration (`DashboardConfig`, `DataSource`)

pub mod types;

pub use types::*;
