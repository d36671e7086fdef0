//! Reporting utilities: number formatting, legends, and summary tables.

pub mod format;

pub use format::*;
