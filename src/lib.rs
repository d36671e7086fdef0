//! `tax-dash` library crate.
//!
//! The binary (`taxdash`) is a thin wrapper around this library so that:
//!
//! - the analytics are testable without spawning processes
//! - front-ends (CLI, TUI) share one pipeline
//! - code stays easy to navigate as the project grows

pub mod analytics;
pub mod app;
pub mod cli;
pub mod debug;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod tui;
