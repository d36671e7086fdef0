//! Input/output helpers.
//!
//! - JSON dataset ingest + validation (`ingest`)
//! - comparison exports (JSON/CSV) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
