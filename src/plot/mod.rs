//! Terminal plotting helpers (fixed-size text grids).

pub mod ascii;

pub use ascii::*;
