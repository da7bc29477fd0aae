//! Reporting utilities: run summary and bin-table formatting.

pub mod format;

pub use format::*;
