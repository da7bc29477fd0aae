//! Input/output helpers.
//!
//! - light-curve ingest + validation (`ingest`)
//! - delimited bin-table export (`export`)
//! - result JSON read/write (`table`)

pub mod export;
pub mod ingest;
pub mod table;

pub use export::*;
pub use ingest::*;
pub use table::*;
