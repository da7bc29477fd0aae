//! Mathematical utilities: basic sample statistics and the Fisher z-transform.

pub mod stats;
pub mod ztransform;

pub use stats::*;
pub use ztransform::*;
