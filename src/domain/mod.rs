//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observation inputs (`ObsPoint`, `LightCurve`)
//! - intermediate pair/bin structures (`LagPair`, `Bin`)
//! - run configuration (`ZdcfConfig`, `RunConfig`)
//! - terminal outputs (`BinResult`, `DcfFile`)

pub mod types;

pub use types::*;
