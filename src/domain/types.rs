//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the correlation pipeline
//! - exported to delimited/JSON outputs
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A single observation: time, measured value, and 1-sigma measurement error.
///
/// Immutable once loaded; the pipeline never rewrites observation data.
#[derive(Debug, Clone, Copy)]
pub struct ObsPoint {
    pub time: f64,
    pub value: f64,
    pub error: f64,
}

/// An observation series, ordered by time ascending.
///
/// Constructed once from validated rows and never mutated afterwards. The
/// constructor is the single place where ordering and finiteness are enforced,
/// so everything downstream can assume clean numeric input.
#[derive(Debug, Clone)]
pub struct LightCurve {
    name: String,
    points: Vec<ObsPoint>,
}

impl LightCurve {
    pub fn new(name: impl Into<String>, mut points: Vec<ObsPoint>) -> Result<Self, AppError> {
        let name = name.into();
        if points.is_empty() {
            return Err(AppError::new(3, format!("Light curve '{name}' has no observations.")));
        }
        for p in &points {
            if !(p.time.is_finite() && p.value.is_finite() && p.error.is_finite()) {
                return Err(AppError::new(
                    2,
                    format!("Light curve '{name}' contains a non-finite observation."),
                ));
            }
            if p.error < 0.0 {
                return Err(AppError::new(
                    2,
                    format!("Light curve '{name}' contains a negative measurement error."),
                ));
            }
        }
        // Stable sort: observation logs may contain duplicate timestamps and we
        // keep their file order in that case.
        points.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));
        Ok(Self { name, points })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[ObsPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One eligible index pair.
///
/// `lag` follows the fixed sign convention `time_B - time_A`. The pair caches
/// the point values and errors it references so the binning, estimation, and
/// Monte Carlo stages never re-touch the original series.
#[derive(Debug, Clone, Copy)]
pub struct LagPair {
    /// Index into series A.
    pub ia: usize,
    /// Index into series B (same series as A for autocorrelation).
    pub ib: usize,
    pub lag: f64,
    pub a_val: f64,
    pub a_err: f64,
    pub b_val: f64,
    pub b_err: f64,
}

/// An ordered group of pairs sharing a lag range, consumed once to produce a
/// [`BinResult`].
#[derive(Debug, Clone)]
pub struct Bin {
    pub pairs: Vec<LagPair>,
}

impl Bin {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// The terminal per-bin artifact.
///
/// `r_lo`/`r_hi` are absolute coefficient bounds and are `None` when Monte
/// Carlo error estimation is disabled or the bin's sample is degenerate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinResult {
    /// Unweighted mean lag of the bin's pairs.
    pub lag: f64,
    /// Sample standard deviation of the bin's lags (0 for a single pair).
    pub lag_spread: f64,
    /// Correlation coefficient, always in [-1, 1].
    pub r: f64,
    pub r_lo: Option<f64>,
    pub r_hi: Option<f64>,
    pub n_pairs: usize,
}

/// Core correlation configuration, built once from validated CLI arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZdcfConfig {
    /// Autocorrelation (series A against itself) vs cross-correlation.
    pub autocf: bool,
    /// Uniform lag-bin widths instead of equal-population bins.
    pub uniform_sampling: bool,
    /// Drop zero-lag pairs.
    pub omit_zero_lags: bool,
    /// Minimum pairs per bin.
    pub minpts: usize,
    /// Monte Carlo realizations per bin; 0 disables error estimation.
    pub num_mc: usize,
    /// Seed for the private Monte Carlo random stream.
    pub seed: u64,
}

impl ZdcfConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.minpts == 0 {
            return Err(AppError::new(2, "minpts must be a positive integer."));
        }
        Ok(())
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub lc1_path: PathBuf,
    /// Second light curve; `None` for autocorrelation.
    pub lc2_path: Option<PathBuf>,
    /// Input field separator.
    pub sep: char,

    pub output: Option<PathBuf>,
    pub export_json: Option<PathBuf>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub zdcf: ZdcfConfig,
}

/// Which correlation mode a run used (for reports and the JSON export).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMode {
    Autocorrelation,
    Crosscorrelation,
}

impl CorrelationMode {
    pub fn from_config(config: &ZdcfConfig) -> Self {
        if config.autocf {
            CorrelationMode::Autocorrelation
        } else {
            CorrelationMode::Crosscorrelation
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            CorrelationMode::Autocorrelation => "autocorrelation",
            CorrelationMode::Crosscorrelation => "cross-correlation",
        }
    }
}

/// A saved result file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcfFile {
    pub tool: String,
    pub mode: CorrelationMode,
    pub curve_a: String,
    pub curve_b: Option<String>,
    pub config: ZdcfConfig,
    pub n_pairs: usize,
    pub bins: Vec<BinResult>,
}
