//! Command-line parsing for the ZDCF estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the statistics code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "zdcf",
    version,
    about = "Z-transformed Discrete Correlation Function for unevenly sampled light curves"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Correlate light curves, print the summary/table, and optionally plot/export.
    Run(RunArgs),
    /// Print the bin table only (useful for scripting).
    Table(RunArgs),
    /// Plot a previously exported result JSON.
    Plot(PlotArgs),
}

/// Common options for running the estimator.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// First light curve file (time, value, error rows).
    pub lc1: PathBuf,

    /// Second light curve file (cross-correlation only).
    pub lc2: Option<PathBuf>,

    /// Autocorrelate the first curve with itself.
    #[arg(long)]
    pub autocf: bool,

    /// Use uniform lag-bin widths instead of equal-population bins.
    #[arg(long)]
    pub uniform: bool,

    /// Drop pairs with exactly zero lag.
    #[arg(long = "omit-zero-lags")]
    pub omit_zero_lags: bool,

    /// Minimum number of pairs per bin.
    #[arg(long, default_value_t = 11)]
    pub minpts: usize,

    /// Monte Carlo realizations per bin (0 disables error estimation).
    #[arg(long = "num-mc", default_value_t = 100)]
    pub num_mc: usize,

    /// Seed for the private Monte Carlo random stream.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Input field separator.
    #[arg(long, default_value_t = ',')]
    pub sep: char,

    /// Write the bin table to a delimited file.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Export the full result (config + bins) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for plotting a saved result.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Result JSON file produced by `zdcf run --export-json`.
    #[arg(long, value_name = "JSON")]
    pub table: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
