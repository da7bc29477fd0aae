//! Reporting utilities: run summary and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the statistics code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::RunOutput;
use crate::domain::{BinResult, CorrelationMode, RunConfig};
use crate::io::ingest::IngestedCurve;

/// Format the full run summary (inputs + config + pipeline counts).
pub fn format_run_summary(run: &RunOutput, config: &RunConfig) -> String {
    let mut out = String::new();
    let mode = CorrelationMode::from_config(&config.zdcf);

    out.push_str("=== zdcf - Z-transformed Discrete Correlation Function ===\n");
    out.push_str(&format!("Mode: {}\n", mode.display_name()));
    match &run.curve_b {
        Some(b) => out.push_str(&format!(
            "Curves: {} x {}\n",
            run.curve_a.curve.name(),
            b.curve.name()
        )),
        None => out.push_str(&format!("Curve: {}\n", run.curve_a.curve.name())),
    }

    out.push_str(&format_curve_line(&run.curve_a));
    if let Some(b) = &run.curve_b {
        out.push_str(&format_curve_line(b));
    }

    out.push_str(&format!(
        "Binning: {} | minpts={} | omit_zero_lags={}\n",
        if config.zdcf.uniform_sampling { "uniform-width" } else { "equal-population" },
        config.zdcf.minpts,
        config.zdcf.omit_zero_lags,
    ));
    if config.zdcf.num_mc > 0 {
        out.push_str(&format!(
            "Monte Carlo: {} realizations | seed={}\n",
            config.zdcf.num_mc, config.zdcf.seed
        ));
    } else {
        out.push_str("Monte Carlo: disabled (no error bounds)\n");
    }

    out.push_str(&format!(
        "Pairs: {} | Bins: {}\n",
        run.n_pairs,
        run.results.len()
    ));
    out.push('\n');

    out
}

fn format_curve_line(curve: &IngestedCurve) -> String {
    let pts = curve.curve.points();
    let t_min = pts.first().map(|p| p.time).unwrap_or(0.0);
    let t_max = pts.last().map(|p| p.time).unwrap_or(0.0);
    let mut line = format!(
        "- {}: n={} | t=[{:.3}, {:.3}]",
        curve.curve.name(),
        curve.rows_used,
        t_min,
        t_max
    );
    if !curve.row_errors.is_empty() {
        line.push_str(&format!(" | skipped rows: {}", curve.row_errors.len()));
    }
    line.push('\n');
    line
}

/// Format the ordered bin table.
pub fn format_bin_table(results: &[BinResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>12} {:>11} {:>9} {:>9} {:>9} {:>7}\n",
        "lag", "lag_spread", "r", "r_lo", "r_hi", "n"
    ));

    for r in results {
        out.push_str(&format!(
            "{:>12.4} {:>11.4} {:>9.4} {:>9} {:>9} {:>7}\n",
            r.lag,
            r.lag_spread,
            r.r,
            fmt_bound(r.r_lo),
            fmt_bound(r.r_hi),
            r.n_pairs
        ));
    }

    out
}

fn fmt_bound(bound: Option<f64>) -> String {
    match bound {
        Some(v) if v.is_finite() => format!("{v:.4}"),
        _ => "-".to_string(),
    }
}
