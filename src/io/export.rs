//! Export the bin table to a delimited file.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per bin, bounds left empty when error estimation was
//! disabled or a bin's Monte Carlo sample was degenerate.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::BinResult;
use crate::error::AppError;

/// Write the ordered bin table to a delimited file.
pub fn write_dcf_table(path: &Path, results: &[BinResult], sep: char) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create output file '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "{}", header_row(sep))
        .map_err(|e| AppError::new(2, format!("Failed to write output header: {e}")))?;

    for result in results {
        writeln!(file, "{}", format_row(result, sep))
            .map_err(|e| AppError::new(2, format!("Failed to write output row: {e}")))?;
    }

    Ok(())
}

fn header_row(sep: char) -> String {
    ["lag", "lag_spread", "r", "r_lo", "r_hi", "n_pairs"].join(&sep.to_string())
}

fn format_row(result: &BinResult, sep: char) -> String {
    format!(
        "{:.7}{sep}{:.7}{sep}{:.7}{sep}{}{sep}{}{sep}{}",
        result.lag,
        result.lag_spread,
        result.r,
        fmt_bound(result.r_lo),
        fmt_bound(result.r_hi),
        result.n_pairs,
    )
}

fn fmt_bound(bound: Option<f64>) -> String {
    match bound {
        Some(v) => format!("{v:.7}"),
        None => String::new(),
    }
}
