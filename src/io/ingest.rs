//! Light-curve ingest and validation.
//!
//! This module turns a headerless delimited observation file into a clean
//! [`LightCurve`] that is safe to correlate.
//!
//! Design goals:
//! - **Strict row shape** (time, value, error) with clear errors + exit code 2
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no correlation logic here

use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{LightCurve, ObsPoint};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the validated curve + per-row diagnostics.
#[derive(Debug, Clone)]
pub struct IngestedCurve {
    pub curve: LightCurve,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a light-curve file: one observation per row, `time<sep>value<sep>error`.
///
/// Rows that fail to parse, contain non-finite values, or carry a negative
/// error are recorded and skipped; the run only fails when no valid
/// observations remain.
pub fn read_light_curve(path: &Path, sep: char) -> Result<IngestedCurve, AppError> {
    if !sep.is_ascii() {
        return Err(AppError::new(2, "Separator must be a single ASCII character."));
    }

    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open light curve '{}': {e}", path.display()),
        )
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(sep as u8)
        .from_reader(file);

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Headerless input: records start at file line 1.
        let line = idx + 1;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("Parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record) {
            Ok(point) => points.push(point),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let rows_used = points.len();
    if rows_used == 0 {
        return Err(AppError::new(
            3,
            format!("No valid observations in '{}'.", path.display()),
        ));
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let curve = LightCurve::new(name, points)?;

    Ok(IngestedCurve {
        curve,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn parse_row(record: &StringRecord) -> Result<ObsPoint, String> {
    if record.len() < 3 {
        return Err(format!("Expected 3 fields (time, value, error), found {}.", record.len()));
    }

    let time = parse_field(record, 0, "time")?;
    let value = parse_field(record, 1, "value")?;
    let error = parse_field(record, 2, "error")?;

    if error < 0.0 {
        return Err("Negative measurement error.".to_string());
    }

    Ok(ObsPoint { time, value, error })
}

fn parse_field(record: &StringRecord, idx: usize, name: &str) -> Result<f64, String> {
    let raw = record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing `{name}` field."))?;
    let v = raw
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{name}` value '{raw}'."))?;
    if !v.is_finite() {
        return Err(format!("Non-finite `{name}` value '{raw}'."));
    }
    Ok(v)
}
