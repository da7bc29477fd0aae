//! Read/write result JSON files.
//!
//! The JSON result is the "portable" representation of a run:
//! - which curves were correlated and in which mode
//! - the full core configuration (including the seed)
//! - the ordered bin table
//!
//! The schema is defined by `domain::DcfFile`; `zdcf plot` reads it back.

use std::fs::File;
use std::path::Path;

use crate::domain::DcfFile;
use crate::error::AppError;

/// Write a result JSON file.
pub fn write_table_json(path: &Path, table: &DcfFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create result JSON '{}': {e}", path.display()),
        )
    })?;

    serde_json::to_writer_pretty(file, table)
        .map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;

    Ok(())
}

/// Read a result JSON file.
pub fn read_table_json(path: &Path) -> Result<DcfFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open result JSON '{}': {e}", path.display()),
        )
    })?;
    let table: DcfFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid result JSON: {e}")))?;
    Ok(table)
}
