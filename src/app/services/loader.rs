//! Raw dataset discovery and loading.
//!
//! The engine consumes exactly one CSV file from the configured data
//! directory. Multiple candidate files fail loudly rather than silently
//! picking whichever the filesystem lists first; zero candidates, or a file
//! polars cannot parse at all, surface as an unavailable dataset.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::{INFER_SCHEMA_ROWS, INPUT_FILE_PATTERN};
use crate::error::{DashboardError, Result};

/// Locate the single input CSV in the data directory.
///
/// Matches are sorted before counting so the error for an ambiguous
/// directory is deterministic.
pub fn find_input_file(data_dir: &Path) -> Result<PathBuf> {
    let pattern = data_dir.join(INPUT_FILE_PATTERN);
    let pattern = pattern.to_string_lossy();
    debug!(pattern = %pattern, "searching for input file");

    let mut matches: Vec<PathBuf> = glob::glob(&pattern)?
        .filter_map(|entry| entry.ok())
        .collect();
    matches.sort();

    match matches.len() {
        0 => Err(DashboardError::DataUnavailable {
            path: data_dir.to_path_buf(),
            reason: "no CSV files found".to_string(),
        }),
        1 => Ok(matches.remove(0)),
        count => Err(DashboardError::AmbiguousInput {
            path: data_dir.to_path_buf(),
            count,
        }),
    }
}

/// Read the raw table eagerly, leaving all type coercion to the cleaner.
///
/// Timestamp columns stay as text here; the cleaner owns lenient date
/// parsing so a malformed cell never aborts the load.
pub fn load_raw(path: &Path) -> Result<DataFrame> {
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|error| unreadable(path, &error))?
        .finish()
        .map_err(|error| unreadable(path, &error))?;

    info!(
        rows = frame.height(),
        columns = frame.width(),
        path = %path.display(),
        "loaded raw dataset"
    );
    Ok(frame)
}

fn unreadable(path: &Path, error: &PolarsError) -> DashboardError {
    DashboardError::DataUnavailable {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}
