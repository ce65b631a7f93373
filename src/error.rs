//! Error handling for the dashboard data engine.
//!
//! Hard failures (no usable input file) stop the pipeline and surface as a
//! single user-visible message at the binary boundary. Per-value anomalies
//! (unparsable dates, empty groups, missing columns) are never errors; they
//! are represented as missing cells or absent keys by the components that
//! produce them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Invalid file search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("No usable dataset in {path}: {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    #[error("Expected exactly one CSV file in {path}, found {count}")]
    AmbiguousInput { path: PathBuf, count: usize },

    #[error("Column name collision after normalization: {column}")]
    ColumnCollision { column: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
