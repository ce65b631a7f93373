//! Data-quality reporting over the cleaned observation table.
//!
//! The report is a pure function of current table content: row and column
//! counts, per-column missing counts and percentages, duplicate-row count,
//! and the numeric/categorical type classification. No filtering is applied
//! and nothing is mutated.

use polars::prelude::*;
use tracing::debug;

use crate::app::models::{ObservationTable, QualityReport};
use crate::error::Result;

/// Compute the quality report for the whole table.
///
/// Tolerates zero-row tables (missing percentage is 0 by convention, not a
/// division error) and all-missing columns (percentage 100).
pub fn validate(table: &ObservationTable) -> Result<QualityReport> {
    let frame = table.frame();
    let total_rows = frame.height();
    let total_columns = frame.width();

    let mut report = QualityReport {
        total_rows,
        total_columns,
        duplicates: count_duplicate_rows(frame)?,
        numeric_columns: table.numeric_attributes(),
        categorical_columns: table.categorical_attributes(),
        ..Default::default()
    };

    for column in frame.get_columns() {
        let name = column.name().to_string();
        let missing = column.as_materialized_series().null_count();
        let percentage = if total_rows == 0 {
            0.0
        } else {
            missing as f64 / total_rows as f64 * 100.0
        };
        report.missing_values.insert(name.clone(), missing);
        report.missing_percentage.insert(name, percentage);
    }

    debug!(
        rows = report.total_rows,
        duplicates = report.duplicates,
        "computed quality report"
    );
    Ok(report)
}

/// Count rows that exactly duplicate an earlier row, by full-row equality.
///
/// Each group of identical rows contributes its size minus one, so two
/// identical rows count as a single duplicate.
fn count_duplicate_rows(frame: &DataFrame) -> Result<usize> {
    if frame.height() == 0 || frame.width() == 0 {
        return Ok(0);
    }
    let keys: Vec<Expr> = frame
        .get_column_names_str()
        .iter()
        .map(|name| col(*name))
        .collect();
    let distinct = frame
        .clone()
        .lazy()
        .group_by(keys)
        .agg([len().alias("group_rows")])
        .collect()?;
    Ok(frame.height() - distinct.height())
}
