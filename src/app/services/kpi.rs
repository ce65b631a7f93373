//! KPI computation over a row-filtered view of the observation table.
//!
//! Statistics are always recomputed from the filtered frame, never from
//! cached unfiltered results; a filter matching zero rows is not an error,
//! it just leaves the mean/extrema keys absent.

use polars::prelude::*;
use tracing::debug;

use crate::app::models::{DateRange, KpiSet, ObservationTable};
use crate::constants::{kpi, semantic};
use crate::error::Result;

/// Compute the KPI set, optionally restricted to an inclusive date range.
///
/// The filter applies only when the table has a `date` attribute; rows with
/// a missing date fail the comparison and are excluded. Metrics whose
/// source column is absent, or empty after filtering, are omitted from the
/// result rather than zero-filled.
pub fn compute_kpis(table: &ObservationTable, filter: Option<&DateRange>) -> Result<KpiSet> {
    let frame = match filter {
        Some(range) if table.has_attribute(semantic::DATE) => table
            .frame()
            .clone()
            .lazy()
            .filter(
                col(semantic::DATE)
                    .gt_eq(lit(range.start))
                    .and(col(semantic::DATE).lt_eq(lit(range.end))),
            )
            .collect()?,
        _ => table.frame().clone(),
    };

    let mut kpis = KpiSet::new(frame.height());

    kpis.insert_opt(kpi::AVG_TEMPERATURE, column_mean(&frame, semantic::TEMPERATURE));
    kpis.insert_opt(kpi::MAX_TEMPERATURE, column_max(&frame, semantic::TEMPERATURE));
    kpis.insert_opt(kpi::MIN_TEMPERATURE, column_min(&frame, semantic::TEMPERATURE));
    kpis.insert_opt(kpi::AVG_HUMIDITY, column_mean(&frame, semantic::HUMIDITY));
    kpis.insert_opt(kpi::AVG_PRESSURE, column_mean(&frame, semantic::PRESSURE));
    kpis.insert_opt(kpi::AVG_WIND_SPEED, column_mean(&frame, semantic::WIND_SPEED));
    kpis.insert_opt(kpi::MAX_WIND_SPEED, column_max(&frame, semantic::WIND_SPEED));

    debug!(
        total_records = kpis.total_records,
        metrics = kpis.metrics().len(),
        "computed KPI set"
    );
    Ok(kpis)
}

fn column_mean(frame: &DataFrame, name: &str) -> Option<f64> {
    frame
        .column(name)
        .ok()
        .and_then(|column| column.as_materialized_series().mean())
}

fn column_max(frame: &DataFrame, name: &str) -> Option<f64> {
    frame
        .column(name)
        .ok()
        .and_then(|column| column.as_materialized_series().max::<f64>().ok().flatten())
}

fn column_min(frame: &DataFrame, name: &str) -> Option<f64> {
    frame
        .column(name)
        .ok()
        .and_then(|column| column.as_materialized_series().min::<f64>().ok().flatten())
}
