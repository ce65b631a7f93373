//! Multi-granularity aggregation over the observation table.
//!
//! Builds up to four derived views, each averaging every numeric attribute
//! within its groups: a daily time series, monthly and yearly rollups, and a
//! per-weather-category rollup. Rows with a missing `date` are excluded
//! here, and only here, for the time-based views; the weather rollup keeps
//! them. A view whose precondition is unmet is simply absent from the
//! result, never an error.

use polars::prelude::*;
use tracing::debug;

use crate::app::models::{AggregateViews, ObservationTable};
use crate::constants::{semantic, view};
use crate::error::Result;

/// Build the aggregate views for the given table.
///
/// Group means ignore missing values; a group with no valid value for an
/// attribute yields a missing cell for that attribute, not zero.
pub fn aggregate(table: &ObservationTable) -> Result<AggregateViews> {
    let mut views = AggregateViews::default();

    let numeric = table.numeric_attributes();
    if numeric.is_empty() {
        debug!("no numeric attributes, skipping all aggregate views");
        return Ok(views);
    }
    let mean_exprs: Vec<Expr> = numeric.iter().map(|name| col(name.as_str()).mean()).collect();

    if table.has_attribute(semantic::DATE) {
        let dated = table
            .frame()
            .clone()
            .lazy()
            .filter(col(semantic::DATE).is_not_null())
            .collect()?;

        if dated.height() == 0 {
            debug!("no date-valid rows, skipping time-based views");
        } else {
            views.timeseries = Some(
                dated
                    .clone()
                    .lazy()
                    .group_by([col(semantic::DATE)
                        .cast(DataType::Date)
                        .alias(semantic::DATE)])
                    .agg(mean_exprs.clone())
                    .sort([semantic::DATE], Default::default())
                    .collect()?,
            );
            views.monthly = Some(
                dated
                    .clone()
                    .lazy()
                    .group_by([col(semantic::DATE)
                        .dt()
                        .to_string(view::YEAR_MONTH_FORMAT)
                        .alias(view::YEAR_MONTH)])
                    .agg(mean_exprs.clone())
                    .sort([view::YEAR_MONTH], Default::default())
                    .collect()?,
            );
            views.yearly = Some(
                dated
                    .lazy()
                    .group_by([col(semantic::DATE).dt().year().alias(view::YEAR)])
                    .agg(mean_exprs.clone())
                    .sort([view::YEAR], Default::default())
                    .collect()?,
            );
        }
    } else {
        debug!("no date attribute, skipping time-based views");
    }

    if table.has_attribute(semantic::WEATHER) {
        views.by_weather = Some(
            table
                .frame()
                .clone()
                .lazy()
                .filter(col(semantic::WEATHER).is_not_null())
                .group_by([col(semantic::WEATHER)])
                .agg(mean_exprs)
                .sort([semantic::WEATHER], Default::default())
                .collect()?,
        );
    }

    debug!(views = ?views.present(), "built aggregate views");
    Ok(views)
}
