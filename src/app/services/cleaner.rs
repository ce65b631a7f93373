//! Column normalization and semantic renaming.
//!
//! Transforms the raw frame into the canonical observation table in three
//! ordered steps: derive the `date` column, normalize every column
//! identifier, then apply the semantic rename mapping. The transformation is
//! pure (the caller's frame is never mutated) and never drops a row;
//! unparsable dates become missing values and are excluded only later, by
//! the aggregator.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

use crate::app::models::ObservationTable;
use crate::constants::{COLUMN_MAPPING, DATETIME_FORMATS, DATE_FORMATS, RAW_DATE_COLUMN, semantic};
use crate::error::{DashboardError, Result};

/// Clean a raw frame into the canonical observation table.
///
/// Step order matters: the raw `Date/Time` column must be located before
/// identifier normalization folds its `/` into `_`.
pub fn clean(raw: &DataFrame) -> Result<ObservationTable> {
    let mut frame = raw.clone();

    derive_date(&mut frame)?;
    normalize_columns(&mut frame)?;
    apply_semantic_mapping(&mut frame)?;

    debug!(
        rows = frame.height(),
        columns = frame.width(),
        "cleaned observation table"
    );
    Ok(ObservationTable::new(frame))
}

/// Derive the canonical `date` column from `Date/Time`, falling back to an
/// existing `date` column. Absent both, the table simply has no date
/// attribute and the time-based views are skipped downstream.
fn derive_date(frame: &mut DataFrame) -> Result<()> {
    let source = {
        let names = frame.get_column_names_str();
        if names.contains(&RAW_DATE_COLUMN) {
            Some(RAW_DATE_COLUMN)
        } else if names.contains(&semantic::DATE) {
            Some(semantic::DATE)
        } else {
            None
        }
    };
    let Some(source) = source else {
        debug!("no date source column, skipping date derivation");
        return Ok(());
    };

    let series = frame.column(source)?.as_materialized_series().clone();
    let parsed = parse_datetime_series(&series)?;
    frame.with_column(parsed)?;
    Ok(())
}

/// Parse a source column into a millisecond datetime series named `date`.
///
/// Parsing is lenient: values that match no known format become null rather
/// than failing the batch. Non-temporal, non-text sources yield an all-null
/// column.
fn parse_datetime_series(series: &Series) -> Result<Series> {
    let target = DataType::Datetime(TimeUnit::Milliseconds, None);
    let parsed = match series.dtype() {
        DataType::Datetime(_, _) | DataType::Date => series.cast(&target)?,
        DataType::String => {
            let values = series.str()?;
            let stamps = Int64Chunked::from_iter_options(
                semantic::DATE.into(),
                values
                    .into_iter()
                    .map(|value| value.and_then(parse_timestamp_millis)),
            );
            stamps
                .into_datetime(TimeUnit::Milliseconds, None)
                .into_series()
        }
        _ => {
            let stamps = Int64Chunked::from_iter_options(
                semantic::DATE.into(),
                std::iter::repeat(None).take(series.len()),
            );
            stamps
                .into_datetime(TimeUnit::Milliseconds, None)
                .into_series()
        }
    };
    Ok(parsed.with_name(semantic::DATE.into()))
}

/// Try each known timestamp format, then each date-only format at midnight
fn parse_timestamp_millis(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.and_utc().timestamp_millis());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }
    None
}

/// Trim surrounding whitespace and fold internal spaces and `/` to `_`
fn normalize_name(name: &str) -> String {
    name.trim().replace([' ', '/'], "_")
}

/// Normalize every column identifier, rejecting tables where two raw
/// headers fold to the same normalized name.
fn normalize_columns(frame: &mut DataFrame) -> Result<()> {
    let current: Vec<String> = frame
        .get_column_names_str()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(current.len());
    for name in &current {
        let folded = normalize_name(name);
        if !seen.insert(folded.clone()) {
            return Err(DashboardError::ColumnCollision { column: folded });
        }
        normalized.push(folded);
    }

    frame.set_column_names(normalized.iter().map(String::as_str))?;
    Ok(())
}

/// Apply the semantic rename mapping as a move.
///
/// When a mapped source collides with a pre-existing column of the semantic
/// name, the mapped source wins: the pre-existing column is dropped before
/// the rename so each logical field exists exactly once.
fn apply_semantic_mapping(frame: &mut DataFrame) -> Result<()> {
    for (source, target) in COLUMN_MAPPING {
        let (has_source, has_target) = {
            let names = frame.get_column_names_str();
            (names.contains(&source), names.contains(&target))
        };
        if !has_source {
            continue;
        }
        if has_target {
            debug!(column = target, "mapped source column overwrites pre-existing column");
            frame.drop_in_place(target)?;
        }
        frame.rename(source, target.into())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn renames_temp_c_to_temperature() {
        let raw = df!(
            "Temp_C" => &[10.0f64, 20.0],
            "Rel Hum_%" => &[80.0f64, 60.0],
        )
        .unwrap();

        let table = clean(&raw).unwrap();

        assert!(table.has_attribute("temperature"));
        assert!(table.has_attribute("humidity"));
        assert!(!table.has_attribute("Temp_C"));
        assert!(!table.has_attribute("Rel_Hum_%"));

        let temps: Vec<Option<f64>> = table
            .frame()
            .column("temperature")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(temps, vec![Some(10.0), Some(20.0)]);
    }

    #[test]
    fn derives_date_from_raw_date_time_column() {
        let raw = df!(
            "Date/Time" => &["2020-01-01 00:00:00", "2020-01-02 12:30:00"],
            "Temp_C" => &[1.0f64, 2.0],
        )
        .unwrap();

        let table = clean(&raw).unwrap();

        assert!(table.has_attribute("date"));
        // The raw source passes through under its normalized name.
        assert!(table.has_attribute("Date_Time"));
        let date = table.frame().column("date").unwrap();
        assert!(matches!(
            date.dtype(),
            DataType::Datetime(TimeUnit::Milliseconds, None)
        ));
        assert_eq!(date.as_materialized_series().null_count(), 0);
    }

    #[test]
    fn unparsable_dates_become_missing_not_errors() {
        let raw = df!(
            "Date/Time" => &["2020-01-01", "not-a-date", ""],
            "Temp_C" => &[1.0f64, 2.0, 3.0],
        )
        .unwrap();

        let table = clean(&raw).unwrap();

        // No row is dropped by cleaning; the bad values are just null.
        assert_eq!(table.height(), 3);
        assert_eq!(
            table
                .frame()
                .column("date")
                .unwrap()
                .as_materialized_series()
                .null_count(),
            2
        );
    }

    #[test]
    fn parses_date_only_and_alternate_formats() {
        assert!(parse_timestamp_millis("2020-01-01").is_some());
        assert!(parse_timestamp_millis("2020-01-01 10:30").is_some());
        assert!(parse_timestamp_millis("01/15/2020 10:30").is_some());
        assert!(parse_timestamp_millis("15th of March").is_none());
        assert_eq!(
            parse_timestamp_millis("2020-01-01"),
            parse_timestamp_millis("2020-01-01 00:00:00")
        );
    }

    #[test]
    fn falls_back_to_existing_date_column() {
        let raw = df!(
            "date" => &["2021-06-01", "bad"],
            "Temp_C" => &[5.0f64, 6.0],
        )
        .unwrap();

        let table = clean(&raw).unwrap();
        let date = table.frame().column("date").unwrap();
        assert!(matches!(date.dtype(), DataType::Datetime(_, _)));
        assert_eq!(date.as_materialized_series().null_count(), 1);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let raw = df!(
            "Date/Time" => &["2020-01-01 00:00:00", "2020-01-01 01:00:00"],
            "Temp_C" => &[10.0f64, 20.0],
            "Rel Hum_%" => &[80.0f64, 60.0],
            "Weather" => &["Fog", "Clear"],
        )
        .unwrap();

        let once = clean(&raw).unwrap();
        let twice = clean(once.frame()).unwrap();

        assert!(once.frame().equals_missing(twice.frame()));
    }

    #[test]
    fn normalization_collision_fails_loudly() {
        let raw = df!(
            "a b" => &[1i64],
            "a/b" => &[2i64],
        )
        .unwrap();

        let result = clean(&raw);
        assert!(matches!(
            result,
            Err(DashboardError::ColumnCollision { column }) if column == "a_b"
        ));
    }

    #[test]
    fn mapped_source_wins_over_preexisting_semantic_column() {
        let raw = df!(
            "temperature" => &[99.0f64, 98.0],
            "Temp_C" => &[10.0f64, 20.0],
        )
        .unwrap();

        let table = clean(&raw).unwrap();

        assert_eq!(table.width(), 1);
        let temps: Vec<Option<f64>> = table
            .frame()
            .column("temperature")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(temps, vec![Some(10.0), Some(20.0)]);
    }

    #[test]
    fn unmapped_columns_pass_through_normalized() {
        let raw = df!(
            " Station Name " => &["YVR", "YYZ"],
            "Temp_C" => &[1.0f64, 2.0],
        )
        .unwrap();

        let table = clean(&raw).unwrap();
        assert!(table.has_attribute("Station_Name"));
    }
}
