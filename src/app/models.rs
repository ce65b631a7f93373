//! Core data structures for the dashboard data engine.
//!
//! The [`ObservationTable`] is the single shared source of truth, produced
//! once by the cleaner and held immutable for the session. Everything else
//! here ([`QualityReport`], [`AggregateViews`], [`KpiSet`]) is a pure
//! read-only projection with no back-references and no independent
//! lifecycle.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::view;

/// Static attribution record for the loaded dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Human-readable dataset name
    pub name: String,
    /// Source URL for attribution display
    pub url: String,
}

/// The cleaned, semantically renamed observation table.
///
/// Wraps the underlying frame behind schema-capability queries so optional
/// attributes are an explicit concept rather than ad hoc column probing.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    frame: DataFrame,
}

impl ObservationTable {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Borrow the underlying frame for read-only projection
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Whether the table carries the named attribute
    pub fn has_attribute(&self, name: &str) -> bool {
        self.frame.get_column_names_str().contains(&name)
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// Names of all numeric attributes, in frame order.
    ///
    /// The `date` column is temporal, not numeric, so it never appears here.
    pub fn numeric_attributes(&self) -> Vec<String> {
        self.frame
            .get_columns()
            .iter()
            .filter(|column| is_numeric_dtype(column.dtype()))
            .map(|column| column.name().to_string())
            .collect()
    }

    /// Names of all categorical (text) attributes, in frame order
    pub fn categorical_attributes(&self) -> Vec<String> {
        self.frame
            .get_columns()
            .iter()
            .filter(|column| matches!(column.dtype(), DataType::String))
            .map(|column| column.name().to_string())
            .collect()
    }
}

pub(crate) fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
    )
}

/// Point-in-time snapshot of completeness and duplication characteristics.
///
/// Recomputed on demand from the current table; the default value is the
/// empty report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityReport {
    pub total_rows: usize,
    pub total_columns: usize,
    /// Per-column count of missing cells
    pub missing_values: BTreeMap<String, usize>,
    /// Per-column missing percentage; 0 by convention on a zero-row table
    pub missing_percentage: BTreeMap<String, f64>,
    /// Rows that exactly duplicate an earlier row (the first occurrence is
    /// not counted)
    pub duplicates: usize,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
}

/// The four derived aggregate views, each optional when its precondition
/// (date column, date-valid rows, weather column, numeric attributes) is
/// unmet.
#[derive(Debug, Clone, Default)]
pub struct AggregateViews {
    /// Per-calendar-day means, sorted by day
    pub timeseries: Option<DataFrame>,
    /// Per-month means keyed by a `YYYY-MM` label
    pub monthly: Option<DataFrame>,
    /// Per-year means keyed by the integer year
    pub yearly: Option<DataFrame>,
    /// Per-weather-category means; rows with missing dates participate
    pub by_weather: Option<DataFrame>,
}

impl AggregateViews {
    /// Look up a view by its fixed name
    pub fn view(&self, name: &str) -> Option<&DataFrame> {
        match name {
            view::TIMESERIES => self.timeseries.as_ref(),
            view::MONTHLY => self.monthly.as_ref(),
            view::YEARLY => self.yearly.as_ref(),
            view::BY_WEATHER => self.by_weather.as_ref(),
            _ => None,
        }
    }

    /// Names of the views present in this result
    pub fn present(&self) -> Vec<&'static str> {
        [
            (view::TIMESERIES, self.timeseries.is_some()),
            (view::MONTHLY, self.monthly.is_some()),
            (view::YEARLY, self.yearly.is_some()),
            (view::BY_WEATHER, self.by_weather.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

/// Inclusive date-range filter supplied by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Range spanning the given calendar days in full, both ends inclusive.
    ///
    /// The dashboard filter is a date picker, so `days(d, d)` covers every
    /// observation recorded on day `d` regardless of time of day.
    pub fn days(start: NaiveDate, end: NaiveDate) -> Self {
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        Self {
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(end_of_day),
        }
    }
}

/// KPI summary computed over a (possibly filtered) observation table.
///
/// A metric key is present only when its source column exists and has at
/// least one observation in the filtered frame; consumers must treat absent
/// keys as "not available", never as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiSet {
    /// Row count of the filtered frame; always present
    pub total_records: usize,
    metrics: BTreeMap<String, f64>,
}

impl KpiSet {
    pub fn new(total_records: usize) -> Self {
        Self {
            total_records,
            metrics: BTreeMap::new(),
        }
    }

    /// Record a metric when its value is available; absence stays absence
    pub fn insert_opt(&mut self, key: &str, value: Option<f64>) {
        if let Some(value) = value {
            self.metrics.insert(key.to_string(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.metrics.contains_key(key)
    }

    /// All present metrics in key order
    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }
}

/// The memoized output of one full pipeline run: the immutable observation
/// table plus every derived projection, shared read-only across sessions.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub info: DatasetInfo,
    pub observations: ObservationTable,
    pub quality: QualityReport,
    pub views: AggregateViews,
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn observation_table_capability_queries() {
        let frame = df!(
            "temperature" => &[1.0f64, 2.0],
            "weather" => &["Fog", "Clear"],
        )
        .unwrap();
        let table = ObservationTable::new(frame);

        assert!(table.has_attribute("temperature"));
        assert!(!table.has_attribute("pressure"));
        assert_eq!(table.numeric_attributes(), vec!["temperature"]);
        assert_eq!(table.categorical_attributes(), vec!["weather"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn date_range_days_covers_whole_end_day() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        let range = DateRange::days(start, end);

        assert_eq!(range.start, start.and_time(NaiveTime::MIN));
        assert!(range.end > end.and_time(NaiveTime::MIN));
        assert!(range.end < end.succ_opt().unwrap().and_time(NaiveTime::MIN));
    }

    #[test]
    fn kpi_set_omits_absent_metrics() {
        let mut kpis = KpiSet::new(3);
        kpis.insert_opt("avg_temperature", Some(15.0));
        kpis.insert_opt("avg_humidity", None);

        assert_eq!(kpis.total_records, 3);
        assert_eq!(kpis.get("avg_temperature"), Some(15.0));
        assert!(!kpis.contains("avg_humidity"));
    }

    #[test]
    fn aggregate_views_lookup_by_name() {
        let views = AggregateViews {
            timeseries: Some(df!("date" => &[1i64]).unwrap()),
            ..Default::default()
        };
        assert!(views.view("timeseries").is_some());
        assert!(views.view("monthly").is_none());
        assert!(views.view("unknown").is_none());
        assert_eq!(views.present(), vec!["timeseries"]);
    }
}
