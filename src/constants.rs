//! Application constants for the dashboard data engine
//!
//! This module contains the semantic column vocabulary, raw-to-semantic
//! column mappings, date formats, KPI keys, and view names used throughout
//! the pipeline.

// =============================================================================
// Dataset Identity and Discovery
// =============================================================================

/// Human-readable dataset name shown for attribution
pub const DATASET_NAME: &str = "Climate and Atmospheric Conditions Data";

/// Source URL of the dataset shown for attribution
pub const DATASET_URL: &str =
    "https://www.kaggle.com/datasets/saadaliyaseen/climate-and-atmospheric-conditions-data/data";

/// Default directory searched for the input file
pub const DEFAULT_DATA_DIR: &str = "data";

/// Input file pattern within the data directory
pub const INPUT_FILE_PATTERN: &str = "*.csv";

/// Rows sampled for CSV schema inference
pub const INFER_SCHEMA_ROWS: usize = 1000;

// =============================================================================
// Column Vocabulary
// =============================================================================

/// Canonical attribute names of the cleaned observation table
pub mod semantic {
    pub const DATE: &str = "date";
    pub const TEMPERATURE: &str = "temperature";
    pub const DEW_POINT: &str = "dew_point";
    pub const HUMIDITY: &str = "humidity";
    pub const WIND_SPEED: &str = "wind_speed";
    pub const VISIBILITY: &str = "visibility";
    pub const PRESSURE: &str = "pressure";
    pub const WEATHER: &str = "weather";
}

/// Raw column holding the observation timestamp, checked before any renaming
pub const RAW_DATE_COLUMN: &str = "Date/Time";

/// Mapping from normalized source column names to semantic names.
///
/// Applied as a move: the semantic column replaces the source column so no
/// logical field exists twice. Keys are the source headers *after*
/// identifier normalization (spaces and `/` already folded to `_`).
pub const COLUMN_MAPPING: [(&str, &str); 7] = [
    ("Temp_C", semantic::TEMPERATURE),
    ("Dew_Point_Temp_C", semantic::DEW_POINT),
    ("Rel_Hum_%", semantic::HUMIDITY),
    ("Wind_Speed_km_h", semantic::WIND_SPEED),
    ("Visibility_km", semantic::VISIBILITY),
    ("Press_kPa", semantic::PRESSURE),
    ("Weather", semantic::WEATHER),
];

/// Timestamp formats tried in order when deriving the `date` column
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Date-only formats tried after the timestamp formats (midnight assumed)
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

// =============================================================================
// Derived View and KPI Keys
// =============================================================================

/// Fixed names of the aggregate views and their grouping columns
pub mod view {
    pub const TIMESERIES: &str = "timeseries";
    pub const MONTHLY: &str = "monthly";
    pub const YEARLY: &str = "yearly";
    pub const BY_WEATHER: &str = "by_weather";

    /// Grouping column of the monthly view, serialized as `YYYY-MM`
    pub const YEAR_MONTH: &str = "year_month";

    /// Grouping column of the yearly view
    pub const YEAR: &str = "year";

    /// Label format of the monthly grouping key
    pub const YEAR_MONTH_FORMAT: &str = "%Y-%m";
}

/// Fixed keys of the KPI map
pub mod kpi {
    pub const AVG_TEMPERATURE: &str = "avg_temperature";
    pub const MAX_TEMPERATURE: &str = "max_temperature";
    pub const MIN_TEMPERATURE: &str = "min_temperature";
    pub const AVG_HUMIDITY: &str = "avg_humidity";
    pub const AVG_PRESSURE: &str = "avg_pressure";
    pub const AVG_WIND_SPEED: &str = "avg_wind_speed";
    pub const MAX_WIND_SPEED: &str = "max_wind_speed";
    pub const TOTAL_RECORDS: &str = "total_records";
}
