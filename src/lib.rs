//! Climate Dashboard Data Engine
//!
//! The data preparation and aggregation core behind an interactive climate
//! data-story dashboard. It loads a single CSV of hourly weather
//! observations, cleans and semantically renames its columns, and derives
//! the read-only projections the presentation layer consumes.
//!
//! This library provides tools for:
//! - Locating and loading the raw CSV dataset from a data directory
//! - Normalizing column identifiers and deriving a canonical `date` column
//! - Computing a data-quality report (missing values, duplicates, types)
//! - Building daily/monthly/yearly/per-weather aggregate views
//! - Computing KPI summaries under an optional inclusive date-range filter
//! - Memoizing the whole pipeline keyed by a source-file fingerprint
//!
//! The observation table is produced once per dataset load and held
//! immutable; every derived structure is a pure projection of it.

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod cache;
        pub mod cleaner;
        pub mod kpi;
        pub mod loader;
        pub mod validator;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    AggregateViews, Dataset, DatasetInfo, DateRange, KpiSet, ObservationTable, QualityReport,
};
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
