//! Command-line argument definitions for the dashboard data engine
//!
//! Defines the inspection CLI over the engine's outputs using the clap
//! derive API. The real dashboard front end consumes the same library
//! surface; this binary exists for local inspection and smoke testing.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the climate dashboard data engine
#[derive(Debug, Clone, Parser)]
#[command(
    name = "climate-dashboard",
    version,
    about = "Inspect the cleaned climate dataset, its aggregate views, and KPIs"
)]
pub struct Args {
    /// Directory containing the single input CSV dataset
    #[arg(short = 'd', long = "data-dir", value_name = "PATH", default_value = "data")]
    pub data_dir: PathBuf,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands; `report` is the default
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print the data-quality report for the cleaned dataset
    Report,
    /// Summarize the aggregate views (timeseries, monthly, yearly, by_weather)
    Views,
    /// Compute KPIs, optionally restricted to an inclusive date range
    Kpis(KpisArgs),
}

/// Arguments for the kpis command
#[derive(Debug, Clone, Parser)]
pub struct KpisArgs {
    /// Start of the date filter (YYYY-MM-DD); requires --end
    #[arg(long, value_name = "DATE", requires = "end")]
    pub start: Option<NaiveDate>,

    /// End of the date filter (YYYY-MM-DD); requires --start
    #[arg(long, value_name = "DATE", requires = "start")]
    pub end: Option<NaiveDate>,
}
