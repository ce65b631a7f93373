//! Command dispatch and report rendering for the inspection CLI.
//!
//! Every command runs the memoized pipeline once and renders one of its
//! read-only projections. Rendering treats the dataset as an immutable
//! snapshot, mirroring the contract the dashboard front end follows.

use colored::Colorize;
use tracing::info;

use crate::app::models::{Dataset, DateRange, KpiSet};
use crate::app::services::{cache::PipelineCache, kpi};
use crate::cli::args::{Args, Commands, KpisArgs};
use crate::config::DashboardConfig;
use crate::error::Result;

/// Run the selected command against the configured data directory
pub fn run(args: Args) -> Result<()> {
    let config = DashboardConfig::default().with_data_dir(args.data_dir.clone());
    let mut cache = PipelineCache::new();
    let dataset = cache.get_or_compute(&config)?;

    match args.command.unwrap_or(Commands::Report) {
        Commands::Report => print_report(&dataset),
        Commands::Views => print_views(&dataset),
        Commands::Kpis(kpis_args) => print_kpis(&dataset, &kpis_args)?,
    }
    Ok(())
}

fn print_report(dataset: &Dataset) {
    let quality = &dataset.quality;

    println!("{}", "Dataset".bold());
    println!("  name: {}", dataset.info.name);
    println!("  source: {}", dataset.info.url.dimmed());
    println!();
    println!("{}", "Quality report".bold());
    println!("  rows: {}", quality.total_rows);
    println!("  columns: {}", quality.total_columns);
    println!("  duplicate rows: {}", quality.duplicates);
    println!("  numeric columns: {}", quality.numeric_columns.join(", "));
    println!(
        "  categorical columns: {}",
        quality.categorical_columns.join(", ")
    );
    println!();
    println!("{}", "Missing values".bold());
    for (column, missing) in &quality.missing_values {
        let percentage = quality.missing_percentage.get(column).copied().unwrap_or(0.0);
        let line = format!("  {column}: {missing} ({percentage:.2}%)");
        if *missing > 0 {
            println!("{}", line.yellow());
        } else {
            println!("{line}");
        }
    }
}

fn print_views(dataset: &Dataset) {
    let views = &dataset.views;
    if views.present().is_empty() {
        println!("{}", "No aggregate views available".yellow());
        return;
    }
    for name in views.present() {
        if let Some(frame) = views.view(name) {
            println!("{} ({} rows)", name.bold(), frame.height());
            println!("{frame}");
        }
    }
}

fn print_kpis(dataset: &Dataset, args: &KpisArgs) -> Result<()> {
    let range = match (args.start, args.end) {
        (Some(start), Some(end)) => {
            info!(%start, %end, "applying date filter");
            Some(DateRange::days(start, end))
        }
        _ => None,
    };

    let kpis = kpi::compute_kpis(&dataset.observations, range.as_ref())?;
    render_kpis(&kpis);
    Ok(())
}

fn render_kpis(kpis: &KpiSet) {
    println!("{}", "KPIs".bold());
    println!(
        "  {}: {}",
        crate::constants::kpi::TOTAL_RECORDS,
        kpis.total_records
    );
    if kpis.metrics().is_empty() {
        println!("  {}", "no metrics available for this selection".yellow());
        return;
    }
    for (name, value) in kpis.metrics() {
        println!("  {name}: {value:.2}");
    }
}
