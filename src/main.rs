use clap::Parser;
use climate_dashboard::cli::{args::Args, commands};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Hard failures stop here as a single readable message; everything
    // softer is already absorbed inside the pipeline as missing values or
    // absent keys.
    if let Err(error) = commands::run(args) {
        eprintln!("Error: {error}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
