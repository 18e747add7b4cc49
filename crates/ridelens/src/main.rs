//! ridelens - interactive transit ridership dashboard core.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use ridelens::SessionState;
use ridelens_config::Config;
use ridelens_data::{CsvLoader, DataSource};

fn run() -> Result<()> {
    env_logger::init();

    let config = Config::load_default();

    // An explicit CSV path on the command line beats the configured one
    let args: Vec<String> = env::args().collect();
    let csv_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => config.data.path.clone(),
    };

    log::info!("loading ridership data from {}", csv_path.display());
    let dataset = Arc::new(CsvLoader::new(&csv_path).load()?);

    let session = SessionState::new(dataset, &config);
    let snapshot = session.snapshot();

    println!("ridelens core ready");
    println!("  modes: {}", session.dataset().modes().join(", "));
    if let Some((start, end)) = session.dataset().date_span() {
        println!(
            "  coverage: {start} to {end} ({} records)",
            session.dataset().len()
        );
    }
    println!(
        "  overview: {} {} buckets, {} aggregation",
        snapshot.overview.len(),
        snapshot.primary_controls.resolution.label(),
        snapshot.primary_controls.aggregation.label(),
    );

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
