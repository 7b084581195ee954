//! Write the rounded LOB-wise performance table to CSV
//!
//! Usage: cargo run --bin export_lob_summary -- --output lob_summary.csv --location Urban

use anyhow::{Context, Result};
use clap::Parser;
use motor_analytics::aggregate::display_rows;
use motor_analytics::{summarize_by_lob, DashboardConfig, PolicyFilter, PolicyStore};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "export_lob_summary", about = "Export the LOB summary table to CSV")]
struct Args {
    /// Policy snapshot CSV (defaults to $MOTOR_DATA_PATH or data/motor_insurance_data.csv)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Output CSV path
    #[arg(long, default_value = "lob_summary.csv")]
    output: PathBuf,

    #[arg(long = "lob", value_delimiter = ',')]
    lobs: Vec<String>,

    #[arg(long = "location", value_delimiter = ',')]
    locations: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let data_path = args.data.unwrap_or_else(|| DashboardConfig::from_env().data_path);
    let store = PolicyStore::from_csv_path(&data_path)
        .with_context(|| format!("Unable to load policy data from {}", data_path.display()))?;

    let filter = PolicyFilter::new(args.lobs, args.locations);
    let view = filter.apply(store.records());
    let rows = display_rows(&summarize_by_lob(view.iter().copied()));

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Unable to create {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!(
        "Written {} LOB rows ({} policies) to {}",
        rows.len(),
        view.len(),
        args.output.display()
    );
    Ok(())
}
