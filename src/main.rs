//! Motor Analytics CLI
//!
//! Loads the portfolio snapshot once, applies the requested filters and prints
//! the dashboard as a text report or as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use motor_analytics::{report, Dashboard, DashboardConfig, PolicyFilter, PolicyStore};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "motor_analytics", version, about = "Motor insurance portfolio dashboard")]
struct Args {
    /// Policy snapshot CSV (defaults to $MOTOR_DATA_PATH or data/motor_insurance_data.csv)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Line of business to include; repeat or comma-separate. Omit for all.
    #[arg(long = "lob", value_delimiter = ',')]
    lobs: Vec<String>,

    /// Location type to include; repeat or comma-separate. Omit for all.
    #[arg(long = "location", value_delimiter = ',')]
    locations: Vec<String>,

    /// Number of premium histogram bins
    #[arg(long)]
    bins: Option<usize>,

    /// Loss ratio target as a fraction (e.g. 0.65)
    #[arg(long)]
    loss_ratio_target: Option<f64>,

    /// Renewal rate target as a fraction (e.g. 0.82)
    #[arg(long)]
    renewal_rate_target: Option<f64>,

    /// Print the dashboard view as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> DashboardConfig {
        let mut config = DashboardConfig::from_env();
        if let Some(path) = &self.data {
            config.data_path = path.clone();
        }
        if let Some(bins) = self.bins {
            config.premium_bins = bins;
        }
        if let Some(target) = self.loss_ratio_target {
            config.loss_ratio_target = target;
        }
        if let Some(target) = self.renewal_rate_target {
            config.renewal_rate_target = target;
        }
        config
    }
}

fn run(args: Args) -> Result<()> {
    let config = args.config();

    let store = PolicyStore::from_csv_path(&config.data_path)
        .with_context(|| format!("Unable to load policy data from {}", config.data_path.display()))?;

    let filter = PolicyFilter::new(args.lobs, args.locations);
    let dashboard = Dashboard::new(&store, config);
    let view = dashboard.render(&filter);
    info!("Rendered dashboard for {} of {} policies", view.filtered_records, view.total_records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", report::render_text(&view));
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
