//! AWS Lambda handler serving dashboard views
//!
//! The policy snapshot is loaded once at cold start; each invocation carries a
//! filter selection as JSON and receives the full dashboard view back.
//!
//! Request: {"lob": ["Private Car"], "location_type": ["Urban"], "premium_bins": 20}
//! Every field is optional; an empty or missing list means "all".

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{error, info};
use motor_analytics::{Dashboard, DashboardConfig, DashboardView, PolicyFilter, PolicyStore};
use serde::Deserialize;

/// Filter selection for one render
#[derive(Debug, Default, Deserialize)]
pub struct DashboardRequest {
    #[serde(default)]
    pub lob: Vec<String>,

    #[serde(default)]
    pub location_type: Vec<String>,

    /// Override for the number of premium histogram bins
    #[serde(default)]
    pub premium_bins: Option<usize>,
}

fn render(store: &PolicyStore, base_config: &DashboardConfig, request: DashboardRequest) -> DashboardView {
    let mut config = base_config.clone();
    if let Some(bins) = request.premium_bins {
        config.premium_bins = bins;
    }

    let filter = PolicyFilter::new(request.lob, request.location_type);
    Dashboard::new(store, config).render(&filter)
}

async fn handler(
    store: &PolicyStore,
    config: &DashboardConfig,
    event: LambdaEvent<DashboardRequest>,
) -> Result<DashboardView, Error> {
    let view = render(store, config, event.payload);
    info!(
        "Request {}: {} of {} policies in view",
        event.context.request_id, view.filtered_records, view.total_records
    );
    Ok(view)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = DashboardConfig::from_env();
    let store = PolicyStore::from_csv_path(&config.data_path).map_err(|e| {
        error!("{}", e);
        e
    })?;

    let store = &store;
    let config = &config;
    run(service_fn(move |event: LambdaEvent<DashboardRequest>| async move {
        handler(store, config, event).await
    }))
    .await
}
