//! One dashboard render pass
//!
//! Each filter change triggers a full recomputation: filter the store, then
//! compute KPIs, the LOB table and the chart series from the same view.

use crate::aggregate::{display_rows, summarize_by_lob, LobDisplayRow, LobSummaryRow};
use crate::charts::ChartSeries;
use crate::config::DashboardConfig;
use crate::filter::PolicyFilter;
use crate::kpi::{calculate_kpis, KpiSummary};
use crate::report::{additional_cards, headline_cards, MetricCard};
use crate::store::PolicyStore;
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;

/// Everything a front end needs to draw the dashboard for one filter selection
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub generated_at: DateTime<Utc>,
    pub filter: PolicyFilter,
    /// Filter options discovered from the data
    pub available_lobs: Vec<String>,
    pub available_location_types: Vec<String>,
    pub total_records: usize,
    pub filtered_records: usize,
    pub kpis: KpiSummary,
    pub headline_metrics: Vec<MetricCard>,
    pub additional_metrics: Vec<MetricCard>,
    /// Full-precision per-LOB statistics
    pub lob_summary: Vec<LobSummaryRow>,
    /// Rounded per-LOB table
    pub lob_table: Vec<LobDisplayRow>,
    pub charts: ChartSeries,
}

/// Renders views from a borrowed, pre-loaded store
#[derive(Debug, Clone)]
pub struct Dashboard<'s> {
    store: &'s PolicyStore,
    config: DashboardConfig,
}

impl<'s> Dashboard<'s> {
    pub fn new(store: &'s PolicyStore, config: DashboardConfig) -> Self {
        Self { store, config }
    }

    pub fn render(&self, filter: &PolicyFilter) -> DashboardView {
        let view = filter.apply(self.store.records());
        debug!(
            "Filter {:?} kept {} of {} policies",
            filter,
            view.len(),
            self.store.len()
        );

        let kpis = calculate_kpis(view.iter().copied());
        let lob_summary = summarize_by_lob(view.iter().copied());
        let charts = ChartSeries::build(&view, &lob_summary, self.config.premium_bins);

        DashboardView {
            generated_at: Utc::now(),
            filter: filter.clone(),
            available_lobs: self.store.lob_values().to_vec(),
            available_location_types: self.store.location_values().to_vec(),
            total_records: self.store.len(),
            filtered_records: view.len(),
            headline_metrics: headline_cards(
                &kpis,
                self.config.loss_ratio_target,
                self.config.renewal_rate_target,
            ),
            additional_metrics: additional_cards(&kpis),
            lob_table: display_rows(&lob_summary),
            lob_summary,
            kpis,
            charts,
        }
    }
}
