//! Motor Analytics - KPI engine for motor insurance portfolio dashboards
//!
//! This library provides:
//! - Validated loading of the policy snapshot into a session-scoped store
//! - Line-of-business and location-type filtering
//! - Portfolio KPIs (GWP, loss ratio, renewal/churn/fraud rates, claims frequency)
//! - Per-LOB summary tables and chart series
//! - Metric cards and text/JSON dashboard views

pub mod error;
pub mod policy;
pub mod store;
pub mod filter;
pub mod kpi;
pub mod aggregate;
pub mod charts;
pub mod config;
pub mod report;
pub mod dashboard;

// Re-export commonly used types
pub use error::{LoadError, LoadResult};
pub use policy::PolicyRecord;
pub use store::PolicyStore;
pub use filter::PolicyFilter;
pub use kpi::{calculate_kpis, KpiSummary};
pub use aggregate::{summarize_by_lob, LobSummaryRow, LobDisplayRow};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardView};
