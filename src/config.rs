//! Dashboard configuration
//!
//! Defaults match the business targets used by the portfolio team and can be
//! overridden through environment variables:
//!   MOTOR_DATA_PATH, LOSS_RATIO_TARGET, RENEWAL_RATE_TARGET, PREMIUM_BINS

use crate::policy::DEFAULT_DATA_PATH;
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Target loss ratio (65%)
pub const DEFAULT_LOSS_RATIO_TARGET: f64 = 0.65;

/// Target renewal rate (82%)
pub const DEFAULT_RENEWAL_RATE_TARGET: f64 = 0.82;

/// Number of equal-width bins in the premium distribution
pub const DEFAULT_PREMIUM_BINS: usize = 20;

/// Upper bound on premium histogram bins, whatever a request asks for
pub const MAX_PREMIUM_BINS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Portfolio snapshot CSV
    pub data_path: PathBuf,

    /// Loss ratio the metric card compares against (lower is better)
    pub loss_ratio_target: f64,

    /// Renewal rate the metric card compares against
    pub renewal_rate_target: f64,

    pub premium_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            loss_ratio_target: DEFAULT_LOSS_RATIO_TARGET,
            renewal_rate_target: DEFAULT_RENEWAL_RATE_TARGET,
            premium_bins: DEFAULT_PREMIUM_BINS,
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by any of the recognised environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            data_path: lookup("MOTOR_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            loss_ratio_target: parse_or(&lookup, "LOSS_RATIO_TARGET", defaults.loss_ratio_target),
            renewal_rate_target: parse_or(
                &lookup,
                "RENEWAL_RATE_TARGET",
                defaults.renewal_rate_target,
            ),
            premium_bins: parse_or(&lookup, "PREMIUM_BINS", defaults.premium_bins),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparseable {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_path, PathBuf::from("data/motor_insurance_data.csv"));
        assert_eq!(config.loss_ratio_target, 0.65);
        assert_eq!(config.renewal_rate_target, 0.82);
    }

    #[test]
    fn test_overrides() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            ("MOTOR_DATA_PATH", "/tmp/portfolio.csv"),
            ("LOSS_RATIO_TARGET", "0.7"),
            ("PREMIUM_BINS", "12"),
        ]));

        assert_eq!(config.data_path, PathBuf::from("/tmp/portfolio.csv"));
        assert_eq!(config.loss_ratio_target, 0.7);
        assert_eq!(config.renewal_rate_target, DEFAULT_RENEWAL_RATE_TARGET);
        assert_eq!(config.premium_bins, 12);
    }

    #[test]
    fn test_unparseable_value_falls_back() {
        let config = DashboardConfig::from_lookup(lookup_from(&[("PREMIUM_BINS", "lots")]));
        assert_eq!(config.premium_bins, DEFAULT_PREMIUM_BINS);
    }
}
