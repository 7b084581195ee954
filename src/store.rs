//! Session-scoped record store
//!
//! Loads the portfolio snapshot once, then serves every filter/KPI pass from
//! memory without re-reading the CSV file.

use crate::error::LoadResult;
use crate::policy::{load_policies, PolicyRecord};
use log::info;
use std::collections::HashSet;
use std::path::Path;

/// Pre-loaded, read-only collection of policies
///
/// # Example
/// ```ignore
/// let store = PolicyStore::from_csv_path("data/motor_insurance_data.csv")?;
///
/// for filter in filters {
///     let view = filter.apply(store.records());
///     let kpis = calculate_kpis(view.iter().copied());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PolicyStore {
    records: Vec<PolicyRecord>,
    lob_values: Vec<String>,
    location_values: Vec<String>,
}

impl PolicyStore {
    /// Build a store from already validated records
    pub fn new(records: Vec<PolicyRecord>) -> Self {
        let lob_values = distinct_in_order(records.iter().map(|r| r.lob.as_str()));
        let location_values = distinct_in_order(records.iter().map(|r| r.location_type.as_str()));

        Self {
            records,
            lob_values,
            location_values,
        }
    }

    /// Load the store from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        let store = Self::new(load_policies(path)?);
        info!(
            "Loaded {} policies ({} lines of business, {} location types)",
            store.len(),
            store.lob_values.len(),
            store.location_values.len()
        );
        Ok(store)
    }

    pub fn records(&self) -> &[PolicyRecord] {
        &self.records
    }

    /// Distinct line-of-business values in first-seen order
    pub fn lob_values(&self) -> &[String] {
        &self.lob_values
    }

    /// Distinct location-type values in first-seen order
    pub fn location_values(&self) -> &[String] {
        &self.location_values
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> PolicyStore {
        PolicyStore::new(vec![
            PolicyRecord::new("1", "Two-Wheeler", "Rural", 2_000.0, 0.0),
            PolicyRecord::new("2", "Private Car", "Urban", 15_000.0, 0.0),
            PolicyRecord::new("3", "Two-Wheeler", "Urban", 2_500.0, 400.0),
            PolicyRecord::new("4", "Commercial Vehicle", "Rural", 50_000.0, 0.0),
        ])
    }

    #[test]
    fn test_vocabularies_in_first_seen_order() {
        let store = sample_store();

        assert_eq!(store.len(), 4);
        assert_eq!(
            store.lob_values(),
            &["Two-Wheeler", "Private Car", "Commercial Vehicle"]
        );
        assert_eq!(store.location_values(), &["Rural", "Urban"]);
    }

    #[test]
    fn test_empty_store() {
        let store = PolicyStore::new(Vec::new());
        assert!(store.is_empty());
        assert!(store.lob_values().is_empty());
        assert!(store.location_values().is_empty());
    }

    #[test]
    fn test_from_csv_path() {
        let store = PolicyStore::from_csv_path("data/motor_insurance_data.csv")
            .expect("Failed to load store");

        assert_eq!(store.len(), 12);
        assert_eq!(
            store.lob_values(),
            &["Private Car", "Two-Wheeler", "Commercial Vehicle"]
        );
        assert_eq!(store.location_values(), &["Urban", "Rural"]);
    }
}
