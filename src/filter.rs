//! Categorical filtering on line of business and location type

use crate::policy::PolicyRecord;
use serde::{Deserialize, Serialize};

/// User selection on the two filter dimensions
///
/// An empty list places no restriction on its dimension, so the default filter
/// passes every record through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyFilter {
    /// Allowed line-of-business values
    #[serde(default)]
    pub lobs: Vec<String>,

    /// Allowed location-type values
    #[serde(default)]
    pub location_types: Vec<String>,
}

impl PolicyFilter {
    /// Selection values are trimmed like the loaded CSV fields; blank values are dropped
    pub fn new(lobs: Vec<String>, location_types: Vec<String>) -> Self {
        Self {
            lobs: normalize(lobs),
            location_types: normalize(location_types),
        }
    }

    /// Filter that passes every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether a single record passes both dimensions
    pub fn matches(&self, record: &PolicyRecord) -> bool {
        allowed(&self.lobs, &record.lob) && allowed(&self.location_types, &record.location_type)
    }

    /// Select the matching records, preserving input order
    ///
    /// Accepts the store's records or an already filtered view, so filters can
    /// be chained and re-applied.
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a PolicyRecord>
    where
        I: IntoIterator<Item = &'a PolicyRecord>,
    {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

fn normalize(selection: Vec<String>) -> Vec<String> {
    selection
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

fn allowed(selection: &[String], value: &str) -> bool {
    selection.is_empty() || selection.iter().any(|s| s == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn portfolio() -> Vec<PolicyRecord> {
        vec![
            PolicyRecord::new("1", "Private Car", "Urban", 15_000.0, 0.0),
            PolicyRecord::new("2", "Private Car", "Rural", 12_000.0, 3_000.0),
            PolicyRecord::new("3", "Commercial Vehicle", "Urban", 50_000.0, 0.0),
            PolicyRecord::new("4", "Commercial Vehicle", "Rural", 45_000.0, 20_000.0),
        ]
    }

    fn ids(view: &[&PolicyRecord]) -> Vec<String> {
        view.iter().map(|r| r.policy_id.clone()).collect()
    }

    #[test]
    fn test_filter_on_both_dimensions() {
        let records = portfolio();
        let filter = PolicyFilter::new(vec!["Private Car".into()], vec!["Rural".into()]);

        assert_eq!(ids(&filter.apply(&records)), vec!["2"]);
    }

    #[test]
    fn test_empty_selection_is_no_restriction() {
        let records = portfolio();

        let lob_only = PolicyFilter::new(vec!["Commercial Vehicle".into()], Vec::new());
        assert_eq!(ids(&lob_only.apply(&records)), vec!["3", "4"]);

        let location_only = PolicyFilter::new(Vec::new(), vec!["Urban".into()]);
        assert_eq!(ids(&location_only.apply(&records)), vec!["1", "3"]);

        assert_eq!(PolicyFilter::all().apply(&records).len(), records.len());
    }

    #[test]
    fn test_selection_values_are_trimmed() {
        let records = portfolio();
        let filter = PolicyFilter::new(
            vec!["Private Car".into(), " Commercial Vehicle ".into()],
            vec!["".into(), " Urban".into()],
        );

        assert_eq!(filter.lobs, vec!["Private Car", "Commercial Vehicle"]);
        assert_eq!(filter.location_types, vec!["Urban"]);
        assert_eq!(ids(&filter.apply(&records)), vec!["1", "3"]);
    }

    #[test]
    fn test_unknown_value_yields_empty_view() {
        let records = portfolio();
        let filter = PolicyFilter::new(vec!["two-wheeler".into()], Vec::new());

        assert!(filter.apply(&records).is_empty());
    }

    #[test]
    fn test_full_selection_preserves_order() {
        let records = portfolio();
        let filter = PolicyFilter::new(
            vec!["Private Car".into(), "Commercial Vehicle".into()],
            vec!["Urban".into(), "Rural".into()],
        );

        let view = filter.apply(&records);
        assert_eq!(view.len(), records.len());
        for (filtered, original) in view.iter().zip(records.iter()) {
            assert!(std::ptr::eq(*filtered, original));
        }
    }

    fn arb_record() -> impl Strategy<Value = PolicyRecord> {
        (
            0u32..10_000,
            prop::sample::select(vec!["Private Car", "Two-Wheeler", "Commercial Vehicle"]),
            prop::sample::select(vec!["Urban", "Rural"]),
            0.0f64..100_000.0,
        )
            .prop_map(|(id, lob, loc, premium)| {
                PolicyRecord::new(id.to_string(), lob, loc, premium, 0.0)
            })
    }

    fn arb_selection(values: &'static [&'static str]) -> impl Strategy<Value = Vec<String>> {
        prop::sample::subsequence(values.to_vec(), 0..=values.len())
            .prop_map(|v| v.into_iter().map(String::from).collect())
    }

    proptest! {
        #[test]
        fn prop_filter_is_idempotent(
            records in prop::collection::vec(arb_record(), 0..50),
            lobs in arb_selection(&["Private Car", "Two-Wheeler", "Commercial Vehicle"]),
            locations in arb_selection(&["Urban", "Rural"]),
        ) {
            let filter = PolicyFilter::new(lobs, locations);
            let once = filter.apply(&records);
            let twice = filter.apply(once.iter().copied());

            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_every_selected_record_matches(
            records in prop::collection::vec(arb_record(), 0..50),
            lobs in arb_selection(&["Private Car", "Two-Wheeler", "Commercial Vehicle"]),
        ) {
            let filter = PolicyFilter::new(lobs.clone(), Vec::new());
            let view = filter.apply(&records);
            let expected = records
                .iter()
                .filter(|r| lobs.is_empty() || lobs.contains(&r.lob))
                .count();

            prop_assert_eq!(view.len(), expected);
        }
    }
}
