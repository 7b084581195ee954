//! Line-of-business summary table

use crate::kpi::{ratio, Totals};
use crate::policy::PolicyRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics for one line of business, full precision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobSummaryRow {
    pub lob: String,
    pub policies: usize,
    pub total_premium: f64,
    pub avg_premium: f64,
    pub total_claims: f64,
    pub renewal_rate: f64,
    pub fraud_rate: f64,
    /// total_claims / total_premium
    pub loss_ratio: f64,
}

/// Rounded form of [`LobSummaryRow`] for tables and exports
///
/// Renewal and fraud rates are percentages here; everything else keeps the
/// units of the full-precision row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobDisplayRow {
    #[serde(rename = "LOB")]
    pub lob: String,
    #[serde(rename = "Policies")]
    pub policies: usize,
    #[serde(rename = "Total Premium")]
    pub total_premium: f64,
    #[serde(rename = "Avg Premium")]
    pub avg_premium: f64,
    #[serde(rename = "Total Claims")]
    pub total_claims: f64,
    #[serde(rename = "Renewal Rate (%)")]
    pub renewal_rate_pct: f64,
    #[serde(rename = "Fraud Rate (%)")]
    pub fraud_rate_pct: f64,
    #[serde(rename = "Loss Ratio")]
    pub loss_ratio: f64,
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

impl LobSummaryRow {
    fn from_totals(lob: &str, totals: &Totals) -> Self {
        Self {
            lob: lob.to_string(),
            policies: totals.policies,
            total_premium: totals.premium,
            avg_premium: totals.avg_premium(),
            total_claims: totals.claims,
            renewal_rate: totals.renewal_rate(),
            fraud_rate: totals.fraud_rate(),
            loss_ratio: ratio(totals.claims, totals.premium),
        }
    }

    /// Rounded copy for display; the row itself keeps full precision
    pub fn display(&self) -> LobDisplayRow {
        LobDisplayRow {
            lob: self.lob.clone(),
            policies: self.policies,
            total_premium: round_to(self.total_premium, 2),
            avg_premium: round_to(self.avg_premium, 2),
            total_claims: round_to(self.total_claims, 2),
            renewal_rate_pct: round_to(self.renewal_rate * 100.0, 1),
            fraud_rate_pct: round_to(self.fraud_rate * 100.0, 2),
            loss_ratio: round_to(self.loss_ratio, 4),
        }
    }
}

/// Partition records by line of business, keyed and ordered by LOB name
pub fn partition_by_lob<'a, I>(records: I) -> BTreeMap<&'a str, Vec<&'a PolicyRecord>>
where
    I: IntoIterator<Item = &'a PolicyRecord>,
{
    let mut groups: BTreeMap<&'a str, Vec<&'a PolicyRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.lob.as_str()).or_default().push(record);
    }
    groups
}

/// One summary row per distinct line of business, sorted by LOB name
pub fn summarize_by_lob<'a, I>(records: I) -> Vec<LobSummaryRow>
where
    I: IntoIterator<Item = &'a PolicyRecord>,
{
    let groups: Vec<(&str, Vec<&PolicyRecord>)> = partition_by_lob(records).into_iter().collect();

    groups
        .par_iter()
        .map(|(lob, members)| {
            let totals = Totals::from_records(members.iter().copied());
            LobSummaryRow::from_totals(lob, &totals)
        })
        .collect()
}

/// Rounded display rows for a summary table
pub fn display_rows(rows: &[LobSummaryRow]) -> Vec<LobDisplayRow> {
    rows.iter().map(LobSummaryRow::display).collect()
}
