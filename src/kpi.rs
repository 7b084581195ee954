//! Portfolio KPIs over a policy collection
//!
//! Every ratio and mean resolves to 0.0 when its denominator is zero, so an
//! empty or fully filtered-out collection produces a summary rather than an
//! error.

use crate::policy::PolicyRecord;
use serde::{Deserialize, Serialize};

/// `numerator / denominator`, or 0.0 when the denominator is zero
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Running sums over a policy collection
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub policies: usize,
    pub premium: f64,
    pub claims: f64,
    pub renewed: usize,
    pub fraud: usize,
    pub churn: usize,
    /// Policies with a non-zero claims amount
    pub with_claims: usize,
}

impl Totals {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PolicyRecord>,
    {
        records.into_iter().fold(Self::default(), |mut acc, record| {
            acc.add(record);
            acc
        })
    }

    pub fn add(&mut self, record: &PolicyRecord) {
        self.policies += 1;
        self.premium += record.premium;
        self.claims += record.claims_amount;
        self.renewed += record.renewed as usize;
        self.fraud += record.fraud as usize;
        self.churn += record.churn as usize;
        self.with_claims += record.has_claim() as usize;
    }

    /// Share of policies, 0.0 for an empty collection
    fn rate(&self, count: usize) -> f64 {
        ratio(count as f64, self.policies as f64)
    }

    pub fn loss_ratio(&self) -> f64 {
        ratio(self.claims, self.premium)
    }

    pub fn renewal_rate(&self) -> f64 {
        self.rate(self.renewed)
    }

    pub fn fraud_rate(&self) -> f64 {
        self.rate(self.fraud)
    }

    pub fn churn_rate(&self) -> f64 {
        self.rate(self.churn)
    }

    pub fn claims_frequency(&self) -> f64 {
        self.rate(self.with_claims)
    }

    pub fn avg_premium(&self) -> f64 {
        ratio(self.premium, self.policies as f64)
    }

    pub fn avg_claims_amount(&self) -> f64 {
        ratio(self.claims, self.policies as f64)
    }
}

/// Named portfolio metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_policies: usize,
    /// Gross written premium
    pub gwp: f64,
    pub total_claims: f64,
    /// total_claims / gwp
    pub loss_ratio: f64,
    pub renewal_rate: f64,
    pub churn_rate: f64,
    pub fraud_rate: f64,
    pub avg_premium: f64,
    pub avg_claims_amount: f64,
    /// Policies with at least one paid claim / total policies
    pub claims_frequency: f64,
}

impl KpiSummary {
    pub const METRIC_NAMES: [&'static str; 10] = [
        "total_policies",
        "gwp",
        "total_claims",
        "loss_ratio",
        "renewal_rate",
        "churn_rate",
        "fraud_rate",
        "avg_premium",
        "avg_claims_amount",
        "claims_frequency",
    ];

    pub fn from_totals(totals: &Totals) -> Self {
        Self {
            total_policies: totals.policies,
            gwp: totals.premium,
            total_claims: totals.claims,
            loss_ratio: totals.loss_ratio(),
            renewal_rate: totals.renewal_rate(),
            churn_rate: totals.churn_rate(),
            fraud_rate: totals.fraud_rate(),
            avg_premium: totals.avg_premium(),
            avg_claims_amount: totals.avg_claims_amount(),
            claims_frequency: totals.claims_frequency(),
        }
    }

    /// Look up a metric by name
    pub fn get(&self, name: &str) -> Option<f64> {
        let value = match name {
            "total_policies" => self.total_policies as f64,
            "gwp" => self.gwp,
            "total_claims" => self.total_claims,
            "loss_ratio" => self.loss_ratio,
            "renewal_rate" => self.renewal_rate,
            "churn_rate" => self.churn_rate,
            "fraud_rate" => self.fraud_rate,
            "avg_premium" => self.avg_premium,
            "avg_claims_amount" => self.avg_claims_amount,
            "claims_frequency" => self.claims_frequency,
            _ => return None,
        };
        Some(value)
    }

    /// All metrics as (name, value) pairs in declaration order
    pub fn metrics(&self) -> Vec<(&'static str, f64)> {
        Self::METRIC_NAMES
            .iter()
            .filter_map(|&name| self.get(name).map(|v| (name, v)))
            .collect()
    }
}

/// Compute the KPI summary for a record collection (possibly empty)
pub fn calculate_kpis<'a, I>(records: I) -> KpiSummary
where
    I: IntoIterator<Item = &'a PolicyRecord>,
{
    KpiSummary::from_totals(&Totals::from_records(records))
}
