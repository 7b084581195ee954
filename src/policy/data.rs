//! Policy record matching the motor portfolio snapshot format

use serde::{Deserialize, Serialize};

/// A single motor policy from the portfolio snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Unique policy identifier
    pub policy_id: String,

    /// Line of business (e.g. "Private Car", "Two-Wheeler", "Commercial Vehicle")
    pub lob: String,

    /// Location type of the insured vehicle (e.g. "Urban", "Rural")
    pub location_type: String,

    /// Written premium
    pub premium: f64,

    /// Claims paid against the policy
    pub claims_amount: f64,

    /// Policy was renewed at term end
    pub renewed: bool,

    /// Policy was flagged as fraudulent
    pub fraud: bool,

    /// Policyholder churned
    pub churn: bool,
}

impl PolicyRecord {
    /// Create a record with all flags cleared
    pub fn new(
        policy_id: impl Into<String>,
        lob: impl Into<String>,
        location_type: impl Into<String>,
        premium: f64,
        claims_amount: f64,
    ) -> Self {
        Self {
            policy_id: policy_id.into(),
            lob: lob.into(),
            location_type: location_type.into(),
            premium,
            claims_amount,
            renewed: false,
            fraud: false,
            churn: false,
        }
    }

    pub fn with_flags(mut self, renewed: bool, fraud: bool, churn: bool) -> Self {
        self.renewed = renewed;
        self.fraud = fraud;
        self.churn = churn;
        self
    }

    /// Whether any claim was paid on this policy
    pub fn has_claim(&self) -> bool {
        self.claims_amount > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_claim() {
        let clean = PolicyRecord::new("P1", "Private Car", "Urban", 12_000.0, 0.0);
        let claimed = PolicyRecord::new("P2", "Private Car", "Urban", 12_000.0, 4_500.0);

        assert!(!clean.has_claim());
        assert!(claimed.has_claim());
    }

    #[test]
    fn test_with_flags() {
        let record = PolicyRecord::new("P1", "Two-Wheeler", "Rural", 2_000.0, 0.0)
            .with_flags(true, false, true);

        assert!(record.renewed);
        assert!(!record.fraud);
        assert!(record.churn);
    }
}
