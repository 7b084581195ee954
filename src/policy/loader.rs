//! Load policies from motor_insurance_data.csv

use super::PolicyRecord;
use crate::error::{LoadError, LoadResult};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use std::collections::HashMap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Default location of the portfolio snapshot, relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "data/motor_insurance_data.csv";

/// Raw CSV row; columns not listed here are ignored
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    policy_id: String,
    lob: String,
    location_type: String,
    premium: f64,
    claims_amount: f64,
    renewed: String,
    fraud: String,
    churn: String,
}

impl CsvRow {
    /// Validate the raw row. `row` is the 1-based data row number.
    fn to_record(self, row: usize) -> LoadResult<PolicyRecord> {
        let policy_id = non_empty(row, "policy_id", self.policy_id)?;
        let lob = non_empty(row, "lob", self.lob)?;
        let location_type = non_empty(row, "location_type", self.location_type)?;

        let premium = amount(row, "premium", self.premium)?;
        let claims_amount = amount(row, "claims_amount", self.claims_amount)?;

        Ok(PolicyRecord {
            policy_id,
            lob,
            location_type,
            premium,
            claims_amount,
            renewed: parse_flag(row, "renewed", &self.renewed)?,
            fraud: parse_flag(row, "fraud", &self.fraud)?,
            churn: parse_flag(row, "churn", &self.churn)?,
        })
    }
}

fn non_empty(row: usize, column: &'static str, value: String) -> LoadResult<String> {
    if value.trim().is_empty() {
        return Err(LoadError::InvalidField { row, column, value });
    }
    Ok(value)
}

fn amount(row: usize, column: &'static str, value: f64) -> LoadResult<f64> {
    if !value.is_finite() {
        return Err(LoadError::InvalidField {
            row,
            column,
            value: value.to_string(),
        });
    }
    if value < 0.0 {
        return Err(LoadError::NegativeAmount { row, column, value });
    }
    Ok(value)
}

/// Binary flags are written as 0/1 by the data generator; booleans and yes/no
/// are accepted too
fn parse_flag(row: usize, column: &'static str, raw: &str) -> LoadResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "yes" | "y" => Ok(true),
        "0" | "0.0" | "false" | "no" | "n" => Ok(false),
        _ => Err(LoadError::InvalidField {
            row,
            column,
            value: raw.to_string(),
        }),
    }
}

/// Load all policies from a CSV file
pub fn load_policies<P: AsRef<Path>>(path: P) -> LoadResult<Vec<PolicyRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    info!("Loading policies from {}", path.display());
    load_policies_from_reader(file)
}

/// Load policies from any reader (e.g., string buffer, network stream)
pub fn load_policies_from_reader<R: Read>(reader: R) -> LoadResult<Vec<PolicyRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut policies = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row_number = idx + 1;
        let row: CsvRow = result?;
        let record = row.to_record(row_number)?;

        if let Some(&first_row) = seen.get(&record.policy_id) {
            return Err(LoadError::DuplicatePolicyId {
                row: row_number,
                first_row,
                policy_id: record.policy_id,
            });
        }
        seen.insert(record.policy_id.clone(), row_number);
        policies.push(record);
    }

    debug!("Parsed {} policy rows", policies.len());
    Ok(policies)
}

/// Load policies from the default data/motor_insurance_data.csv location
pub fn load_default_dataset() -> LoadResult<Vec<PolicyRecord>> {
    load_policies(DEFAULT_DATA_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "policy_id,lob,location_type,premium,claims_amount,renewed,fraud,churn\n";

    fn load(body: &str) -> LoadResult<Vec<PolicyRecord>> {
        load_policies_from_reader(format!("{}{}", HEADER, body).as_bytes())
    }

    #[test]
    fn test_load_from_reader() {
        let policies = load(
            "MI-001,Private Car,Urban,15000.5,0,1,0,0\n\
             MI-002,Two-Wheeler,Rural,2100,800,0,1,1\n",
        )
        .expect("valid rows");

        assert_eq!(policies.len(), 2);
        assert_eq!(policies[0].policy_id, "MI-001");
        assert_eq!(policies[0].premium, 15000.5);
        assert!(policies[0].renewed);
        assert!(!policies[0].fraud);

        assert_eq!(policies[1].lob, "Two-Wheeler");
        assert_eq!(policies[1].claims_amount, 800.0);
        assert!(policies[1].fraud);
        assert!(policies[1].churn);
    }

    #[test]
    fn test_extra_columns_and_flag_spellings() {
        let csv = "policy_id,customer_age,lob,location_type,premium,claims_amount,renewed,fraud,churn\n\
                   7,41,Commercial Vehicle, Urban ,52000,0,true,no,FALSE\n";
        let policies = load_policies_from_reader(csv.as_bytes()).expect("valid rows");

        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0].policy_id, "7");
        assert_eq!(policies[0].location_type, "Urban");
        assert!(policies[0].renewed);
        assert!(!policies[0].fraud);
        assert!(!policies[0].churn);
    }

    #[test]
    fn test_rejects_negative_premium() {
        let err = load("MI-001,Private Car,Urban,-10,0,1,0,0\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::NegativeAmount { row: 1, column: "premium", .. }
        ));
    }

    #[test]
    fn test_rejects_duplicate_policy_id() {
        let err = load(
            "MI-001,Private Car,Urban,100,0,1,0,0\n\
             MI-002,Private Car,Urban,100,0,1,0,0\n\
             MI-001,Two-Wheeler,Rural,100,0,1,0,0\n",
        )
        .unwrap_err();

        match err {
            LoadError::DuplicatePolicyId { row, first_row, policy_id } => {
                assert_eq!(row, 3);
                assert_eq!(first_row, 1);
                assert_eq!(policy_id, "MI-001");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_bad_flag() {
        let err = load("MI-001,Private Car,Urban,100,0,maybe,0,0\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidField { column: "renewed", .. }
        ));
    }

    #[test]
    fn test_rejects_empty_category() {
        let err = load("MI-001,,Urban,100,0,1,0,0\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { column: "lob", .. }));
    }

    #[test]
    fn test_unparseable_amount_is_csv_error() {
        let err = load("MI-001,Private Car,Urban,abc,0,1,0,0\n").unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_policies("data/does_not_exist.csv").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(err.to_string().contains("Please run data generation first"));
    }

    #[test]
    fn test_load_default_dataset() {
        let policies = load_default_dataset().expect("Failed to load policies");
        assert_eq!(policies.len(), 12);
        assert_eq!(policies[0].policy_id, "MI-0001");
        assert_eq!(policies[11].policy_id, "MI-0012");
    }
}
