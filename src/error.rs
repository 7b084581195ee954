//! Errors raised while loading the policy dataset
//!
//! Loading is the only fallible step; filtering, KPIs and aggregation are
//! total over any validated record collection.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Data file not found: {}. Please run data generation first.", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read data file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: invalid value {value:?} for column '{column}'")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Row {row}: {column} must be a non-negative amount, got {value}")]
    NegativeAmount {
        row: usize,
        column: &'static str,
        value: f64,
    },

    #[error("Row {row}: duplicate policy_id '{policy_id}' (first seen at row {first_row})")]
    DuplicatePolicyId {
        row: usize,
        first_row: usize,
        policy_id: String,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;
