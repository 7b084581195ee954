//! Policy records and snapshot loading

mod data;
pub mod loader;

pub use data::PolicyRecord;
pub use loader::{load_policies, load_policies_from_reader, load_default_dataset, DEFAULT_DATA_PATH};
