// src/table/mod.rs
//! Delimited result-table ingestion and record types

pub mod reader;
pub mod record;

// Re-export core types for easy access
pub use reader::{read_areas, read_results, TableError, NA_TOKEN};
pub use record::{AreaRecord, EfficiencyRecord, GroupKey, ResultRecord};
