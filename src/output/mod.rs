//! Output module for publishing step metadata
//!
//! This module handles:
//! - Writing the step's metadata record as JSON
//! - Printing per-path crawl statistics

mod json;
pub mod stats;

pub use json::{read_metadata_record, JsonMetadataWriter, MetadataRecord};
pub use stats::{print_statistics, success_rate};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Inconsistent counts for path '{path}': {successful} successful out of {total}")]
    InconsistentCounts {
        path: String,
        successful: u64,
        total: u64,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
