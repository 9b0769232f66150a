//! JSON file step context

use crate::output::{OutputError, OutputResult};
use crate::step::{CrawlMetadata, StepContext};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The metadata a step attached to one of its outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub output_name: String,
    /// RFC 3339 time the record was written
    pub recorded_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
    pub metadata: CrawlMetadata,
}

/// Step context that writes the metadata record to a JSON file
///
/// The file is replaced on every publish.
#[derive(Debug, Clone)]
pub struct JsonMetadataWriter {
    path: PathBuf,
    config_hash: Option<String>,
}

impl JsonMetadataWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config_hash: None,
        }
    }

    /// Tags written records with the hash of the configuration in use
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StepContext for JsonMetadataWriter {
    fn add_output_metadata(
        &mut self,
        output_name: &str,
        metadata: &CrawlMetadata,
    ) -> OutputResult<()> {
        let record = MetadataRecord {
            output_name: output_name.to_string(),
            recorded_at: Utc::now().to_rfc3339(),
            config_hash: self.config_hash.clone(),
            metadata: metadata.clone(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&record)?;
        fs::write(&self.path, json)?;

        tracing::info!(
            "Wrote metadata for {} path(s) to {}",
            metadata.len(),
            self.path.display()
        );

        Ok(())
    }
}

/// Loads a record written by [`JsonMetadataWriter`]
///
/// Fails with [`OutputError::InconsistentCounts`] if any path reports more
/// successes than attempts.
pub fn read_metadata_record(path: &Path) -> OutputResult<MetadataRecord> {
    let content = fs::read_to_string(path)?;
    let record: MetadataRecord = serde_json::from_str(&content)?;

    if let Some((path, counts)) = record.metadata.find_inconsistent() {
        return Err(OutputError::InconsistentCounts {
            path: path.to_string(),
            successful: counts.successful,
            total: counts.total,
        });
    }

    Ok(record)
}
