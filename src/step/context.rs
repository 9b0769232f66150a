//! Where a step publishes its run metadata

use crate::output::OutputResult;
use crate::step::CrawlMetadata;
use std::collections::BTreeMap;

/// Execution record of the running step
///
/// The orchestrator calls this once, after every link has been processed.
pub trait StepContext {
    fn add_output_metadata(
        &mut self,
        output_name: &str,
        metadata: &CrawlMetadata,
    ) -> OutputResult<()>;
}

/// Keeps published metadata in memory
#[derive(Debug, Default)]
pub struct MemoryStepContext {
    outputs: BTreeMap<String, CrawlMetadata>,
}

impl MemoryStepContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_metadata(&self, output_name: &str) -> Option<&CrawlMetadata> {
        self.outputs.get(output_name)
    }
}

impl StepContext for MemoryStepContext {
    fn add_output_metadata(
        &mut self,
        output_name: &str,
        metadata: &CrawlMetadata,
    ) -> OutputResult<()> {
        self.outputs
            .insert(output_name.to_string(), metadata.clone());
        Ok(())
    }
}
