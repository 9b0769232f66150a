//! Per-path crawl metadata

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of one crawl attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOutcome {
    pub succeeded: bool,
    pub path: String,
}

/// Success and attempt counts for one path
///
/// Invariant: `successful <= total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCounts {
    pub successful: u64,
    pub total: u64,
}

impl PathCounts {
    pub fn failed(&self) -> u64 {
        self.total.saturating_sub(self.successful)
    }

    pub fn is_consistent(&self) -> bool {
        self.successful <= self.total
    }
}

/// Attempt counts keyed by URL path
///
/// Serializes as `{"<path>": {"successful": n, "total": m}, ...}` with keys in
/// sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrawlMetadata {
    paths: BTreeMap<String, PathCounts>,
}

impl CrawlMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one attempt for `path`
    ///
    /// Must be called exactly once per processed link.
    pub fn record(&mut self, path: &str, succeeded: bool) {
        let counts = self.paths.entry(path.to_string()).or_default();
        counts.total += 1;
        if succeeded {
            counts.successful += 1;
        }
    }

    pub fn record_outcome(&mut self, outcome: &CrawlOutcome) {
        self.record(&outcome.path, outcome.succeeded);
    }

    pub fn get(&self, path: &str) -> Option<PathCounts> {
        self.paths.get(path).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PathCounts)> {
        self.paths.iter().map(|(path, counts)| (path.as_str(), *counts))
    }

    /// Number of distinct paths seen
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Successful attempts across all paths
    pub fn successful_crawls(&self) -> u64 {
        self.paths.values().map(|c| c.successful).sum()
    }

    /// Attempts across all paths
    pub fn total_crawls(&self) -> u64 {
        self.paths.values().map(|c| c.total).sum()
    }

    /// First path whose counts claim more successes than attempts
    ///
    /// Counts built through [`record`](Self::record) never have one; counts
    /// read back from a file may.
    pub fn find_inconsistent(&self) -> Option<(&str, PathCounts)> {
        self.iter().find(|(_, counts)| !counts.is_consistent())
    }
}
