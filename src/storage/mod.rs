//! Storage module for extracted documents
//!
//! This module handles persistence of the documents the default crawler
//! extracts, including:
//! - SQLite database initialization and schema management
//! - Document upserts keyed by link
//! - Per-category document counts

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteDocumentStore;
pub use traits::{DocumentStore, StorageError, StorageResult};

use crate::classify::DocumentCategory;
use std::path::Path;

/// Opens or creates a document store
pub fn open_store(path: &Path) -> StorageResult<SqliteDocumentStore> {
    SqliteDocumentStore::new(path)
}

/// A document extracted from one link
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub link: String,
    pub path: String,
    pub category: DocumentCategory,
    pub title: Option<String>,
    pub description: Option<String>,
    pub headings: Vec<String>,
    pub content: String,
    pub links: Vec<String>,
    /// RFC 3339 fetch timestamp
    pub fetched_at: String,
}
