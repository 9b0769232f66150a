//! Storage traits and error types

use crate::classify::DocumentCategory;
use crate::storage::ExtractedDocument;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown document category '{0}' in database")]
    UnknownCategory(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for document storage backends
pub trait DocumentStore {
    /// Saves a document, replacing any earlier document for the same link
    fn save_document(&mut self, document: &ExtractedDocument) -> StorageResult<()>;

    /// Gets the stored document for a link
    fn get_document_by_link(&self, link: &str) -> StorageResult<Option<ExtractedDocument>>;

    /// Gets total document count
    fn count_documents(&self) -> StorageResult<u64>;

    /// Counts documents per category
    ///
    /// Categories without documents are omitted.
    fn count_by_category(&self) -> StorageResult<BTreeMap<DocumentCategory, u64>>;
}
