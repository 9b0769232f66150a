//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the DocumentStore trait.

use crate::classify::DocumentCategory;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{DocumentStore, StorageError, StorageResult};
use crate::storage::ExtractedDocument;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;

/// SQLite document store
pub struct SqliteDocumentStore {
    conn: Connection,
}

impl SqliteDocumentStore {
    /// Opens or creates the database at `path`
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        // journal_mode reports the resulting mode as a row
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
        conn.execute_batch(
            "
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

/// Raw column values, decoded after the row callback returns
struct DocumentRow {
    link: String,
    path: String,
    category: String,
    title: Option<String>,
    description: Option<String>,
    headings: String,
    content: String,
    links: String,
    fetched_at: String,
}

impl DocumentRow {
    fn into_document(self) -> StorageResult<ExtractedDocument> {
        let category = DocumentCategory::from_tag(&self.category)
            .ok_or(StorageError::UnknownCategory(self.category))?;

        Ok(ExtractedDocument {
            link: self.link,
            path: self.path,
            category,
            title: self.title,
            description: self.description,
            headings: serde_json::from_str(&self.headings)?,
            content: self.content,
            links: serde_json::from_str(&self.links)?,
            fetched_at: self.fetched_at,
        })
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn save_document(&mut self, document: &ExtractedDocument) -> StorageResult<()> {
        let headings = serde_json::to_string(&document.headings)?;
        let links = serde_json::to_string(&document.links)?;

        self.conn.execute(
            "INSERT INTO documents
                (link, path, category, title, description, headings, content, links, fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(link) DO UPDATE SET
                path = excluded.path,
                category = excluded.category,
                title = excluded.title,
                description = excluded.description,
                headings = excluded.headings,
                content = excluded.content,
                links = excluded.links,
                fetched_at = excluded.fetched_at",
            params![
                document.link,
                document.path,
                document.category.as_str(),
                document.title,
                document.description,
                headings,
                document.content,
                links,
                document.fetched_at,
            ],
        )?;

        Ok(())
    }

    fn get_document_by_link(&self, link: &str) -> StorageResult<Option<ExtractedDocument>> {
        let row = self
            .conn
            .query_row(
                "SELECT link, path, category, title, description, headings, content, links, fetched_at
                 FROM documents WHERE link = ?1",
                params![link],
                |row| {
                    Ok(DocumentRow {
                        link: row.get(0)?,
                        path: row.get(1)?,
                        category: row.get(2)?,
                        title: row.get(3)?,
                        description: row.get(4)?,
                        headings: row.get(5)?,
                        content: row.get(6)?,
                        links: row.get(7)?,
                        fetched_at: row.get(8)?,
                    })
                },
            )
            .optional()?;

        row.map(DocumentRow::into_document).transpose()
    }

    fn count_documents(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_by_category(&self) -> StorageResult<BTreeMap<DocumentCategory, u64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category, COUNT(*) FROM documents GROUP BY category")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counts = BTreeMap::new();
        for row in rows {
            let (tag, count) = row?;
            let category =
                DocumentCategory::from_tag(&tag).ok_or(StorageError::UnknownCategory(tag))?;
            counts.insert(category, count as u64);
        }

        Ok(counts)
    }
}
