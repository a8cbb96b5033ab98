//! Blob and metadata stores, and the write path that ties them together.

mod blob;
mod sqlite;

pub use blob::FsBlobStore;
pub use sqlite::SqliteDocumentStore;

use crate::models::DocumentRecord;

/// Errors from either store backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("database connection error: {0}")]
    Connection(#[from] diesel::result::ConnectionError),
    #[error("blob store i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Object store holding one text blob per scraped document.
pub trait BlobStore {
    /// Create the container if it does not exist yet.
    fn ensure_container(&self) -> Result<(), StorageError>;

    /// Write a text blob under `name`, overwriting any previous content.
    /// Returns the blob's storage URL.
    fn put_text(&self, name: &str, text: &str) -> Result<String, StorageError>;

    /// Read a blob back, if present.
    fn get_text(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Whether a blob with this name exists.
    fn exists(&self, name: &str) -> Result<bool, StorageError>;
}

/// Metadata store keyed by document id.
pub trait DocumentStore {
    /// Insert the record, or replace the existing record with the same id.
    fn upsert(&self, record: &DocumentRecord) -> Result<(), StorageError>;

    /// Fetch one record by id.
    fn get(&self, id: &str) -> Result<Option<DocumentRecord>, StorageError>;

    /// All records, in id order.
    fn list(&self) -> Result<Vec<DocumentRecord>, StorageError>;

    /// Number of stored records.
    fn count(&self) -> Result<i64, StorageError>;
}

/// Write a document's text blob, then upsert its metadata record.
///
/// The two writes are not atomic: if the upsert fails after the blob write,
/// the blob stays behind as an orphan until the next successful run for the
/// same URL repeats both writes.
pub fn persist_document(
    blob: &dyn BlobStore,
    store: &dyn DocumentStore,
    record: &mut DocumentRecord,
    text: &str,
) -> Result<(), StorageError> {
    record.blob_storage_url = blob.put_text(&record.blob_filename, text)?;
    store.upsert(record)?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::{MemoryBlobStore, MemoryDocumentStore};
    use super::*;
    use chrono::Utc;

    fn record(id: &str) -> DocumentRecord {
        DocumentRecord {
            id: id.to_string(),
            title: "Title".to_string(),
            original_url: "https://example.com".to_string(),
            oeil_link: None,
            status: "Unknown".to_string(),
            theme_source: "theme".to_string(),
            blob_storage_url: String::new(),
            blob_filename: format!("{}.txt", id),
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn test_persist_writes_blob_then_record() {
        let blob = MemoryBlobStore::default();
        let store = MemoryDocumentStore::default();
        let mut rec = record("abc");

        persist_document(&blob, &store, &mut rec, "body text").unwrap();

        assert_eq!(rec.blob_storage_url, "memory://abc.txt");
        assert_eq!(blob.get_text("abc.txt").unwrap().as_deref(), Some("body text"));
        assert_eq!(store.get("abc").unwrap().unwrap().blob_storage_url, "memory://abc.txt");
    }

    #[test]
    fn test_failed_upsert_leaves_orphan_blob() {
        let blob = MemoryBlobStore::default();
        let store = MemoryDocumentStore::default();
        store.fail_on("abc");
        let mut rec = record("abc");

        assert!(persist_document(&blob, &store, &mut rec, "body").is_err());

        // The blob write happened first and is not rolled back
        assert!(blob.exists("abc.txt").unwrap());
        assert!(store.get("abc").unwrap().is_none());
    }
}
