//! SQLite-backed metadata store.
//!
//! One `documents` table keyed by the URL-derived id; writes are upserts so
//! re-running the pipeline replaces records instead of duplicating them.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::{DocumentStore, StorageError};
use crate::models::DocumentRecord;
use crate::schema::documents;

const CREATE_DOCUMENTS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS documents (
        id TEXT PRIMARY KEY NOT NULL,
        title TEXT NOT NULL,
        original_url TEXT NOT NULL,
        oeil_link TEXT,
        status TEXT NOT NULL,
        theme_source TEXT NOT NULL,
        blob_storage_url TEXT NOT NULL,
        blob_filename TEXT NOT NULL,
        scraped_at TEXT NOT NULL
    )
";

/// Database row shape; timestamps are stored as RFC 3339 text.
#[derive(Debug, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = documents)]
#[diesel(treat_none_as_null = true)]
struct DocumentRow {
    id: String,
    title: String,
    original_url: String,
    oeil_link: Option<String>,
    status: String,
    theme_source: String,
    blob_storage_url: String,
    blob_filename: String,
    scraped_at: String,
}

impl From<&DocumentRecord> for DocumentRow {
    fn from(record: &DocumentRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            original_url: record.original_url.clone(),
            oeil_link: record.oeil_link.clone(),
            status: record.status.clone(),
            theme_source: record.theme_source.clone(),
            blob_storage_url: record.blob_storage_url.clone(),
            blob_filename: record.blob_filename.clone(),
            scraped_at: record.scraped_at.to_rfc3339(),
        }
    }
}

impl DocumentRow {
    fn into_record(self) -> Result<DocumentRecord, StorageError> {
        let scraped_at = DateTime::parse_from_rfc3339(&self.scraped_at)
            .map_err(|e| {
                StorageError::Database(diesel::result::Error::DeserializationError(Box::new(e)))
            })?
            .with_timezone(&Utc);

        Ok(DocumentRecord {
            id: self.id,
            title: self.title,
            original_url: self.original_url,
            oeil_link: self.oeil_link,
            status: self.status,
            theme_source: self.theme_source,
            blob_storage_url: self.blob_storage_url,
            blob_filename: self.blob_filename,
            scraped_at,
        })
    }
}

/// Metadata store over a single sqlite connection.
///
/// The pipeline is strictly sequential, so one mutex-guarded connection is
/// all the pooling this needs.
pub struct SqliteDocumentStore {
    conn: Mutex<SqliteConnection>,
}

impl SqliteDocumentStore {
    /// Open (creating if needed) the database at `database_url` and ensure
    /// the documents table exists.
    pub fn open(database_url: &str) -> Result<Self, StorageError> {
        let mut conn = SqliteConnection::establish(database_url)?;
        diesel::sql_query(CREATE_DOCUMENTS_TABLE).execute(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn upsert(&self, record: &DocumentRecord) -> Result<(), StorageError> {
        let row = DocumentRow::from(record);
        let mut conn = self.conn.lock().expect("store mutex poisoned");
        diesel::insert_into(documents::table)
            .values(&row)
            .on_conflict(documents::id)
            .do_update()
            .set(&row)
            .execute(&mut *conn)?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<DocumentRecord>, StorageError> {
        let mut conn = self.conn.lock().expect("store mutex poisoned");
        let row: Option<DocumentRow> = documents::table
            .find(id)
            .select(DocumentRow::as_select())
            .first(&mut *conn)
            .optional()?;
        row.map(DocumentRow::into_record).transpose()
    }

    fn list(&self) -> Result<Vec<DocumentRecord>, StorageError> {
        let mut conn = self.conn.lock().expect("store mutex poisoned");
        let rows: Vec<DocumentRow> = documents::table
            .order(documents::id.asc())
            .select(DocumentRow::as_select())
            .load(&mut *conn)?;
        rows.into_iter().map(DocumentRow::into_record).collect()
    }

    fn count(&self) -> Result<i64, StorageError> {
        let mut conn = self.conn.lock().expect("store mutex poisoned");
        Ok(documents::table.count().get_result(&mut *conn)?)
    }
}
