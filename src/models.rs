//! Record types for scraped legislative files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted unit: metadata for one legislative file, keyed by a
/// URL-derived id so re-runs upsert instead of duplicating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Deterministic id derived from `original_url` alone.
    pub id: String,
    /// Page title ("Untitled" when the page has no h1).
    pub title: String,
    /// The file-detail page this record was scraped from.
    pub original_url: String,
    /// Cross-reference into the OEIL procedure database, when present.
    pub oeil_link: Option<String>,
    /// Free-text procedure status ("Unknown" when not shown).
    pub status: String,
    /// The theme page this file was discovered under.
    pub theme_source: String,
    /// Location of the stored text blob.
    pub blob_storage_url: String,
    /// Blob name the text was stored under.
    pub blob_filename: String,
    /// When this run scraped the page.
    pub scraped_at: DateTime<Utc>,
}

/// Fields extracted from a detail page before identifiers are derived.
///
/// Every field is independently defaulted; a missing structural anchor never
/// aborts extraction of the others.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDetail {
    pub title: String,
    pub status: String,
    pub oeil_link: Option<String>,
    pub text: String,
}
