//! The theme -> file crawl pipeline.
//!
//! Strictly sequential: one theme at a time, one file page at a time. A
//! failed theme fetch skips that theme; any error on a single file page is
//! logged with its URL and skips only that page.

use anyhow::Context;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::ident::{document_id, safe_filename};
use crate::models::DocumentRecord;
use crate::scrape::{discover_file_links, extract_detail, Fetch};
use crate::storage::{persist_document, BlobStore, DocumentStore};

/// Origin all discovered relative links are resolved against.
pub const BASE_URL: &str = "https://www.europarl.europa.eu";

/// The six legislative-train theme pages this scraper watches.
pub const THEMES: [&str; 6] = [
    "https://www.europarl.europa.eu/legislative-train/theme-a-european-green-deal",
    "https://www.europarl.europa.eu/legislative-train/theme-a-europe-fit-for-the-digital-age",
    "https://www.europarl.europa.eu/legislative-train/theme-an-economy-that-works-for-people",
    "https://www.europarl.europa.eu/legislative-train/theme-a-stronger-europe-in-the-world",
    "https://www.europarl.europa.eu/legislative-train/theme-promoting-our-european-way-of-life",
    "https://www.europarl.europa.eu/legislative-train/theme-a-new-push-for-european-democracy",
];

/// Counters for one pipeline run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// File pages fetched, extracted and persisted successfully.
    pub processed: u64,
    /// File pages skipped after a fetch, extraction or persistence failure.
    pub failed: u64,
    /// Theme pages that could not be fetched at all.
    pub themes_failed: u64,
}

/// Drives the full crawl across themes and file pages.
pub struct Pipeline<'a, F: Fetch> {
    fetcher: F,
    blob: &'a dyn BlobStore,
    store: &'a dyn DocumentStore,
}

impl<'a, F: Fetch> Pipeline<'a, F> {
    pub fn new(fetcher: F, blob: &'a dyn BlobStore, store: &'a dyn DocumentStore) -> Self {
        Self {
            fetcher,
            blob,
            store,
        }
    }

    /// Run the crawl over the given theme pages.
    pub async fn run(&self, themes: &[&str]) -> RunSummary {
        info!("Legislative train scraper started");
        let mut summary = RunSummary::default();

        for theme in themes {
            info!("Crawling theme: {}", theme);
            let Some(html) = self.fetcher.fetch(theme).await else {
                warn!("Skipping theme after failed fetch: {}", theme);
                summary.themes_failed += 1;
                continue;
            };

            let links = discover_file_links(&html, BASE_URL);
            info!("Discovered {} file pages under {}", links.len(), theme);

            for link in links {
                match self.process_file(&link, theme).await {
                    Ok(true) => summary.processed += 1,
                    Ok(false) => summary.failed += 1,
                    Err(e) => {
                        error!("Error processing {}: {:#}", link, e);
                        summary.failed += 1;
                    }
                }
            }
        }

        info!(
            "Scraper finished: {} processed, {} failed, {} themes skipped",
            summary.processed, summary.failed, summary.themes_failed
        );
        summary
    }

    /// Fetch, extract and persist a single file page.
    ///
    /// Returns `Ok(false)` when the page could not be fetched (already
    /// logged by the fetcher); persistence errors propagate to the caller.
    async fn process_file(&self, url: &str, theme: &str) -> anyhow::Result<bool> {
        let Some(html) = self.fetcher.fetch(url).await else {
            return Ok(false);
        };

        let (mut record, text) = build_record(&html, url, theme);
        persist_document(self.blob, self.store, &mut record, &text)
            .with_context(|| format!("persisting {}", url))?;

        info!("Processed: {:.30}", record.title);
        Ok(true)
    }
}

/// Extract a detail page and derive its identifiers into a record draft
/// plus the text body to store. `blob_storage_url` is filled in when the
/// blob is written.
pub fn build_record(html: &str, url: &str, theme: &str) -> (DocumentRecord, String) {
    let detail = extract_detail(html);
    let id = document_id(url);
    let blob_filename = safe_filename(&detail.title, &id);

    let record = DocumentRecord {
        id,
        title: detail.title,
        original_url: url.to_string(),
        oeil_link: detail.oeil_link,
        status: detail.status,
        theme_source: theme.to_string(),
        blob_storage_url: String::new(),
        blob_filename,
        scraped_at: Utc::now(),
    };
    (record, detail.text)
}
