//! legiscrape - scheduled scraper for the European Parliament legislative train.
//!
//! Walks the fixed set of legislative-train theme pages, extracts metadata
//! and full text from every file-detail page, stores the text as blobs and
//! upserts the metadata records keyed by a URL-derived id.

mod cli;
mod config;
mod ident;
mod models;
mod pipeline;
mod schedule;
mod schema;
mod scrape;
mod storage;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "legiscrape=info"
    } else {
        "legiscrape=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    cli::run().await
}
