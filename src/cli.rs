//! CLI commands implementation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing::error;

use crate::config::Settings;
use crate::pipeline::{Pipeline, RunSummary, THEMES};
use crate::schedule::{self, DEFAULT_RUN_HOUR};
use crate::scrape::HttpFetcher;
use crate::storage::{BlobStore, DocumentStore, FsBlobStore, SqliteDocumentStore};

#[derive(Parser)]
#[command(name = "legiscrape")]
#[command(about = "Scrape European Parliament legislative-train documents")]
#[command(version)]
pub struct Cli {
    /// Data directory (database and blob containers)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory, blob container and database
    Init,

    /// Run the crawl once, now
    Run,

    /// Run the crawl daily at a fixed UTC hour
    Schedule {
        /// Hour of day (UTC) to fire at
        #[arg(long, default_value_t = DEFAULT_RUN_HOUR, value_parser = clap::value_parser!(u32).range(0..24))]
        hour: u32,
    },

    /// Show store locations and record count
    Status,

    /// Print all metadata records as JSON lines
    Export,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.data_dir.clone());

    match cli.command {
        Commands::Init => {
            let _ = open_stores(&settings)?;
            println!(
                "{} data directory at {}",
                style("Initialized").green(),
                settings.data_dir.display()
            );
            Ok(())
        }
        Commands::Run => {
            let summary = run_once(&settings).await?;
            print_summary(&summary);
            Ok(())
        }
        Commands::Schedule { hour } => {
            loop {
                schedule::wait_until_next_run(hour).await;
                match run_once(&settings).await {
                    Ok(summary) => print_summary(&summary),
                    Err(e) => error!("Scheduled run failed: {:#}", e),
                }
            }
        }
        Commands::Status => status(&settings),
        Commands::Export => export(&settings),
    }
}

/// Construct both store clients.
///
/// Failure here is fatal for the run: the caller logs and aborts with no
/// items processed.
fn open_stores(settings: &Settings) -> anyhow::Result<(FsBlobStore, SqliteDocumentStore)> {
    settings.ensure_directories()?;

    let blob = FsBlobStore::new(settings.blob_container_dir());
    blob.ensure_container()?;

    let store = SqliteDocumentStore::open(&settings.database_path().to_string_lossy())?;
    Ok((blob, store))
}

async fn run_once(settings: &Settings) -> anyhow::Result<RunSummary> {
    let (blob, store) = match open_stores(settings) {
        Ok(stores) => stores,
        Err(e) => {
            error!("Failed to initialize stores: {:#}", e);
            return Err(e);
        }
    };

    let fetcher = HttpFetcher::new(settings);
    let pipeline = Pipeline::new(fetcher, &blob, &store);
    Ok(pipeline.run(&THEMES).await)
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} {} processed, {} failed, {} themes skipped",
        style("Done:").green().bold(),
        summary.processed,
        summary.failed,
        summary.themes_failed
    );
}

fn status(settings: &Settings) -> anyhow::Result<()> {
    let (_, store) = open_stores(settings)?;
    println!("Data directory:  {}", settings.data_dir.display());
    println!("Database:        {}", settings.database_path().display());
    println!("Blob container:  {}", settings.blob_container_dir().display());
    println!("Records:         {}", store.count()?);
    Ok(())
}

fn export(settings: &Settings) -> anyhow::Result<()> {
    let (_, store) = open_stores(settings)?;
    for record in store.list()? {
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(())
}
