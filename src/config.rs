//! Runtime settings, loaded once at startup and passed into the pipeline.
//!
//! All environment access happens here; pipeline components never read
//! ambient state.

use std::fs;
use std::path::PathBuf;

/// Default sqlite database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "legislative.db";

/// Default blob container (directory) name.
pub const DEFAULT_BLOB_CONTAINER: &str = "scraped-text";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory (database and blob containers live here).
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// Blob container name (a directory under the data dir).
    pub blob_container: String,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Polite delay between requests in milliseconds.
    pub request_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        // Default to ~/Documents/legiscrape for user data
        // Falls back gracefully: Documents dir -> Home dir -> Current dir
        let data_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("legiscrape");

        Self {
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            blob_container: DEFAULT_BLOB_CONTAINER.to_string(),
            user_agent: "Mozilla/5.0 (compatible; legiscrape/0.1)".to_string(),
            request_timeout: 30,
            request_delay_ms: 500,
        }
    }
}

impl Settings {
    /// Load settings: defaults, then environment overrides, then an optional
    /// explicit data directory (from the CLI) with highest precedence.
    pub fn load(data_dir_override: Option<PathBuf>) -> Self {
        let mut settings = Self::default();

        if let Some(dir) = env_var("LEGISCRAPE_DATA_DIR") {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(database) = env_var("LEGISCRAPE_DATABASE") {
            settings.database_filename = database;
        }
        if let Some(container) = env_var("LEGISCRAPE_BLOB_CONTAINER") {
            settings.blob_container = container;
        }
        if let Some(agent) = env_var("LEGISCRAPE_USER_AGENT") {
            settings.user_agent = agent;
        }
        if let Some(timeout) = env_var("LEGISCRAPE_REQUEST_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                settings.request_timeout = secs;
            }
        }
        if let Some(delay) = env_var("LEGISCRAPE_REQUEST_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                settings.request_delay_ms = ms;
            }
        }

        if let Some(dir) = data_dir_override {
            settings.data_dir = dir;
        }

        settings
    }

    /// Full path to the sqlite database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Full path to the blob container directory.
    pub fn blob_container_dir(&self) -> PathBuf {
        self.data_dir.join(&self.blob_container)
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create data directory '{}': {}",
                    self.data_dir.display(),
                    e
                ),
            )
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
