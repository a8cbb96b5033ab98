//! Polite page fetching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, warn};

use crate::config::Settings;

/// Fetches a URL and yields its HTML body.
///
/// A failed fetch is a normal outcome, not an error: callers skip the URL.
#[async_trait]
pub trait Fetch {
    /// Fetch a page, returning `None` on non-200 status or transport failure.
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// HTTP fetcher with a fixed user agent and a polite delay before every
/// request.
pub struct HttpFetcher {
    client: Client,
    request_delay: Duration,
}

impl HttpFetcher {
    /// Build a fetcher from the configured user agent, timeout and delay.
    pub fn new(settings: &Settings) -> Self {
        let client = Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(Duration::from_secs(settings.request_timeout))
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            request_delay: Duration::from_millis(settings.request_delay_ms),
        }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        tokio::time::sleep(self.request_delay).await;

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Error fetching {}: {}", url, e);
                return None;
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            warn!("Failed to fetch {} (status {})", url, response.status().as_u16());
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                error!("Error reading body of {}: {}", url, e);
                None
            }
        }
    }
}
