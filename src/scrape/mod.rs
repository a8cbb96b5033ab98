//! Fetching and HTML extraction for legislative-train pages.

mod discover;
mod extract;
mod fetch;

pub use discover::discover_file_links;
pub use extract::extract_detail;
pub use fetch::{Fetch, HttpFetcher};
