//! Stable identifiers and blob names for scraped pages.

use sha2::{Digest, Sha256};

/// Maximum length of the sanitized title portion of a blob name.
const FILENAME_TITLE_LIMIT: usize = 100;

/// Derive the document id for a detail-page URL.
///
/// SHA-256 of the raw URL bytes truncated to 128 bits, lowercase hex.
/// The id depends on the URL alone, so the same page maps to the same
/// record on every run.
pub fn document_id(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hex::encode(&hasher.finalize()[..16])
}

/// Derive the blob filename for a document from its title and id.
///
/// Runs of characters outside `[A-Za-z0-9_-]` collapse to a single
/// underscore, the result is capped at 100 characters, and the first six
/// hex characters of the id are appended so distinct documents with the
/// same title never collide.
pub fn safe_filename(title: &str, id: &str) -> String {
    let mut sanitized = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            sanitized.push(c);
        } else if !sanitized.ends_with('_') {
            sanitized.push('_');
        }
    }
    sanitized.truncate(FILENAME_TITLE_LIMIT);
    format!("{}_{}.txt", sanitized, &id[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_is_deterministic() {
        let url = "https://www.europarl.europa.eu/legislative-train/theme-x/file-1";
        assert_eq!(document_id(url), document_id(url));
    }

    #[test]
    fn test_document_id_is_128_bit_lowercase_hex() {
        let id = document_id("https://example.com/a");
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_document_id_distinct_urls_distinct_ids() {
        let urls = [
            "https://www.europarl.europa.eu/legislative-train/theme-a/file-1",
            "https://www.europarl.europa.eu/legislative-train/theme-a/file-2",
            "https://www.europarl.europa.eu/legislative-train/theme-b/file-1",
            "https://www.europarl.europa.eu/legislative-train/theme-b/file-1?x=1",
        ];
        let ids: std::collections::HashSet<_> = urls.iter().map(|u| document_id(u)).collect();
        assert_eq!(ids.len(), urls.len());
    }

    #[test]
    fn test_safe_filename_sanitizes_and_suffixes() {
        let id = document_id("https://example.com/fit-for-55");
        let name = safe_filename("Fit for 55: Reg. (EU) 2021/1119!", &id);

        let stem = name.strip_suffix(".txt").unwrap();
        let (title_part, hash_part) = stem.rsplit_once('_').unwrap();
        assert_eq!(hash_part, &id[..6]);
        assert!(title_part.len() <= 100);
        assert!(title_part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        // Runs of punctuation collapse into one underscore
        assert_eq!(title_part, "Fit_for_55_Reg_EU_2021_1119_");
    }

    #[test]
    fn test_safe_filename_truncates_long_titles() {
        let id = document_id("https://example.com/long");
        let name = safe_filename(&"a".repeat(300), &id);
        assert_eq!(name, format!("{}_{}.txt", "a".repeat(100), &id[..6]));
    }

    #[test]
    fn test_safe_filename_empty_title() {
        let id = document_id("https://example.com/empty");
        assert_eq!(safe_filename("", &id), format!("_{}.txt", &id[..6]));
    }
}
