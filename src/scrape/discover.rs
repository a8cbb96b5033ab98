//! File-detail link discovery on theme pages.

use std::collections::HashSet;

use scraper::{Html, Selector};

/// Path prefix every legislative-train file page lives under.
const THEME_PATH_PREFIX: &str = "/legislative-train/theme-";

/// Extract the set of absolute file-detail URLs referenced by a theme page.
///
/// Anchors are matched on a `/file-` href substring, then filtered to the
/// theme path prefix to reject unrelated links elsewhere on the page.
/// Duplicate hrefs collapse; an empty or linkless page yields an empty set.
pub fn discover_file_links(html: &str, base_url: &str) -> HashSet<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href*='/file-']").expect("valid selector");

    let mut links = HashSet::new();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if href.starts_with(THEME_PATH_PREFIX) {
                links.insert(format!("{}{}", base_url, href));
            }
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.europarl.europa.eu";

    #[test]
    fn test_filters_to_theme_file_links() {
        let html = r#"
            <html><body>
                <a href="/legislative-train/theme-x/file-1">file one</a>
                <a href="/other/file-2">elsewhere</a>
                <a href="/legislative-train/theme-x/not-a-file">theme page</a>
            </body></html>
        "#;
        let links = discover_file_links(html, BASE);
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://www.europarl.europa.eu/legislative-train/theme-x/file-1"));
    }

    #[test]
    fn test_duplicate_hrefs_collapse() {
        let html = r#"
            <a href="/legislative-train/theme-x/file-1">first</a>
            <a href="/legislative-train/theme-x/file-1">second</a>
        "#;
        let links = discover_file_links(html, BASE);
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_empty_page_yields_empty_set() {
        assert!(discover_file_links("<html><body></body></html>", BASE).is_empty());
        assert!(discover_file_links("", BASE).is_empty());
    }

    #[test]
    fn test_multiple_files_all_discovered() {
        let html = r#"
            <a href="/legislative-train/theme-a/file-1">one</a>
            <a href="/legislative-train/theme-a/file-2">two</a>
            <a href="/legislative-train/theme-b/file-3">three</a>
        "#;
        let links = discover_file_links(html, BASE);
        assert_eq!(links.len(), 3);
    }
}
