//! Field extraction from file-detail pages.
//!
//! Each field is extracted independently and falls back to a default when
//! its structural anchor is missing; only a failed page fetch skips a file.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::models::ExtractedDetail;

/// Host of the OEIL procedure database, linked from most file pages.
const OEIL_HOST: &str = "oeil.secure.europarl.europa.eu";

/// Extract title, status, OEIL cross-reference and text body from a detail
/// page.
pub fn extract_detail(html: &str) -> ExtractedDetail {
    let document = Html::parse_document(html);

    ExtractedDetail {
        title: first_text(&document, "h1").unwrap_or_else(|| "Untitled".to_string()),
        status: first_text(&document, ".train-status").unwrap_or_else(|| "Unknown".to_string()),
        oeil_link: find_oeil_link(&document),
        text: extract_text_body(&document),
    }
}

/// Trimmed text of the first element matching `selector`, if any.
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    document
        .select(&selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Href of the first anchor pointing at the OEIL host.
///
/// Matched on the parsed host rather than a substring so a page mentioning
/// the domain in a path or query cannot produce a false positive.
fn find_oeil_link(document: &Html) -> Option<String> {
    let selector = Selector::parse("a[href]").expect("valid selector");
    document.select(&selector).find_map(|element| {
        let href = element.value().attr("href")?;
        let url = Url::parse(href).ok()?;
        (url.host_str() == Some(OEIL_HOST)).then(|| href.to_string())
    })
}

/// Concatenate the visible text of every section, text block and paragraph,
/// in document order, skipping empty ones.
///
/// The selection deliberately over-captures (a paragraph inside a section is
/// seen at both granularities): for legislative text, missing content is
/// worse than duplicated content.
fn extract_text_body(document: &Html) -> String {
    let selector = Selector::parse("section, div.text-block, p").expect("valid selector");
    let blocks: Vec<String> = document
        .select(&selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect();
    blocks.join("\n")
}

/// Visible text of an element: text nodes trimmed and joined with spaces.
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_page_extraction() {
        let html = r#"
            <html><body>
                <h1>  Fit for 55  </h1>
                <div class="train-status">Procedure completed</div>
                <a href="https://oeil.secure.europarl.europa.eu/oeil/popups/ficheprocedure.do?reference=2021/0201(COD)">OEIL</a>
                <section>Summary of the proposal.</section>
                <p>First paragraph.</p>
            </body></html>
        "#;
        let detail = extract_detail(html);
        assert_eq!(detail.title, "Fit for 55");
        assert_eq!(detail.status, "Procedure completed");
        assert_eq!(
            detail.oeil_link.as_deref(),
            Some("https://oeil.secure.europarl.europa.eu/oeil/popups/ficheprocedure.do?reference=2021/0201(COD)")
        );
        assert!(detail.text.contains("Summary of the proposal."));
        assert!(detail.text.contains("First paragraph."));
    }

    #[test]
    fn test_missing_h1_defaults_title() {
        let detail = extract_detail("<html><body><p>body</p></body></html>");
        assert_eq!(detail.title, "Untitled");
    }

    #[test]
    fn test_missing_status_defaults_unknown() {
        let detail = extract_detail("<html><body><h1>T</h1></body></html>");
        assert_eq!(detail.status, "Unknown");
    }

    #[test]
    fn test_missing_oeil_anchor_is_none() {
        let html = r#"<a href="https://example.com/page">not oeil</a>"#;
        assert_eq!(extract_detail(html).oeil_link, None);
    }

    #[test]
    fn test_oeil_host_must_match_not_substring() {
        // Host lookalike and domain-in-path must not match
        let html = r#"
            <a href="https://evil.example/oeil.secure.europarl.europa.eu">path</a>
            <a href="https://oeil.secure.europarl.europa.eu.evil.example/x">suffix</a>
        "#;
        assert_eq!(extract_detail(html).oeil_link, None);
    }

    #[test]
    fn test_first_oeil_anchor_wins() {
        let html = r#"
            <a href="https://oeil.secure.europarl.europa.eu/first">a</a>
            <a href="https://oeil.secure.europarl.europa.eu/second">b</a>
        "#;
        assert_eq!(
            extract_detail(html).oeil_link.as_deref(),
            Some("https://oeil.secure.europarl.europa.eu/first")
        );
    }

    #[test]
    fn test_text_body_skips_empty_blocks_and_joins_with_newline() {
        let html = r#"
            <section>One</section>
            <p>   </p>
            <div class="text-block">Two</div>
            <p>Three</p>
        "#;
        let detail = extract_detail(html);
        assert_eq!(detail.text, "One\nTwo\nThree");
    }

    #[test]
    fn test_text_body_overlapping_regions_captured_twice() {
        let html = "<section><p>Nested</p></section>";
        let detail = extract_detail(html);
        // Captured once via the section, once via the paragraph
        assert_eq!(detail.text, "Nested\nNested");
    }

    #[test]
    fn test_relative_hrefs_do_not_panic_oeil_matching() {
        let html = r#"<a href="/legislative-train/theme-x/file-1">rel</a><h1>T</h1>"#;
        assert_eq!(extract_detail(html).oeil_link, None);
    }
}
