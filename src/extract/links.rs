use crate::extract::{css_classes, in_stripped_subtree, visible_text};
use crate::url::same_host;
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

/// Maximum number of characters kept from a link's text
const MAX_LINK_TEXT_CHARS: usize = 200;

/// Schemes that never become link records
const EXCLUDED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:"];

/// One anchor extracted from a page, with its resolved absolute URL
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkRecord {
    pub text: String,
    pub url: String,
    pub title: String,
    pub is_external: bool,
    pub element_id: String,
    pub css_classes: Vec<String>,
}

/// Extracts all link records from the document
///
/// Relative hrefs are resolved against `page_url`; only http(s) results are
/// kept. `is_external` compares the resolved host against the page's own
/// host. Returns the records plus the count of anchors whose href could not
/// be resolved.
pub fn extract_links(document: &Html, page_url: &Url) -> (Vec<LinkRecord>, u32) {
    let Ok(selector) = Selector::parse("a[href]") else {
        return (Vec::new(), 0);
    };

    let mut links = Vec::new();
    let mut skipped = 0;

    for el in document.select(&selector) {
        if in_stripped_subtree(&el) {
            continue;
        }

        let Some(href) = el.value().attr("href") else {
            continue;
        };
        let href = href.trim();

        if href.is_empty() || has_excluded_scheme(href) {
            continue;
        }

        let resolved = match page_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping unresolvable href '{}': {}", href, e);
                skipped += 1;
                continue;
            }
        };

        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            continue;
        }

        let text: String = visible_text(&el)
            .trim()
            .chars()
            .take(MAX_LINK_TEXT_CHARS)
            .collect();

        links.push(LinkRecord {
            text,
            is_external: !same_host(&resolved, page_url),
            url: resolved.to_string(),
            title: el.value().attr("title").unwrap_or("").to_string(),
            element_id: el.value().attr("id").unwrap_or("").to_string(),
            css_classes: css_classes(&el),
        });
    }

    (links, skipped)
}

fn has_excluded_scheme(href: &str) -> bool {
    EXCLUDED_SCHEMES
        .iter()
        .any(|scheme| href.starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.com/docs/page").unwrap()
    }

    fn extract(html: &str) -> (Vec<LinkRecord>, u32) {
        let document = Html::parse_document(html);
        extract_links(&document, &page_url())
    }

    #[test]
    fn test_relative_href_resolved_against_page() {
        let (links, _) = extract(r#"<html><body><a href="/about">About</a></body></html>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://example.com/about");
        assert!(!links[0].is_external);
    }

    #[test]
    fn test_external_link_flagged() {
        let (links, _) =
            extract(r#"<html><body><a href="https://other.com/page">Other</a></body></html>"#);
        assert_eq!(links.len(), 1);
        assert!(links[0].is_external);
    }

    #[test]
    fn test_javascript_mailto_tel_excluded() {
        let (links, skipped) = extract(
            r#"<html><body>
                <a href="javascript:void(0)">JS</a>
                <a href="mailto:a@example.com">Mail</a>
                <a href="tel:+1234567890">Call</a>
                <a href="/kept">Kept</a>
            </body></html>"#,
        );
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://example.com/kept");
        // Excluded schemes are policy skips, not failures
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_unresolvable_href_counted_as_skipped() {
        let (links, skipped) = extract(
            r#"<html><body>
                <a href="http://[invalid">Broken</a>
                <a href="/fine">Fine</a>
            </body></html>"#,
        );
        assert_eq!(links.len(), 1);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_non_http_result_dropped() {
        let (links, _) = extract(r#"<html><body><a href="ftp://files.example.com/f">FTP</a></body></html>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_link_text_truncated_to_200_chars() {
        let long_text = "x".repeat(450);
        let html = format!(r#"<html><body><a href="/a">{}</a></body></html>"#, long_text);
        let (links, _) = extract(&html);
        assert_eq!(links[0].text.chars().count(), 200);
    }

    #[test]
    fn test_attributes_captured() {
        let (links, _) = extract(
            r#"<html><body><a href="/a" title="A page" id="main-link" class="btn btn-primary">Go</a></body></html>"#,
        );
        assert_eq!(links[0].title, "A page");
        assert_eq!(links[0].element_id, "main-link");
        assert_eq!(links[0].css_classes, vec!["btn", "btn-primary"]);
    }

    #[test]
    fn test_missing_attributes_default_to_empty() {
        let (links, _) = extract(r#"<html><body><a href="/a">Go</a></body></html>"#);
        assert_eq!(links[0].title, "");
        assert_eq!(links[0].element_id, "");
        assert!(links[0].css_classes.is_empty());
    }

    #[test]
    fn test_fragment_link_resolves_to_page_itself() {
        // Fragment-only hrefs resolve to the page URL plus fragment and are
        // kept; dedup happens at the frontier, not here.
        let (links, _) = extract(r##"<html><body><a href="#section">Jump</a></body></html>"##);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://example.com/docs/page#section");
    }

    #[test]
    fn test_nav_links_ignored() {
        let (links, _) = extract(
            r#"<html><body><nav><a href="/home">Home</a></nav><a href="/body-link">Body</a></body></html>"#,
        );
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://example.com/body-link");
    }

    #[test]
    fn test_same_host_different_port_is_external() {
        let page = Url::parse("http://127.0.0.1:8080/").unwrap();
        let document = Html::parse_document(
            r#"<html><body><a href="http://127.0.0.1:9090/x">Other port</a></body></html>"#,
        );
        let (links, _) = extract_links(&document, &page);
        // Host comparison ignores ports; same address on a different port is
        // still the same host.
        assert!(!links[0].is_external);
    }
}
