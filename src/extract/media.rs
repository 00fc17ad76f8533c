use crate::extract::{css_classes, in_stripped_subtree};
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

/// Alt text recorded when an image has no `alt` attribute
///
/// The sentinel (rather than an empty string) is significant: the report
/// layer treats it as a content marker for images without alternative text.
const NO_ALT_TEXT: &str = "No alt text";

/// One `<img>` extracted from a page, with its resolved absolute source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRecord {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub width: String,
    pub height: String,
    pub loading: String,
    pub css_classes: Vec<String>,
}

/// Extracts all image records from the document
///
/// Relative sources are resolved against `page_url`. Returns the records plus
/// the count of images whose source could not be resolved.
pub fn extract_images(document: &Html, page_url: &Url) -> (Vec<ImageRecord>, u32) {
    let Ok(selector) = Selector::parse("img[src]") else {
        return (Vec::new(), 0);
    };

    let mut images = Vec::new();
    let mut skipped = 0;

    for el in document.select(&selector) {
        if in_stripped_subtree(&el) {
            continue;
        }

        let Some(src) = el.value().attr("src") else {
            continue;
        };
        let src = src.trim();
        if src.is_empty() {
            continue;
        }

        let resolved = match page_url.join(src) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping unresolvable image src '{}': {}", src, e);
                skipped += 1;
                continue;
            }
        };

        let attr = |name: &str| el.value().attr(name).unwrap_or("").to_string();

        images.push(ImageRecord {
            src: resolved.to_string(),
            alt: el.value().attr("alt").unwrap_or(NO_ALT_TEXT).to_string(),
            title: attr("title"),
            width: attr("width"),
            height: attr("height"),
            loading: attr("loading"),
            css_classes: css_classes(&el),
        });
    }

    (images, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.com/gallery/").unwrap()
    }

    fn extract(html: &str) -> (Vec<ImageRecord>, u32) {
        let document = Html::parse_document(html);
        extract_images(&document, &page_url())
    }

    #[test]
    fn test_relative_src_resolved() {
        let (images, _) = extract(r#"<html><body><img src="photo.jpg"></body></html>"#);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].src, "https://example.com/gallery/photo.jpg");
    }

    #[test]
    fn test_missing_alt_gets_sentinel() {
        let (images, _) = extract(r#"<html><body><img src="/a.png"></body></html>"#);
        assert_eq!(images[0].alt, "No alt text");
    }

    #[test]
    fn test_empty_alt_kept_verbatim() {
        // An explicitly empty alt attribute is a deliberate author choice
        // (decorative image) and is preserved, not replaced by the sentinel.
        let (images, _) = extract(r#"<html><body><img src="/a.png" alt=""></body></html>"#);
        assert_eq!(images[0].alt, "");
    }

    #[test]
    fn test_dimension_and_loading_attributes() {
        let (images, _) = extract(
            r#"<html><body><img src="/a.png" alt="A" width="640" height="480" loading="lazy" class="hero wide"></body></html>"#,
        );
        let img = &images[0];
        assert_eq!(img.alt, "A");
        assert_eq!(img.width, "640");
        assert_eq!(img.height, "480");
        assert_eq!(img.loading, "lazy");
        assert_eq!(img.css_classes, vec!["hero", "wide"]);
    }

    #[test]
    fn test_missing_attributes_default_to_empty() {
        let (images, _) = extract(r#"<html><body><img src="/a.png"></body></html>"#);
        let img = &images[0];
        assert_eq!(img.title, "");
        assert_eq!(img.width, "");
        assert_eq!(img.height, "");
        assert_eq!(img.loading, "");
        assert!(img.css_classes.is_empty());
    }

    #[test]
    fn test_unresolvable_src_counted_as_skipped() {
        let (images, skipped) = extract(
            r#"<html><body><img src="http://[bad"><img src="/good.png"></body></html>"#,
        );
        assert_eq!(images.len(), 1);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_header_images_ignored() {
        let (images, _) = extract(
            r#"<html><body><header><img src="/logo.png"></header><img src="/content.png"></body></html>"#,
        );
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].src, "https://example.com/content.png");
    }
}
