use crate::extract::{in_stripped_subtree, visible_text};
use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::BTreeMap;

/// Heading texts per level, h1 through h6
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

impl Headings {
    /// Total number of headings across all levels
    pub fn count(&self) -> usize {
        self.h1.len()
            + self.h2.len()
            + self.h3.len()
            + self.h4.len()
            + self.h5.len()
            + self.h6.len()
    }
}

/// Extracts the heading structure of the document
///
/// Only trimmed, non-empty heading texts are kept.
pub fn extract_headings(document: &Html) -> Headings {
    let mut headings = Headings::default();

    for (level, bucket) in [
        ("h1", &mut headings.h1),
        ("h2", &mut headings.h2),
        ("h3", &mut headings.h3),
        ("h4", &mut headings.h4),
        ("h5", &mut headings.h5),
        ("h6", &mut headings.h6),
    ] {
        let Ok(selector) = Selector::parse(level) else {
            continue;
        };

        bucket.extend(
            document
                .select(&selector)
                .filter(|el| !in_stripped_subtree(el))
                .map(|el| visible_text(&el).trim().to_string())
                .filter(|text| !text.is_empty()),
        );
    }

    headings
}

/// Extracts `<meta>` tags keyed by their `name` or `property` attribute
///
/// `name` wins when both are present; tags with no usable key or no content
/// are skipped. Later tags with the same key overwrite earlier ones.
pub fn extract_metadata(document: &Html) -> BTreeMap<String, String> {
    let Ok(selector) = Selector::parse("meta") else {
        return BTreeMap::new();
    };

    let mut metadata = BTreeMap::new();

    for el in document.select(&selector) {
        if in_stripped_subtree(&el) {
            continue;
        }

        let key = el
            .value()
            .attr("name")
            .or_else(|| el.value().attr("property"));

        let (Some(key), Some(content)) = (key, el.value().attr("content")) else {
            continue;
        };

        if key.is_empty() || content.is_empty() {
            continue;
        }

        metadata.insert(key.to_string(), content.to_string());
    }

    metadata
}
