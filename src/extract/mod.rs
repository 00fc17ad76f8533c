//! Extraction module: raw markup to typed page records
//!
//! This module turns a fetched page's HTML into an immutable [`PageRecord`].
//! Extraction is a pure transform over the parsed document; it holds no crawl
//! state and performs no network access. Content inside `<script>`, `<style>`,
//! `<nav>`, `<footer>`, and `<header>` subtrees never contributes to any
//! extracted field.
//!
//! Each content type is extracted independently: a malformed element is
//! skipped and counted, and a failure in one content type (e.g. tables) never
//! prevents extraction of another (e.g. images).

mod forms;
mod links;
mod media;
mod meta;
mod tables;
mod text;

pub use forms::{FormInput, FormRecord};
pub use links::LinkRecord;
pub use media::ImageRecord;
pub use meta::Headings;
pub use tables::TableRecord;
pub use text::{ListRecord, TextContent};

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

/// Tags whose subtrees are excluded from all extraction
const STRIPPED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Title used when the document has no usable `<title>` element
const NO_TITLE: &str = "No Title";

/// The complete structured extraction result for one fetched page
///
/// Immutable once produced; the crawl result set shares these read-only with
/// the report synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub text_content: TextContent,
    pub links: Vec<LinkRecord>,
    pub images: Vec<ImageRecord>,
    pub tables: Vec<TableRecord>,
    pub forms: Vec<FormRecord>,
    pub headings: Headings,
    pub metadata: BTreeMap<String, String>,
    pub timestamp: DateTime<Utc>,
}

/// Counts of elements dropped because their data was malformed or unresolvable
///
/// Policy exclusions (short paragraphs, `javascript:` hrefs, non-HTTP schemes)
/// are not failures and are not counted here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub skipped_links: u32,
    pub skipped_images: u32,
}

impl ExtractStats {
    /// Total number of skipped elements across all content types
    pub fn total(&self) -> u32 {
        self.skipped_links + self.skipped_images
    }
}

/// Extracts a [`PageRecord`] from a fetched page's HTML
///
/// `page_url` is the URL the markup was fetched from; relative links and image
/// sources are resolved against it, and link externality is computed against
/// its host.
pub fn extract_page(page_url: &Url, html: &str) -> (PageRecord, ExtractStats) {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let text_content = text::extract_text_content(&document);
    let (links, skipped_links) = links::extract_links(&document, page_url);
    let (images, skipped_images) = media::extract_images(&document, page_url);
    let tables = tables::extract_tables(&document);
    let forms = forms::extract_forms(&document);
    let headings = meta::extract_headings(&document);
    let metadata = meta::extract_metadata(&document);

    let record = PageRecord {
        url: page_url.to_string(),
        title,
        text_content,
        links,
        images,
        tables,
        forms,
        headings,
        metadata,
        timestamp: Utc::now(),
    };

    let stats = ExtractStats {
        skipped_links,
        skipped_images,
    };

    (record, stats)
}

/// Extracts the page title, falling back to a fixed placeholder
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return NO_TITLE.to_string();
    };

    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// Returns true if the tag name belongs to the stripped set
fn is_stripped_tag(name: &str) -> bool {
    STRIPPED_TAGS.contains(&name)
}

/// Returns true if the element sits inside a stripped subtree
///
/// Elements for which this holds are invisible to every extractor.
pub(crate) fn in_stripped_subtree(el: &ElementRef) -> bool {
    el.ancestors().any(|node| {
        node.value()
            .as_element()
            .map(|e| is_stripped_tag(e.name()))
            .unwrap_or(false)
    })
}

/// Collects the text of an element, excluding stripped descendant subtrees
pub(crate) fn visible_text(el: &ElementRef) -> String {
    let mut out = String::new();
    collect_visible_text(el, &mut out);
    out
}

fn collect_visible_text(el: &ElementRef, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(&text.text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if !is_stripped_tag(child_el.value().name()) {
                collect_visible_text(&child_el, out);
            }
        }
    }
}

/// Splits a `class` attribute into its individual class names
pub(crate) fn css_classes(el: &ElementRef) -> Vec<String> {
    el.value()
        .attr("class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
