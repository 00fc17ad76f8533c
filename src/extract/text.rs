use crate::extract::{in_stripped_subtree, visible_text};
use scraper::{Html, Selector};
use serde::Serialize;

/// Minimum trimmed length for a `<p>` to count as a paragraph; shorter
/// fragments are treated as noise
const MIN_PARAGRAPH_CHARS: usize = 10;

/// Categorized text content of a single page
///
/// `total_word_count` is computed only from `paragraphs` (whitespace-token
/// count), not from all page text. Downstream report totals depend on this
/// definition, so it must not be widened to other text fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    pub paragraphs: Vec<String>,
    pub lists: Vec<ListRecord>,
    pub bold_text: Vec<String>,
    pub italic_text: Vec<String>,
    pub code_blocks: Vec<String>,
    pub quotes: Vec<String>,
    pub total_word_count: usize,
}

impl TextContent {
    /// Returns true if any formatted-text field (code, bold, italic) is
    /// non-empty
    pub fn has_formatted_text(&self) -> bool {
        !self.code_blocks.is_empty() || !self.bold_text.is_empty() || !self.italic_text.is_empty()
    }
}

/// One `<ul>` or `<ol>` and its item texts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRecord {
    #[serde(rename = "type")]
    pub list_type: String,
    pub items: Vec<String>,
}

/// Extracts and categorizes all text content from the document
pub fn extract_text_content(document: &Html) -> TextContent {
    let paragraphs = extract_paragraphs(document);
    let lists = extract_lists(document);
    let bold_text = collect_tag_text(document, "b, strong");
    let italic_text = collect_tag_text(document, "i, em");
    let code_blocks = collect_tag_text(document, "code, pre");
    let quotes = collect_tag_text(document, "blockquote");

    // Word count policy: paragraphs only
    let total_word_count = paragraphs
        .iter()
        .flat_map(|p| p.split_whitespace())
        .count();

    TextContent {
        paragraphs,
        lists,
        bold_text,
        italic_text,
        code_blocks,
        quotes,
        total_word_count,
    }
}

/// Extracts `<p>` texts longer than the noise threshold
fn extract_paragraphs(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("p") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|el| !in_stripped_subtree(el))
        .map(|el| visible_text(&el).trim().to_string())
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect()
}

/// Extracts `<ul>`/`<ol>` lists with their item texts; empty lists are dropped
fn extract_lists(document: &Html) -> Vec<ListRecord> {
    let (Ok(list_selector), Ok(item_selector)) =
        (Selector::parse("ul, ol"), Selector::parse("li"))
    else {
        return Vec::new();
    };

    document
        .select(&list_selector)
        .filter(|el| !in_stripped_subtree(el))
        .filter_map(|el| {
            let items: Vec<String> = el
                .select(&item_selector)
                .map(|li| visible_text(&li).trim().to_string())
                .collect();

            if items.is_empty() {
                return None;
            }

            Some(ListRecord {
                list_type: el.value().name().to_string(),
                items,
            })
        })
        .collect()
}

/// Collects trimmed, non-empty text for every element matching the selector
fn collect_tag_text(document: &Html, selectors: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(selectors) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|el| !in_stripped_subtree(el))
        .map(|el| visible_text(&el).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}
