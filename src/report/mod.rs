//! Report module: deterministic aggregation over a crawl result
//!
//! This module turns a [`CrawlResult`] into a [`CrawlReport`]: summary
//! counters, site-structure analysis, content analysis, and keyword
//! frequencies. Synthesis is pure and deterministic — re-running it on the
//! same result produces byte-identical output — and every aggregate counter
//! is computed by summing the per-page records, never independently.

mod keywords;
mod writer;

pub use keywords::common_keywords;
pub use writer::{report_filename, save_report, CrawlOutcome};

use crate::crawler::{CrawlResult, PageSet};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use url::Url;

/// Number of entries reported in `most_linked_pages`
const MOST_LINKED_LIMIT: usize = 10;

/// Number of entries reported in `common_keywords`
const KEYWORD_LIMIT: usize = 20;

/// The complete aggregate report over one crawl
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlReport {
    pub crawl_summary: CrawlSummary,
    pub pages_by_depth: Vec<String>,
    pub site_structure: SiteStructure,
    pub content_analysis: ContentAnalysis,
    pub detailed_pages: PageSet,
}

/// Headline counters for one crawl
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlSummary {
    pub start_url: String,
    pub base_domain: String,
    pub total_pages_crawled: usize,
    /// Reported as the configured maximum depth; per-page depth is not
    /// tracked into the result
    pub max_depth_reached: u32,
    pub crawl_duration_seconds: f64,
    pub total_links_found: usize,
    pub total_images_found: usize,
    pub total_tables_found: usize,
    pub total_words_extracted: usize,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub finished_at: chrono::DateTime<chrono::Utc>,
}

/// Link-graph view of the crawled site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteStructure {
    /// Internal link targets by inbound-link count, descending, top 10;
    /// ties keep first-discovery order
    pub most_linked_pages: Vec<(String, usize)>,
    pub page_titles: Vec<String>,
    /// Hosts of external links, sorted lexicographically
    pub unique_domains_linked: Vec<String>,
}

/// Aggregate content view of the crawled site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentAnalysis {
    pub total_content_volume: ContentVolume,
    /// Flags in canonical order: tables, images, forms, formatted_text
    pub content_types_present: Vec<String>,
    pub common_keywords: Vec<(String, usize)>,
}

/// Content totals across all pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentVolume {
    pub words: usize,
    pub paragraphs: usize,
    pub images: usize,
    pub tables: usize,
}

/// Synthesizes the aggregate report for a crawl result
///
/// `max_depth` is the configured crawl depth, echoed into the summary.
pub fn generate_report(result: &CrawlResult, max_depth: u32) -> CrawlReport {
    CrawlReport {
        crawl_summary: summarize(result, max_depth),
        pages_by_depth: result.pages.keys().map(str::to_string).collect(),
        site_structure: analyze_site_structure(&result.pages),
        content_analysis: analyze_content(&result.pages),
        detailed_pages: result.pages.clone(),
    }
}

/// Builds the summary counters by summing per-page records
fn summarize(result: &CrawlResult, max_depth: u32) -> CrawlSummary {
    let pages = &result.pages;

    CrawlSummary {
        start_url: result.start_url.clone(),
        base_domain: result.base_domain.clone(),
        total_pages_crawled: result.total_pages_crawled,
        max_depth_reached: max_depth,
        crawl_duration_seconds: result.duration_seconds(),
        total_links_found: pages.records().map(|p| p.links.len()).sum(),
        total_images_found: pages.records().map(|p| p.images.len()).sum(),
        total_tables_found: pages.records().map(|p| p.tables.len()).sum(),
        total_words_extracted: pages
            .records()
            .map(|p| p.text_content.total_word_count)
            .sum(),
        started_at: result.started_at,
        finished_at: result.finished_at,
    }
}

fn analyze_site_structure(pages: &PageSet) -> SiteStructure {
    SiteStructure {
        most_linked_pages: most_linked_pages(pages),
        page_titles: pages.records().map(|p| p.title.clone()).collect(),
        unique_domains_linked: unique_domains_linked(pages),
    }
}

/// Counts inbound internal-link occurrences per target URL
///
/// Pages and their link lists are walked in discovery order; a stable sort by
/// descending count then keeps first-discovery order among ties.
fn most_linked_pages(pages: &PageSet) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for page in pages.records() {
        for link in page.links.iter().filter(|l| !l.is_external) {
            match index.get(&link.url) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(link.url.clone(), counts.len());
                    counts.push((link.url.clone(), 1));
                }
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(MOST_LINKED_LIMIT);
    counts
}

/// Collects the sorted set of hosts appearing in external links
fn unique_domains_linked(pages: &PageSet) -> Vec<String> {
    let mut domains = BTreeSet::new();

    for page in pages.records() {
        for link in page.links.iter().filter(|l| l.is_external) {
            if let Ok(url) = Url::parse(&link.url) {
                if let Some(host) = crate::url::extract_host(&url) {
                    domains.insert(host);
                }
            }
        }
    }

    domains.into_iter().collect()
}

fn analyze_content(pages: &PageSet) -> ContentAnalysis {
    let volume = ContentVolume {
        words: pages
            .records()
            .map(|p| p.text_content.total_word_count)
            .sum(),
        paragraphs: pages
            .records()
            .map(|p| p.text_content.paragraphs.len())
            .sum(),
        images: pages.records().map(|p| p.images.len()).sum(),
        tables: pages.records().map(|p| p.tables.len()).sum(),
    };

    ContentAnalysis {
        total_content_volume: volume,
        content_types_present: content_types_present(pages),
        common_keywords: common_keywords(&concatenated_paragraphs(pages), KEYWORD_LIMIT),
    }
}

/// Flags which content categories appear anywhere in the result
fn content_types_present(pages: &PageSet) -> Vec<String> {
    let mut present = Vec::new();

    if pages.records().any(|p| !p.tables.is_empty()) {
        present.push("tables".to_string());
    }
    if pages.records().any(|p| !p.images.is_empty()) {
        present.push("images".to_string());
    }
    if pages.records().any(|p| !p.forms.is_empty()) {
        present.push("forms".to_string());
    }
    if pages.records().any(|p| p.text_content.has_formatted_text()) {
        present.push("formatted_text".to_string());
    }

    present
}

/// Joins every page's paragraphs into one keyword corpus, in discovery order
fn concatenated_paragraphs(pages: &PageSet) -> String {
    let mut corpus = String::new();
    for page in pages.records() {
        for paragraph in &page.text_content.paragraphs {
            corpus.push_str(paragraph);
            corpus.push(' ');
        }
    }
    corpus
}

/// Prints a human-readable report summary to stdout
pub fn print_report_summary(report: &CrawlReport) {
    let summary = &report.crawl_summary;

    println!("=== Crawl Report ===\n");

    println!("Overview:");
    println!("  Start URL: {}", summary.start_url);
    println!("  Base domain: {}", summary.base_domain);
    println!("  Pages crawled: {}", summary.total_pages_crawled);
    println!("  Duration: {:.2}s", summary.crawl_duration_seconds);
    println!();

    println!("Content:");
    println!("  Links found: {}", summary.total_links_found);
    println!("  Images found: {}", summary.total_images_found);
    println!("  Tables found: {}", summary.total_tables_found);
    println!("  Words extracted: {}", summary.total_words_extracted);
    if !report.content_analysis.content_types_present.is_empty() {
        println!(
            "  Content types: {}",
            report.content_analysis.content_types_present.join(", ")
        );
    }
    println!();

    if !report.site_structure.most_linked_pages.is_empty() {
        println!("Most Linked Pages:");
        for (url, count) in &report.site_structure.most_linked_pages {
            println!("  {} ({} inbound)", url, count);
        }
        println!();
    }

    if !report.site_structure.unique_domains_linked.is_empty() {
        println!(
            "External Domains ({}):",
            report.site_structure.unique_domains_linked.len()
        );
        for domain in &report.site_structure.unique_domains_linked {
            println!("  - {}", domain);
        }
        println!();
    }

    if !report.content_analysis.common_keywords.is_empty() {
        println!("Top Keywords:");
        for (word, count) in report.content_analysis.common_keywords.iter().take(10) {
            println!("  {} ({})", word, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_page;
    use crate::url::page_key;
    use chrono::{TimeZone, Utc};

    fn make_result(pages_html: Vec<(&str, &str)>) -> CrawlResult {
        let mut pages = PageSet::new();
        for (url_str, html) in &pages_html {
            let url = Url::parse(url_str).unwrap();
            let (record, _) = extract_page(&url, html);
            pages.insert(page_key(url_str), record);
        }

        let started_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        CrawlResult {
            start_url: "https://example.com/".to_string(),
            base_domain: "example.com".to_string(),
            total_pages_crawled: pages.len(),
            pages,
            started_at,
            finished_at: started_at + chrono::Duration::milliseconds(2500),
        }
    }

    #[test]
    fn test_summary_counters_are_sums_of_page_counters() {
        let result = make_result(vec![
            (
                "https://example.com/",
                r#"<html><body>
                    <a href="/a">first link text</a>
                    <a href="/b">second link text</a>
                    <img src="/one.png">
                    <p>five words live in here</p>
                </body></html>"#,
            ),
            (
                "https://example.com/a",
                r#"<html><body>
                    <a href="/b">another link here</a>
                    <img src="/two.png"><img src="/three.png">
                    <table><tr><td>x</td></tr></table>
                    <p>three more counted words</p>
                </body></html>"#,
            ),
        ]);

        let report = generate_report(&result, 3);
        let summary = &report.crawl_summary;

        let expected_links: usize = result.pages.records().map(|p| p.links.len()).sum();
        assert_eq!(summary.total_links_found, expected_links);
        assert_eq!(summary.total_links_found, 3);
        assert_eq!(summary.total_images_found, 3);
        assert_eq!(summary.total_tables_found, 1);
        assert_eq!(summary.total_words_extracted, 9);
        assert_eq!(summary.total_pages_crawled, 2);
        assert_eq!(summary.crawl_duration_seconds, 2.5);
    }

    #[test]
    fn test_max_depth_reported_as_configured() {
        let result = make_result(vec![("https://example.com/", "<html><body></body></html>")]);
        let report = generate_report(&result, 7);
        assert_eq!(report.crawl_summary.max_depth_reached, 7);
    }

    #[test]
    fn test_most_linked_pages_counts_inbound_internal_links() {
        let result = make_result(vec![
            (
                "https://example.com/",
                r#"<html><body><a href="/about">to about</a><a href="/contact">to contact</a></body></html>"#,
            ),
            (
                "https://example.com/blog",
                r#"<html><body><a href="/about">about again</a><a href="https://other.com/x">external</a></body></html>"#,
            ),
        ]);

        let report = generate_report(&result, 2);
        let most_linked = &report.site_structure.most_linked_pages;

        assert_eq!(most_linked[0], ("https://example.com/about".to_string(), 2));
        assert_eq!(
            most_linked[1],
            ("https://example.com/contact".to_string(), 1)
        );
        // External targets never appear
        assert!(!most_linked.iter().any(|(url, _)| url.contains("other.com")));
    }

    #[test]
    fn test_most_linked_tie_broken_by_discovery_order() {
        let result = make_result(vec![(
            "https://example.com/",
            r#"<html><body><a href="/zeta">z link</a><a href="/alpha">a link</a></body></html>"#,
        )]);

        let report = generate_report(&result, 1);
        let most_linked = &report.site_structure.most_linked_pages;

        // Both have count 1; /zeta was discovered first
        assert_eq!(most_linked[0].0, "https://example.com/zeta");
        assert_eq!(most_linked[1].0, "https://example.com/alpha");
    }

    #[test]
    fn test_unique_external_domains_sorted() {
        let result = make_result(vec![(
            "https://example.com/",
            r#"<html><body>
                <a href="https://zzz.org/a">z</a>
                <a href="https://aaa.org/b">a</a>
                <a href="https://zzz.org/c">z again</a>
                <a href="/internal">internal link</a>
            </body></html>"#,
        )]);

        let report = generate_report(&result, 1);
        assert_eq!(
            report.site_structure.unique_domains_linked,
            vec!["aaa.org", "zzz.org"]
        );
    }

    #[test]
    fn test_content_types_canonical_order() {
        let result = make_result(vec![(
            "https://example.com/",
            r#"<html><body>
                <code>let formatted = true;</code>
                <img src="/pic.png">
                <table><tr><td>1</td></tr></table>
                <form action="/s"><input name="q"></form>
            </body></html>"#,
        )]);

        let report = generate_report(&result, 1);
        assert_eq!(
            report.content_analysis.content_types_present,
            vec!["tables", "images", "forms", "formatted_text"]
        );
    }

    #[test]
    fn test_content_types_absent_flags_omitted() {
        let result = make_result(vec![(
            "https://example.com/",
            "<html><body><p>plain paragraph content only here</p></body></html>",
        )]);

        let report = generate_report(&result, 1);
        assert!(report.content_analysis.content_types_present.is_empty());
    }

    #[test]
    fn test_keywords_drawn_from_paragraphs_only() {
        let result = make_result(vec![(
            "https://example.com/",
            r#"<html><body>
                <p>crawler crawler crawler paragraph content</p>
                <blockquote>blockquote blockquote blockquote blockquote</blockquote>
            </body></html>"#,
        )]);

        let report = generate_report(&result, 1);
        let words: Vec<&str> = report
            .content_analysis
            .common_keywords
            .iter()
            .map(|(w, _)| w.as_str())
            .collect();
        assert!(words.contains(&"crawler"));
        assert!(!words.contains(&"blockquote"));
    }

    #[test]
    fn test_pages_by_depth_lists_keys_in_discovery_order() {
        let result = make_result(vec![
            ("https://example.com/", "<html><body></body></html>"),
            ("https://example.com/a", "<html><body></body></html>"),
        ]);

        let report = generate_report(&result, 1);
        assert_eq!(report.pages_by_depth.len(), 2);
        assert_eq!(report.pages_by_depth[0], page_key("https://example.com/"));
        assert_eq!(report.pages_by_depth[1], page_key("https://example.com/a"));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let result = make_result(vec![
            (
                "https://example.com/",
                r#"<html><body>
                    <p>shared words appear across these pages often enough</p>
                    <a href="/a">one</a><a href="https://ext1.com/">e1</a>
                    <a href="https://ext2.com/">e2</a>
                </body></html>"#,
            ),
            (
                "https://example.com/a",
                r#"<html><body>
                    <p>shared words appear here too with tables below</p>
                    <table><tr><td>1</td></tr></table>
                </body></html>"#,
            ),
        ]);

        let report_a = generate_report(&result, 3);
        let report_b = generate_report(&result, 3);

        assert_eq!(report_a, report_b);
        assert_eq!(
            serde_json::to_string(&report_a).unwrap(),
            serde_json::to_string(&report_b).unwrap()
        );
    }
}
