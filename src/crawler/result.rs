use crate::extract::PageRecord;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Page records keyed by content-address, preserving discovery order
///
/// Serializes as a JSON object. Insertion order is kept so downstream
/// aggregation (most-linked tie-breaks, keyword first-occurrence) is
/// deterministic and reflects the breadth-first crawl order. Inserting an
/// existing key replaces that record in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSet {
    entries: Vec<(String, PageRecord)>,
}

impl PageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record under its key, replacing any previous record with the
    /// same key
    pub fn insert(&mut self, key: String, record: PageRecord) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = record;
        } else {
            self.entries.push((key, record));
        }
    }

    pub fn get(&self, key: &str) -> Option<&PageRecord> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(key, record)` pairs in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageRecord)> {
        self.entries.iter().map(|(k, record)| (k.as_str(), record))
    }

    /// Iterates records in discovery order
    pub fn records(&self) -> impl Iterator<Item = &PageRecord> {
        self.entries.iter().map(|(_, record)| record)
    }

    /// Iterates keys in discovery order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for PageSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, record) in &self.entries {
            map.serialize_entry(key, record)?;
        }
        map.end()
    }
}

/// The accumulated outcome of one completed crawl
///
/// A crawl that starts successfully always produces one of these, even when
/// individual page fetches failed along the way; total failure to start is a
/// [`crate::CrawlError`] instead.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlResult {
    pub start_url: String,
    pub base_domain: String,
    pub pages: PageSet,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_pages_crawled: usize,
}

impl CrawlResult {
    /// Crawl duration in seconds, rounded to 2 decimal places
    pub fn duration_seconds(&self) -> f64 {
        let millis = (self.finished_at - self.started_at).num_milliseconds();
        let seconds = millis as f64 / 1000.0;
        (seconds * 100.0).round() / 100.0
    }
}
