use std::collections::{HashSet, VecDeque};
use url::Url;

/// File extensions that are never worth fetching as pages
const SKIP_EXTENSIONS: &[&str] = &[
    "pdf", "jpg", "jpeg", "png", "gif", "zip", "exe", "css", "js", "ico", "svg", "woff", "woff2",
    "ttf", "eot",
];

/// One unit of crawl work: a URL and the depth it was discovered at
///
/// Created when a discovered link passes admission, consumed exactly once
/// when dequeued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: u32,
}

/// Why a candidate URL was not admitted to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueRejection {
    /// Already claimed by a previous dequeue
    AlreadyVisited,
    /// Scheme is not http or https
    UnsupportedScheme,
    /// Path extension is on the non-document blacklist
    BlockedExtension,
    /// Host differs from the crawl's base domain
    OutOfScope,
}

/// FIFO work queue of crawl entries, owning the admission policy
///
/// The frontier decides which discovered links become work (scheme, extension,
/// same-origin scope, visited dedup) and hands entries out in breadth-first
/// order. It does not mark URLs visited; the coordinator does that at dequeue
/// time.
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    base_host: String,
}

impl Frontier {
    /// Creates a frontier scoped to the given host, seeded with the seed URL
    /// at depth 0
    pub fn new(seed: Url, base_host: String) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(FrontierEntry {
            url: seed,
            depth: 0,
        });
        Self { queue, base_host }
    }

    /// Attempts to admit a discovered URL at the given depth
    ///
    /// `visited` is consulted so already-processed URLs are rejected; URLs
    /// that are merely queued (not yet visited) can be admitted twice — the
    /// coordinator's dequeue-time visited check discards the duplicate.
    pub fn enqueue(
        &mut self,
        url: Url,
        depth: u32,
        visited: &HashSet<String>,
    ) -> Result<(), EnqueueRejection> {
        if visited.contains(url.as_str()) {
            return Err(EnqueueRejection::AlreadyVisited);
        }

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(EnqueueRejection::UnsupportedScheme);
        }

        if has_blocked_extension(&url) {
            return Err(EnqueueRejection::BlockedExtension);
        }

        let in_scope = url
            .host_str()
            .map(|h| h.eq_ignore_ascii_case(&self.base_host))
            .unwrap_or(false);
        if !in_scope {
            return Err(EnqueueRejection::OutOfScope);
        }

        self.queue.push_back(FrontierEntry { url, depth });
        Ok(())
    }

    /// Removes and returns the oldest entry, or None when empty
    pub fn dequeue(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Returns true if the URL path ends in a blacklisted file extension
fn has_blocked_extension(url: &Url) -> bool {
    let path = url.path();
    let last_segment = path.rsplit('/').next().unwrap_or("");

    match last_segment.rsplit_once('.') {
        Some((_, ext)) => SKIP_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}
