use sha2::{Digest, Sha256};

/// Number of hex characters in a page key
const KEY_LEN: usize = 12;

/// Derives the content-address key for a page URL
///
/// The key is a fixed-width prefix of the hex-encoded SHA-256 digest of the
/// URL string. It is stable across runs, so two fetches of the same URL
/// collide deterministically, and it is what the result set and the report's
/// `detailed_pages` map are keyed by.
///
/// # Examples
///
/// ```
/// use fathom::url::page_key;
///
/// let key = page_key("https://example.com/");
/// assert_eq!(key.len(), 12);
/// assert_eq!(key, page_key("https://example.com/"));
/// ```
pub fn page_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hasher.finalize();
    let mut key = hex::encode(digest);
    key.truncate(KEY_LEN);
    key
}
