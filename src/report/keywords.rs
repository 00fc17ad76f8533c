use regex::Regex;
use std::collections::HashMap;

/// Words shorter than this never count as keywords
const MIN_KEYWORD_CHARS: usize = 4;

/// Counts keyword frequencies over a blob of text
///
/// The text is lowercased and tokenized on word boundaries; only tokens of at
/// least four word characters count. Returns the `top_n` most frequent words,
/// ties broken by first occurrence in the text, so the result is fully
/// determined by the input.
pub fn common_keywords(text: &str, top_n: usize) -> Vec<(String, usize)> {
    let pattern = format!(r"\b\w{{{},}}\b", MIN_KEYWORD_CHARS);
    let Ok(word_pattern) = Regex::new(&pattern) else {
        return Vec::new();
    };

    let lowered = text.to_lowercase();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for word in word_pattern.find_iter(&lowered) {
        let word = word.as_str();
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            first_seen.push(word);
        }
        *count += 1;
    }

    let mut freq: Vec<(String, usize)> = first_seen
        .into_iter()
        .map(|word| (word.to_string(), counts[word]))
        .collect();

    // Stable sort keeps first-occurrence order among equal counts
    freq.sort_by(|a, b| b.1.cmp(&a.1));
    freq.truncate(top_n);
    freq
}
