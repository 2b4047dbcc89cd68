//! Text statistics shared by the content analyzer
//!
//! Everything here is a pure function over `&str`. Two sentence splitters
//! exist on purpose: [`split_sentences`] is the raw punctuation split used by
//! readability and summarization, while
//! [`sentiment::segment_sentences`] is the boundary-aware segmenter behind the
//! reported sentence count. They can disagree on the same text.

pub mod keywords;
pub mod readability;
pub mod sentiment;
pub mod summary;

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Runs of sentence-terminating punctuation
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Split text on runs of `.`, `!` and `?`.
///
/// Pieces are returned untrimmed and empty pieces are kept, so
/// `"One. Two."` yields three pieces: `"One"`, `" Two"` and `""`.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK.split(text).collect()
}

/// Whitespace-separated tokens
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Count occurrences and order by count descending.
///
/// Ties keep the order in which items were first seen.
pub fn rank_by_frequency<'a, I>(items: I) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();

    for item in items {
        match index.get(item) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(item, counts.len());
                counts.push((item, 1));
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Keep the first `max_chars` characters, appending `...` when anything was cut
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
