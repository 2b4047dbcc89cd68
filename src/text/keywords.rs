//! Topic and entity extraction

use super::rank_by_frequency;
use crate::config::ContentLimits;
use regex::Regex;
use std::sync::LazyLock;

/// Common words that never count as topics
pub const STOP_WORDS: &[&str] = &[
    "that", "this", "with", "from", "they", "been", "have", "were", "said", "each", "which",
    "their", "time", "will", "about", "would", "there", "could", "other", "after", "first",
    "well", "water", "very", "what", "know", "work", "life", "only", "government", "system",
    "program", "question", "group", "right", "information",
];

/// Whole alphabetic words (run on lowercased text)
static ALPHA_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z]+\b").expect("valid regex"));

/// Runs of capitalized words joined by single spaces
static CAPITALIZED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?: [A-Z][a-z]+)*\b").expect("valid regex")
});

/// Most frequent non-stop-words of at least `min_topic_word_len` letters that
/// occur more than `min_topic_frequency` times, most frequent first.
pub fn extract_topics(text: &str, limits: &ContentLimits) -> Vec<String> {
    let lower = text.to_lowercase();
    let candidates = ALPHA_WORD
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|w| w.len() >= limits.min_topic_word_len);

    rank_by_frequency(candidates)
        .into_iter()
        .filter(|(word, count)| !STOP_WORDS.contains(word) && *count > limits.min_topic_frequency)
        .take(limits.max_topics)
        .map(|(word, _)| word.to_string())
        .collect()
}

/// Most frequent capitalized word runs, most frequent first
pub fn extract_entities(text: &str, limits: &ContentLimits) -> Vec<String> {
    let candidates = CAPITALIZED_RUN.find_iter(text).map(|m| m.as_str());

    rank_by_frequency(candidates)
        .into_iter()
        .take(limits.max_entities)
        .map(|(entity, _)| entity.to_string())
        .collect()
}
