//! Extractive summary

use super::{split_sentences, truncate_with_ellipsis};
use crate::config::ContentLimits;

/// Build a summary from verbatim pieces of `text`.
///
/// Short texts (at most `short_text_max_sentences` split pieces) are truncated
/// as-is. Longer ones keep the first, middle and second-to-last pieces, joined
/// with `". "` and truncated to `long_summary_chars`.
pub fn summarize(text: &str, limits: &ContentLimits) -> String {
    let sentences = split_sentences(text);

    if sentences.len() <= limits.short_text_max_sentences.max(1) {
        return truncate_with_ellipsis(text, limits.short_summary_chars);
    }

    let n = sentences.len();
    let picked: Vec<&str> = [sentences[0], sentences[n / 2], sentences[n - 2]]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    truncate_with_ellipsis(&picked.join(". "), limits.long_summary_chars)
}
