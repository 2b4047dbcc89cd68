//! Syllable counting and the simplified Flesch Reading Ease score

use super::{split_sentences, words};

const VOWELS: &str = "aeiouy";

const FLESCH_BASE: f64 = 206.835;
const FLESCH_SENTENCE_WEIGHT: f64 = 1.015;
const FLESCH_SYLLABLE_WEIGHT: f64 = 84.6;

/// Approximate syllable count of a single word.
///
/// Counts vowel groups (`a e i o u y`, case-insensitive), drops one for a
/// trailing `e`, and never returns less than 1.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count: isize = 0;
    let mut previous_was_vowel = false;

    for c in word.chars() {
        let is_vowel = VOWELS.contains(c);
        if is_vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = is_vowel;
    }

    // silent e
    if word.ends_with('e') {
        count -= 1;
    }

    count.max(1) as usize
}

/// Simplified Flesch Reading Ease, clamped to [0, 100].
///
/// `206.835 - 1.015 * words/sentence - 84.6 * syllables/word`, where sentences
/// come from the raw punctuation split and words from whitespace splitting.
/// Returns 0.0 when there are no words.
pub fn flesch_reading_ease(text: &str) -> f64 {
    let words = words(text);
    let sentences = split_sentences(text);

    if sentences.is_empty() || words.is_empty() {
        return 0.0;
    }

    let avg_sentence_length = words.len() as f64 / sentences.len() as f64;
    let total_syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let avg_syllables = total_syllables as f64 / words.len() as f64;

    let score = FLESCH_BASE
        - FLESCH_SENTENCE_WEIGHT * avg_sentence_length
        - FLESCH_SYLLABLE_WEIGHT * avg_syllables;
    score.clamp(0.0, 100.0)
}
