//! Lexicon-based sentiment scoring
//!
//! Each opinion word in [`LEXICON`] carries a polarity in [-1, 1] and a
//! subjectivity in [0, 1]. Scoring walks the lowercase word stream, applies a
//! preceding intensifier or negation to the next opinion word, and averages the
//! resulting assessments. Text without opinion words scores (0.0, 0.0).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Polarity multiplier applied to a negated opinion word
const NEGATION_FACTOR: f64 = -0.5;

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    // positive
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("nice", 0.6, 1.0),
    ("happy", 0.8, 1.0),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("lovely", 0.5, 0.75),
    ("beautiful", 0.85, 1.0),
    ("perfect", 1.0, 1.0),
    ("brilliant", 0.9, 1.0),
    ("interesting", 0.5, 0.5),
    ("useful", 0.3, 0.0),
    ("helpful", 0.3, 0.4),
    ("easy", 0.43, 0.83),
    ("fun", 0.3, 0.2),
    ("enjoyable", 0.5, 0.6),
    ("impressive", 1.0, 1.0),
    ("positive", 0.23, 0.55),
    ("strong", 0.43, 0.73),
    ("successful", 0.75, 0.95),
    ("effective", 0.6, 0.8),
    ("important", 0.4, 1.0),
    ("significant", 0.375, 0.875),
    ("powerful", 0.3, 1.0),
    ("clear", 0.1, 0.38),
    ("fresh", 0.3, 0.5),
    ("free", 0.4, 0.8),
    ("fine", 0.42, 0.5),
    ("glad", 0.5, 1.0),
    ("exciting", 0.3, 0.8),
    ("remarkable", 0.75, 0.75),
    ("favorite", 0.5, 1.0),
    ("true", 0.35, 0.65),
    ("sure", 0.5, 0.89),
    ("new", 0.14, 0.45),
    ("large", 0.21, 0.43),
    ("high", 0.16, 0.54),
    ("real", 0.2, 0.3),
    // negative
    ("bad", -0.7, 0.67),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0),
    ("hate", -0.8, 0.9),
    ("hated", -0.9, 0.7),
    ("boring", -1.0, 1.0),
    ("ugly", -0.7, 1.0),
    ("wrong", -0.5, 0.9),
    ("difficult", -0.5, 1.0),
    ("hard", -0.29, 0.54),
    ("dangerous", -0.6, 0.9),
    ("disappointing", -0.6, 0.7),
    ("disappointed", -0.75, 0.75),
    ("broken", -0.4, 0.4),
    ("slow", -0.3, 0.4),
    ("negative", -0.3, 0.4),
    ("failed", -0.5, 0.3),
    ("stupid", -0.8, 1.0),
    ("annoying", -0.8, 0.9),
    ("useless", -0.5, 0.2),
    ("painful", -0.7, 0.9),
    ("serious", -0.33, 0.67),
    ("confusing", -0.3, 0.7),
    ("weak", -0.375, 0.625),
    ("unfortunately", -0.5, 1.0),
    ("sorry", -0.5, 1.0),
    ("small", -0.25, 0.4),
    ("little", -0.19, 0.5),
    ("expensive", -0.5, 0.7),
    ("dead", -0.2, 0.4),
];

/// (word, multiplier) for words that scale the next opinion word
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("truly", 1.3),
    ("highly", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("absolutely", 1.5),
    ("quite", 1.1),
    ("somewhat", 0.8),
    ("slightly", 0.7),
    ("barely", 0.5),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "hardly", "cannot", "isn't", "aren't", "wasn't",
    "weren't", "don't", "doesn't", "didn't", "can't", "won't", "wouldn't", "shouldn't",
    "couldn't",
];

/// Filler words that do not break a pending negation or intensifier
const PASS_THROUGH: &[&str] = &["a", "an", "the", "be", "is", "was", "are", "were", "been", "so"];

/// Abbreviations whose trailing period does not end a sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "co", "no", "fig", "approx",
];

static OPINION_WORDS: LazyLock<HashMap<&'static str, (f64, f64)>> = LazyLock::new(|| {
    LEXICON
        .iter()
        .map(|&(word, polarity, subjectivity)| (word, (polarity, subjectivity)))
        .collect()
});

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").expect("valid regex"));

/// Sentiment of a text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Negative-to-positive, in [-1, 1]
    pub polarity: f64,
    /// Objective-to-subjective, in [0, 1]
    pub subjectivity: f64,
}

/// Score polarity and subjectivity of `text`
pub fn score(text: &str) -> SentimentScore {
    let lower = text.to_lowercase();
    let mut assessments: Vec<(f64, f64)> = Vec::new();
    let mut multiplier = 1.0;
    let mut negated = false;

    for token in WORD.find_iter(&lower).map(|m| m.as_str()) {
        if NEGATIONS.contains(&token) {
            negated = true;
            continue;
        }

        if let Some(&(_, factor)) = INTENSIFIERS.iter().find(|(w, _)| *w == token) {
            multiplier *= factor;
            continue;
        }

        if let Some(&(polarity, subjectivity)) = OPINION_WORDS.get(token) {
            let mut polarity = polarity * multiplier;
            if negated {
                polarity *= NEGATION_FACTOR;
            }
            assessments.push((
                polarity.clamp(-1.0, 1.0),
                (subjectivity * multiplier).clamp(0.0, 1.0),
            ));
            multiplier = 1.0;
            negated = false;
        } else if !PASS_THROUGH.contains(&token) {
            multiplier = 1.0;
            negated = false;
        }
    }

    if assessments.is_empty() {
        return SentimentScore {
            polarity: 0.0,
            subjectivity: 0.0,
        };
    }

    let n = assessments.len() as f64;
    SentimentScore {
        polarity: (assessments.iter().map(|a| a.0).sum::<f64>() / n).clamp(-1.0, 1.0),
        subjectivity: (assessments.iter().map(|a| a.1).sum::<f64>() / n).clamp(0.0, 1.0),
    }
}

/// Split text into sentences at terminal punctuation that is followed by
/// whitespace and a capital letter, digit, or opening quote, or by the end of
/// the text. A single period after a known abbreviation or a one-letter
/// initial does not end a sentence. Returned sentences are trimmed and
/// never empty.
pub fn segment_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !is_terminal(chars[i].1) {
            i += 1;
            continue;
        }

        let punct_start = chars[i].0;
        let mut j = i;
        while j < chars.len() && is_terminal(chars[j].1) {
            j += 1;
        }
        let single_period = j - i == 1 && chars[i].1 == '.';
        while j < chars.len() && is_closer(chars[j].1) {
            j += 1;
        }

        let end = chars.get(j).map(|&(b, _)| b).unwrap_or(text.len());
        let boundary = if j == chars.len() {
            true
        } else {
            chars[j].1.is_whitespace()
                && starts_new_sentence(&chars[j..])
                && !(single_period && ends_with_abbreviation(&text[start..punct_start]))
        };

        if boundary {
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
        i = j;
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
}

fn starts_new_sentence(rest: &[(usize, char)]) -> bool {
    rest.iter()
        .map(|&(_, c)| c)
        .find(|c| !c.is_whitespace())
        .map(|c| c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '\'' | '(' | '[' | '\u{201c}'))
        .unwrap_or(false)
}

fn ends_with_abbreviation(before: &str) -> bool {
    let last = before
        .split_whitespace()
        .last()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    let lower = last.to_lowercase();

    ABBREVIATIONS.contains(&lower.as_str())
        || (lower.chars().count() == 1 && lower.chars().all(char::is_alphabetic))
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_positive_text() {
        let s = score("This is a great article with excellent examples.");
        assert!(s.polarity > 0.1, "polarity was {}", s.polarity);
        assert!(s.subjectivity > 0.5);
    }

    #[test]
    fn test_negative_text() {
        let s = score("The service was terrible and the food was awful.");
        assert_eq!(s.polarity, -1.0);
        assert_eq!(s.subjectivity, 1.0);
    }

    #[test]
    fn test_no_opinion_words() {
        let s = score("The meeting starts at noon in room four.");
        assert_eq!(s.polarity, 0.0);
        assert_eq!(s.subjectivity, 0.0);
    }

    #[test]
    fn test_negation_flips_and_dampens() {
        let s = score("This is not good.");
        assert!((s.polarity - (-0.35)).abs() < 1e-9, "polarity was {}", s.polarity);
    }

    #[test]
    fn test_negation_reaches_across_filler() {
        let plain = score("It was not a good idea.");
        assert!(plain.polarity < 0.0);
    }

    #[test]
    fn test_intensifier_scales() {
        let plain = score("good");
        let strong = score("very good");
        assert!(strong.polarity > plain.polarity);
        assert!((strong.polarity - 0.91).abs() < 1e-9);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let s = score("extremely incredibly absolutely perfect");
        assert!(s.polarity <= 1.0);
        assert!(s.subjectivity <= 1.0);
    }

    #[test]
    fn test_segment_simple() {
        assert_eq!(
            segment_sentences("First sentence. Second one! Third?"),
            vec!["First sentence.", "Second one!", "Third?"]
        );
    }

    #[test]
    fn test_segment_without_punctuation() {
        assert_eq!(segment_sentences("just some words"), vec!["just some words"]);
        assert!(segment_sentences("   ").is_empty());
    }

    #[test]
    fn test_segment_skips_abbreviations_and_initials() {
        let sentences = segment_sentences("Dr. Smith met J. Doe at noon. They talked.");
        assert_eq!(sentences, vec!["Dr. Smith met J. Doe at noon.", "They talked."]);
    }

    #[test]
    fn test_segment_requires_capital_after_break() {
        assert_eq!(
            segment_sentences("Version 2.0 is out. see notes."),
            vec!["Version 2.0 is out. see notes."]
        );
    }

    #[test]
    fn test_segment_differs_from_raw_split() {
        let text = "Hello there. How are you?";
        assert_eq!(segment_sentences(text).len(), 2);
        assert_eq!(crate::text::split_sentences(text).len(), 3);
    }
}
