//! Content analysis result types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Sentiment bucket derived from polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentClass {
    Positive,
    Negative,
    Neutral,
}

impl SentimentClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentClass::Positive => "positive",
            SentimentClass::Negative => "negative",
            SentimentClass::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Negative-to-positive, in [-1, 1]
    pub polarity: f64,
    /// Objective-to-subjective, in [0, 1]
    pub subjectivity: f64,
    pub classification: SentimentClass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingMetrics {
    /// Whitespace-separated token count
    pub word_count: usize,
    /// Sentences found by the sentiment segmenter
    pub sentence_count: usize,
    /// `word_count / max(sentence_count, 1)`
    pub avg_sentence_length: f64,
    /// Simplified Flesch Reading Ease in [0, 100]
    pub difficulty_score: f64,
}

/// Result of analyzing one event's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub sentiment: Sentiment,
    /// At most five, most frequent first
    pub topics: Vec<String>,
    /// At most five, most frequent first
    pub entities: Vec<String>,
    pub reading_metrics: ReadingMetrics,
    /// `contentSummary.contentType` as sent, "unknown" when absent
    pub content_type: Value,
    pub summary: String,
}
