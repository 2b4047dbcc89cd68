//! Content analysis orchestration
//!
//! Resolves the text body of an event, rejects bodies too short to analyze,
//! and runs every text statistic over what remains. Failures never escape as
//! panics or raw errors: they come back as an [`AnalysisFailure`].

use crate::config::{AnalyzerConfig, SentimentThresholds};
use crate::content::types::{ContentAnalysis, ReadingMetrics, Sentiment, SentimentClass};
use crate::error::{AnalysisError, AnalysisFailure, DebugInfo};
use crate::payload::{keys, Block, EventPayload};
use crate::text::{keywords, readability, sentiment, summary, words};
use serde_json::{json, Value};

/// Analyze the content of an event payload with default thresholds.
///
/// # Example
/// ```
/// use serde_json::json;
///
/// let payload = json!({
///     "contentSummary": {
///         "contentPreview": "Rust makes systems programming pleasant. Rust is great.",
///         "contentType": "article"
///     }
/// });
/// let analysis = mindcache_engine::analyze_content(&payload).unwrap();
/// assert_eq!(analysis.content_type, "article");
/// assert_eq!(analysis.entities, vec!["Rust"]);
/// ```
pub fn analyze_content(payload: &Value) -> Result<ContentAnalysis, AnalysisFailure> {
    analyze_content_with_config(payload, &AnalyzerConfig::default())
}

/// Analyze the content of an event payload
pub fn analyze_content_with_config(
    payload: &Value,
    config: &AnalyzerConfig,
) -> Result<ContentAnalysis, AnalysisFailure> {
    let event = EventPayload::new(payload).map_err(|e| unexpected(payload, e))?;
    let content = event.content_block().map_err(|e| unexpected(payload, e))?;
    let text = event.text_body(&content).map_err(|e| unexpected(payload, e))?;

    if text.is_empty() || text.trim().chars().count() < config.content.min_text_chars {
        let failure = AnalysisFailure::new(
            &AnalysisError::NoMeaningfulContent,
            DebugInfo::Content {
                content_keys: content.keys(),
                data_keys: event.keys(),
                text_length: text.chars().count(),
            },
        );
        log::debug!("Skipping content analysis: {}", failure.error);
        return Err(failure);
    }

    Ok(analyze_text(text, &content, config))
}

/// Map polarity onto a sentiment bucket; both boundaries are exclusive
pub fn classify_sentiment(polarity: f64, thresholds: &SentimentThresholds) -> SentimentClass {
    if polarity > thresholds.positive_polarity {
        SentimentClass::Positive
    } else if polarity < thresholds.negative_polarity {
        SentimentClass::Negative
    } else {
        SentimentClass::Neutral
    }
}

fn analyze_text(
    text: &str,
    content: &Block<'_>,
    config: &AnalyzerConfig,
) -> ContentAnalysis {
    let limits = &config.content;
    let score = sentiment::score(text);

    let word_count = words(text).len();
    let sentence_count = sentiment::segment_sentences(text).len();

    ContentAnalysis {
        sentiment: Sentiment {
            polarity: score.polarity,
            subjectivity: score.subjectivity,
            classification: classify_sentiment(score.polarity, &config.sentiment),
        },
        topics: keywords::extract_topics(text, limits),
        entities: keywords::extract_entities(text, limits),
        reading_metrics: ReadingMetrics {
            word_count,
            sentence_count,
            avg_sentence_length: word_count as f64 / sentence_count.max(1) as f64,
            difficulty_score: readability::flesch_reading_ease(text),
        },
        content_type: content.value_or(keys::CONTENT_TYPE, json!("unknown")),
        summary: summary::summarize(text, limits),
    }
}

fn unexpected(payload: &Value, error: AnalysisError) -> AnalysisFailure {
    log::error!("Content analysis error: {}", error);
    AnalysisFailure::new(&error, DebugInfo::for_payload(payload))
}
