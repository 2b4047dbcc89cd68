//! Analyzer thresholds and configuration
//!
//! Every heuristic boundary used by the classifiers is a named constant here,
//! grouped by the classifier that reads it. [`AnalyzerConfig`] carries the same
//! values so callers can override them from JSON.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Sentiment classification boundaries (exclusive)
pub mod sentiment {
    pub const POSITIVE_POLARITY: f64 = 0.1;
    pub const NEGATIVE_POLARITY: f64 = -0.1;
}

/// Content analysis limits
pub mod content {
    /// Minimum trimmed text length (characters) worth analyzing
    pub const MIN_TEXT_CHARS: usize = 10;
    pub const MAX_TOPICS: usize = 5;
    pub const MAX_ENTITIES: usize = 5;
    pub const MIN_TOPIC_WORD_LEN: usize = 4;
    /// A topic must occur more often than this
    pub const MIN_TOPIC_FREQUENCY: usize = 1;
    /// Texts with at most this many regex-split sentences are summarized by truncation
    pub const SHORT_TEXT_MAX_SENTENCES: usize = 3;
    pub const SHORT_SUMMARY_CHARS: usize = 200;
    pub const LONG_SUMMARY_CHARS: usize = 300;
    /// Word count above which content counts as long-form
    pub const LONG_CONTENT_WORDS: f64 = 1000.0;
}

/// Engagement classification boundaries (exclusive)
pub mod engagement {
    pub const HIGH_SCORE: f64 = 70.0;
    pub const HIGH_READING_TIME_SEC: f64 = 60.0;
    pub const MEDIUM_SCORE: f64 = 40.0;
    pub const MEDIUM_READING_TIME_SEC: f64 = 30.0;
}

/// Reading style ratio boundaries (exclusive), checked in this order
pub mod reading_style {
    pub const BACKTRACK_RATIO: f64 = 0.3;
    pub const SLOW_SCROLL_RATIO: f64 = 0.6;
    pub const FAST_SCROLL_RATIO: f64 = 0.6;
}

/// Focus quality boundaries in milliseconds (exclusive)
pub mod focus {
    /// 5 minutes
    pub const DEEP_FOCUS_MS: f64 = 300_000.0;
    /// 1 minute
    pub const MODERATE_FOCUS_MS: f64 = 60_000.0;
}

/// Actions whose events get both analyses in the event pipeline
pub const DEFAULT_ANALYZED_ACTIONS: [&str; 2] = ["reading_session", "page_session"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentThresholds {
    pub positive_polarity: f64,
    pub negative_polarity: f64,
}

impl Default for SentimentThresholds {
    fn default() -> Self {
        Self {
            positive_polarity: sentiment::POSITIVE_POLARITY,
            negative_polarity: sentiment::NEGATIVE_POLARITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentLimits {
    pub min_text_chars: usize,
    pub max_topics: usize,
    pub max_entities: usize,
    pub min_topic_word_len: usize,
    pub min_topic_frequency: usize,
    pub short_text_max_sentences: usize,
    pub short_summary_chars: usize,
    pub long_summary_chars: usize,
    pub long_content_words: f64,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            min_text_chars: content::MIN_TEXT_CHARS,
            max_topics: content::MAX_TOPICS,
            max_entities: content::MAX_ENTITIES,
            min_topic_word_len: content::MIN_TOPIC_WORD_LEN,
            min_topic_frequency: content::MIN_TOPIC_FREQUENCY,
            short_text_max_sentences: content::SHORT_TEXT_MAX_SENTENCES,
            short_summary_chars: content::SHORT_SUMMARY_CHARS,
            long_summary_chars: content::LONG_SUMMARY_CHARS,
            long_content_words: content::LONG_CONTENT_WORDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementThresholds {
    pub high_score: f64,
    pub high_reading_time_sec: f64,
    pub medium_score: f64,
    pub medium_reading_time_sec: f64,
}

impl Default for EngagementThresholds {
    fn default() -> Self {
        Self {
            high_score: engagement::HIGH_SCORE,
            high_reading_time_sec: engagement::HIGH_READING_TIME_SEC,
            medium_score: engagement::MEDIUM_SCORE,
            medium_reading_time_sec: engagement::MEDIUM_READING_TIME_SEC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingStyleThresholds {
    pub backtrack_ratio: f64,
    pub slow_scroll_ratio: f64,
    pub fast_scroll_ratio: f64,
}

impl Default for ReadingStyleThresholds {
    fn default() -> Self {
        Self {
            backtrack_ratio: reading_style::BACKTRACK_RATIO,
            slow_scroll_ratio: reading_style::SLOW_SCROLL_RATIO,
            fast_scroll_ratio: reading_style::FAST_SCROLL_RATIO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusThresholds {
    pub deep_focus_ms: f64,
    pub moderate_focus_ms: f64,
}

impl Default for FocusThresholds {
    fn default() -> Self {
        Self {
            deep_focus_ms: focus::DEEP_FOCUS_MS,
            moderate_focus_ms: focus::MODERATE_FOCUS_MS,
        }
    }
}

/// Full analyzer configuration.
///
/// Missing sections or fields fall back to the constants above, so a JSON
/// override only needs to name what it changes:
///
/// ```
/// use mindcache_engine::config::AnalyzerConfig;
///
/// let config = AnalyzerConfig::from_json(r#"{"focus": {"deep_focus_ms": 600000}}"#).unwrap();
/// assert_eq!(config.focus.deep_focus_ms, 600000.0);
/// assert_eq!(config.focus.moderate_focus_ms, 60000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub sentiment: SentimentThresholds,
    pub content: ContentLimits,
    pub engagement: EngagementThresholds,
    pub reading_style: ReadingStyleThresholds,
    pub focus: FocusThresholds,
    pub analyzed_actions: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sentiment: SentimentThresholds::default(),
            content: ContentLimits::default(),
            engagement: EngagementThresholds::default(),
            reading_style: ReadingStyleThresholds::default(),
            focus: FocusThresholds::default(),
            analyzed_actions: DEFAULT_ANALYZED_ACTIONS
                .iter()
                .map(|a| a.to_string())
                .collect(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let config: AnalyzerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, AnalysisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject thresholds that would make the classifiers incoherent
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.sentiment.negative_polarity > self.sentiment.positive_polarity {
            return Err(AnalysisError::ConfigError(
                "sentiment.negative_polarity must not exceed positive_polarity".to_string(),
            ));
        }

        for (name, ratio) in [
            ("reading_style.backtrack_ratio", self.reading_style.backtrack_ratio),
            ("reading_style.slow_scroll_ratio", self.reading_style.slow_scroll_ratio),
            ("reading_style.fast_scroll_ratio", self.reading_style.fast_scroll_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(AnalysisError::ConfigError(format!(
                    "{} must be within [0, 1], got {}",
                    name, ratio
                )));
            }
        }

        if self.engagement.medium_score > self.engagement.high_score {
            return Err(AnalysisError::ConfigError(
                "engagement.medium_score must not exceed high_score".to_string(),
            ));
        }

        if self.focus.moderate_focus_ms > self.focus.deep_focus_ms {
            return Err(AnalysisError::ConfigError(
                "focus.moderate_focus_ms must not exceed deep_focus_ms".to_string(),
            ));
        }

        if self.content.short_text_max_sentences == 0 {
            return Err(AnalysisError::ConfigError(
                "content.short_text_max_sentences must be at least 1".to_string(),
            ));
        }

        if self.content.short_summary_chars == 0 || self.content.long_summary_chars == 0 {
            return Err(AnalysisError::ConfigError(
                "summary lengths must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether events with this action get analyzed by the event pipeline
    pub fn analyzes_action(&self, action: &str) -> bool {
        self.analyzed_actions.iter().any(|a| a == action)
    }
}
