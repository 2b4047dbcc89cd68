//! Reading behavior types
//!
//! Signals extracted from an event payload, and the classifications derived
//! from them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Engagement classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    High,
    Medium,
    Low,
}

/// How the reader moved through the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStyle {
    /// Frequent backtracking
    Analytical,
    /// Mostly slow scrolling
    Careful,
    /// Mostly fast scrolling
    Skimming,
    Mixed,
    /// No scroll patterns recorded
    Unknown,
}

/// Quality of attention on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusQuality {
    DeepFocus,
    ModerateFocus,
    BriefVisit,
}

/// Scroll pattern counts (`readingAnalysis.readingPatterns`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingPatterns {
    pub fast_scroll: f64,
    pub slow_scroll: f64,
    pub backtrack: f64,
}

impl ReadingPatterns {
    pub fn total(&self) -> f64 {
        self.fast_scroll + self.slow_scroll + self.backtrack
    }
}

/// Reading signals (`readingAnalysis`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingSignals {
    pub engagement_score: f64,
    /// Seconds
    pub estimated_reading_time: f64,
    pub patterns: ReadingPatterns,
    /// Keys present on the reading signals block
    pub keys: Vec<String>,
}

/// Focus signals resolved from the top level or the `data` wrapper
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FocusSignals {
    /// Milliseconds
    pub focus_time_ms: f64,
    pub has_significant_activity: bool,
}

/// Everything the classifiers read from one event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSignals {
    pub reading: ReadingSignals,
    pub focus: FocusSignals,
    /// Content block fields are passed through as sent
    pub content_type: Value,
    pub word_count: f64,
    pub domain: Value,
    pub headings: Value,
    /// Resolved `focusTime` as sent (0 when absent)
    pub raw_focus_time: Value,
    /// Top-level payload keys
    pub payload_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPreference {
    pub content_type: Value,
    pub prefers_long_content: bool,
    pub domain: Value,
    /// Page headings, usually a list
    pub topics: Value,
}

/// Context echoed back with every behavior analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorDebugInfo {
    pub reading_data_keys: Vec<String>,
    pub focus_time: Value,
    pub has_activity: bool,
    pub interaction_keys: Vec<String>,
}

/// Result of analyzing one event's reading behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorAnalysis {
    pub engagement_level: EngagementLevel,
    pub reading_style: ReadingStyle,
    pub focus_quality: FocusQuality,
    pub content_preference: ContentPreference,
    pub debug_info: BehaviorDebugInfo,
}
