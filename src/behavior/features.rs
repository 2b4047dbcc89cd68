//! Reading behavior classifiers
//!
//! Each classifier is a pure function of the extracted signals and the
//! thresholds in [`crate::config`]. All threshold comparisons are strict.

use crate::behavior::types::{
    ContentPreference, EngagementLevel, FocusQuality, FocusSignals, ReadingPatterns,
    ReadingSignals, ReadingStyle,
};
use crate::config::{
    ContentLimits, EngagementThresholds, FocusThresholds, ReadingStyleThresholds,
};
use serde_json::Value;

/// High needs both a high score and a long read; medium needs either
/// moderate signal.
pub fn classify_engagement(
    reading: &ReadingSignals,
    thresholds: &EngagementThresholds,
) -> EngagementLevel {
    let score = reading.engagement_score;
    let time = reading.estimated_reading_time;

    if score > thresholds.high_score && time > thresholds.high_reading_time_sec {
        EngagementLevel::High
    } else if score > thresholds.medium_score || time > thresholds.medium_reading_time_sec {
        EngagementLevel::Medium
    } else {
        EngagementLevel::Low
    }
}

/// Classify by scroll-pattern shares, checking backtracking first, then slow
/// scrolling, then fast scrolling.
pub fn determine_reading_style(
    patterns: &ReadingPatterns,
    thresholds: &ReadingStyleThresholds,
) -> ReadingStyle {
    let total = patterns.total();
    if total == 0.0 {
        return ReadingStyle::Unknown;
    }

    if patterns.backtrack / total > thresholds.backtrack_ratio {
        ReadingStyle::Analytical
    } else if patterns.slow_scroll / total > thresholds.slow_scroll_ratio {
        ReadingStyle::Careful
    } else if patterns.fast_scroll / total > thresholds.fast_scroll_ratio {
        ReadingStyle::Skimming
    } else {
        ReadingStyle::Mixed
    }
}

/// Deep focus also requires significant activity on the page
pub fn assess_focus_quality(focus: &FocusSignals, thresholds: &FocusThresholds) -> FocusQuality {
    if focus.focus_time_ms > thresholds.deep_focus_ms && focus.has_significant_activity {
        FocusQuality::DeepFocus
    } else if focus.focus_time_ms > thresholds.moderate_focus_ms {
        FocusQuality::ModerateFocus
    } else {
        FocusQuality::BriefVisit
    }
}

/// Content block fields are echoed unchanged; only the word count is judged
pub fn content_preference(
    content_type: &Value,
    word_count: f64,
    domain: &Value,
    headings: &Value,
    limits: &ContentLimits,
) -> ContentPreference {
    ContentPreference {
        content_type: content_type.clone(),
        prefers_long_content: word_count > limits.long_content_words,
        domain: domain.clone(),
        topics: headings.clone(),
    }
}
