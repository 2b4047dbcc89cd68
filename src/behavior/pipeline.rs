//! Behavior analysis orchestration
//!
//! Adapter → classifiers → [`BehaviorAnalysis`]. Any failure along the way is
//! logged and returned as an [`AnalysisFailure`] carrying the payload shape.

use crate::behavior::adapter::extract_signals;
use crate::behavior::features::{
    assess_focus_quality, classify_engagement, content_preference, determine_reading_style,
};
use crate::behavior::types::{BehaviorAnalysis, BehaviorDebugInfo, BehaviorSignals};
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, AnalysisFailure, DebugInfo};
use crate::payload::EventPayload;
use serde_json::Value;

/// Analyze the reading behavior of an event payload with default thresholds.
///
/// # Example
/// ```
/// use mindcache_engine::behavior::{EngagementLevel, ReadingStyle};
/// use serde_json::json;
///
/// let payload = json!({
///     "readingAnalysis": {
///         "engagementScore": 75,
///         "estimatedReadingTime": 65,
///         "readingPatterns": { "fastScroll": 1, "slowScroll": 8, "backtrack": 1 }
///     }
/// });
/// let analysis = mindcache_engine::analyze_behavior(&payload).unwrap();
/// assert_eq!(analysis.engagement_level, EngagementLevel::High);
/// assert_eq!(analysis.reading_style, ReadingStyle::Careful);
/// ```
pub fn analyze_behavior(payload: &Value) -> Result<BehaviorAnalysis, AnalysisFailure> {
    analyze_behavior_with_config(payload, &AnalyzerConfig::default())
}

/// Analyze the reading behavior of an event payload
pub fn analyze_behavior_with_config(
    payload: &Value,
    config: &AnalyzerConfig,
) -> Result<BehaviorAnalysis, AnalysisFailure> {
    let signals = EventPayload::new(payload)
        .and_then(|event| extract_signals(&event))
        .map_err(|e| unexpected(payload, e))?;

    Ok(classify(signals, config))
}

/// Run every classifier over already extracted signals
pub fn classify(signals: BehaviorSignals, config: &AnalyzerConfig) -> BehaviorAnalysis {
    let engagement_level = classify_engagement(&signals.reading, &config.engagement);
    let reading_style = determine_reading_style(&signals.reading.patterns, &config.reading_style);
    let focus_quality = assess_focus_quality(&signals.focus, &config.focus);
    let content_preference = content_preference(
        &signals.content_type,
        signals.word_count,
        &signals.domain,
        &signals.headings,
        &config.content,
    );

    BehaviorAnalysis {
        engagement_level,
        reading_style,
        focus_quality,
        content_preference,
        debug_info: BehaviorDebugInfo {
            reading_data_keys: signals.reading.keys,
            focus_time: signals.raw_focus_time,
            has_activity: signals.focus.has_significant_activity,
            interaction_keys: signals.payload_keys,
        },
    }
}

fn unexpected(payload: &Value, error: AnalysisError) -> AnalysisFailure {
    log::error!("Behavior analysis error: {}", error);
    AnalysisFailure::new(&error, DebugInfo::for_payload(payload))
}
