//! Behavior signal adapter
//!
//! Reads the loosely shaped event payload into typed [`BehaviorSignals`].
//! Missing fields take their defaults; present fields of the wrong type are
//! errors.

use crate::behavior::types::{BehaviorSignals, FocusSignals, ReadingPatterns, ReadingSignals};
use crate::error::AnalysisError;
use crate::payload::{keys, Block, EventPayload};
use serde_json::json;

/// Extract every signal the behavior classifiers need
pub fn extract_signals(event: &EventPayload<'_>) -> Result<BehaviorSignals, AnalysisError> {
    let reading = extract_reading_signals(&event.reading_signals()?)?;

    let focus = FocusSignals {
        focus_time_ms: event.focus_time_ms()?,
        has_significant_activity: event.has_significant_activity(),
    };

    let content = event.content_block()?;

    Ok(BehaviorSignals {
        reading,
        focus,
        content_type: content.value_or(keys::CONTENT_TYPE, json!("unknown")),
        word_count: content.number_or(keys::WORD_COUNT, 0.0)?,
        domain: content.value_or(keys::DOMAIN, json!("")),
        headings: content.value_or(keys::HEADINGS, json!([])),
        raw_focus_time: event.lookup(keys::FOCUS_TIME).cloned().unwrap_or(json!(0)),
        payload_keys: event.keys(),
    })
}

fn extract_reading_signals(block: &Block<'_>) -> Result<ReadingSignals, AnalysisError> {
    let patterns = block.block(keys::READING_PATTERNS)?;

    Ok(ReadingSignals {
        engagement_score: block.number_or(keys::ENGAGEMENT_SCORE, 0.0)?,
        estimated_reading_time: block.number_or(keys::ESTIMATED_READING_TIME, 0.0)?,
        patterns: ReadingPatterns {
            fast_scroll: patterns.number_or(keys::FAST_SCROLL, 0.0)?,
            slow_scroll: patterns.number_or(keys::SLOW_SCROLL, 0.0)?,
            backtrack: patterns.number_or(keys::BACKTRACK, 0.0)?,
        },
        keys: block.keys(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_full_payload() {
        let value = json!({
            "action": "page_session",
            "focusTime": 420000,
            "hasSignificantActivity": true,
            "readingAnalysis": {
                "engagementScore": 82,
                "estimatedReadingTime": 240,
                "readingPatterns": { "fastScroll": 2, "slowScroll": 10, "backtrack": 1 }
            },
            "contentSummary": {
                "contentType": "article",
                "wordCount": 2300,
                "domain": "blog.example.org",
                "headings": ["Background", "Results"]
            }
        });
        let event = EventPayload::new(&value).unwrap();
        let signals = extract_signals(&event).unwrap();

        assert_eq!(signals.reading.engagement_score, 82.0);
        assert_eq!(signals.reading.estimated_reading_time, 240.0);
        assert_eq!(
            signals.reading.patterns,
            ReadingPatterns {
                fast_scroll: 2.0,
                slow_scroll: 10.0,
                backtrack: 1.0,
            }
        );
        assert_eq!(
            signals.reading.keys,
            vec!["engagementScore", "estimatedReadingTime", "readingPatterns"]
        );
        assert_eq!(signals.focus.focus_time_ms, 420000.0);
        assert_eq!(signals.raw_focus_time, json!(420000));
        assert!(signals.focus.has_significant_activity);
        assert_eq!(signals.content_type, "article");
        assert_eq!(signals.word_count, 2300.0);
        assert_eq!(signals.domain, "blog.example.org");
        assert_eq!(signals.headings, json!(["Background", "Results"]));
    }

    #[test]
    fn test_extract_defaults() {
        let value = json!({});
        let event = EventPayload::new(&value).unwrap();
        let signals = extract_signals(&event).unwrap();

        assert_eq!(signals.reading, ReadingSignals::default());
        assert_eq!(signals.focus, FocusSignals::default());
        assert_eq!(signals.content_type, "unknown");
        assert_eq!(signals.domain, "");
        assert_eq!(signals.headings, json!([]));
        assert_eq!(signals.raw_focus_time, json!(0));
    }

    #[test]
    fn test_extract_from_data_wrapper() {
        let value = json!({
            "data": {
                "focusTime": 90000,
                "hasSignificantActivity": true,
                "readingAnalysis": { "engagementScore": 55 }
            }
        });
        let event = EventPayload::new(&value).unwrap();
        let signals = extract_signals(&event).unwrap();

        assert_eq!(signals.focus.focus_time_ms, 90000.0);
        assert!(signals.focus.has_significant_activity);
        assert_eq!(signals.reading.engagement_score, 55.0);
    }

    #[test]
    fn test_string_score_rejected() {
        let value = json!({ "readingAnalysis": { "engagementScore": "75" } });
        let event = EventPayload::new(&value).unwrap();
        let err = extract_signals(&event).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Type mismatch for `readingAnalysis.engagementScore`: expected number, found string"
        );
    }

    #[test]
    fn test_content_fields_pass_through_any_shape() {
        let value = json!({
            "contentSummary": {
                "contentType": { "kind": "article" },
                "domain": 42,
                "headings": "Intro"
            }
        });
        let event = EventPayload::new(&value).unwrap();
        let signals = extract_signals(&event).unwrap();
        assert_eq!(signals.content_type, json!({ "kind": "article" }));
        assert_eq!(signals.domain, json!(42));
        assert_eq!(signals.headings, json!("Intro"));
    }

    #[test]
    fn test_string_word_count_rejected() {
        let value = json!({ "contentSummary": { "wordCount": "1200" } });
        let event = EventPayload::new(&value).unwrap();
        assert!(matches!(
            extract_signals(&event),
            Err(AnalysisError::TypeMismatch { .. })
        ));
    }
}
