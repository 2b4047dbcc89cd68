//! Event payload normalization
//!
//! Telemetry events arrive as loosely shaped JSON objects. Any field may sit at
//! the top level or one level deeper under a `data` wrapper, and any field may
//! be missing. [`EventPayload::lookup`] encodes that fallback once so both
//! analyzers resolve fields the same way.

use crate::error::AnalysisError;
use serde_json::{Map, Value};

/// Key of the optional wrapper object
pub const DATA_KEY: &str = "data";

/// Payload field names read by the analyzers
pub mod keys {
    pub const ACTION: &str = "action";
    pub const CONTENT_SUMMARY: &str = "contentSummary";
    pub const READING_ANALYSIS: &str = "readingAnalysis";
    pub const FOCUS_TIME: &str = "focusTime";
    pub const HAS_SIGNIFICANT_ACTIVITY: &str = "hasSignificantActivity";

    // contentSummary
    pub const CONTENT_PREVIEW: &str = "contentPreview";
    pub const TEXT: &str = "text";
    pub const CONTENT_TYPE: &str = "contentType";
    pub const WORD_COUNT: &str = "wordCount";
    pub const DOMAIN: &str = "domain";
    pub const HEADINGS: &str = "headings";

    // readingAnalysis
    pub const ENGAGEMENT_SCORE: &str = "engagementScore";
    pub const ESTIMATED_READING_TIME: &str = "estimatedReadingTime";
    pub const READING_PATTERNS: &str = "readingPatterns";
    pub const FAST_SCROLL: &str = "fastScroll";
    pub const SLOW_SCROLL: &str = "slowScroll";
    pub const BACKTRACK: &str = "backtrack";
}

/// Truthiness of a JSON value: null, false, zero, and empty strings,
/// arrays, or objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Read-only view over a raw event payload
#[derive(Debug, Clone, Copy)]
pub struct EventPayload<'a> {
    root: &'a Map<String, Value>,
}

impl<'a> EventPayload<'a> {
    /// Wrap a payload value; only JSON objects are accepted
    pub fn new(value: &'a Value) -> Result<Self, AnalysisError> {
        value
            .as_object()
            .map(|root| Self { root })
            .ok_or_else(|| AnalysisError::NotAnObject(crate::error::value_type_name(value)))
    }

    pub fn from_map(root: &'a Map<String, Value>) -> Self {
        Self { root }
    }

    /// Top-level keys in payload order
    pub fn keys(&self) -> Vec<String> {
        self.root.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The `data` wrapper, when it is an object
    pub fn data(&self) -> Option<&'a Map<String, Value>> {
        self.root.get(DATA_KEY).and_then(Value::as_object)
    }

    /// Resolve a field: the top-level value when truthy, else the value under
    /// `data`, else `None`. Null counts as absent.
    pub fn lookup(&self, key: &str) -> Option<&'a Value> {
        if let Some(top) = self.root.get(key).filter(|v| is_truthy(v)) {
            return Some(top);
        }
        self.data()
            .and_then(|data| data.get(key))
            .filter(|v| !v.is_null())
    }

    /// [`lookup`](Self::lookup) with a fallback value
    pub fn lookup_or(&self, key: &str, default: &'a Value) -> &'a Value {
        self.lookup(key).unwrap_or(default)
    }

    /// Action tag of the event, if it carries a string one.
    ///
    /// Read from the top level only; an action inside `data` does not count.
    pub fn action(&self) -> Option<&'a str> {
        self.root.get(keys::ACTION).and_then(Value::as_str)
    }

    /// The `contentSummary` block
    pub fn content_block(&self) -> Result<Block<'a>, AnalysisError> {
        Block::from_value(self.lookup(keys::CONTENT_SUMMARY), keys::CONTENT_SUMMARY)
    }

    /// The `readingAnalysis` block
    pub fn reading_signals(&self) -> Result<Block<'a>, AnalysisError> {
        Block::from_value(self.lookup(keys::READING_ANALYSIS), keys::READING_ANALYSIS)
    }

    /// Focus time in milliseconds (0 when absent)
    pub fn focus_time_ms(&self) -> Result<f64, AnalysisError> {
        match self.lookup(keys::FOCUS_TIME) {
            Some(value) => as_number(value, keys::FOCUS_TIME),
            None => Ok(0.0),
        }
    }

    pub fn has_significant_activity(&self) -> bool {
        self.lookup(keys::HAS_SIGNIFICANT_ACTIVITY)
            .map(is_truthy)
            .unwrap_or(false)
    }

    /// Resolve the text body to analyze.
    ///
    /// Tries `contentSummary.contentPreview`, then `contentSummary.text`, then
    /// `data.contentSummary.text`, moving on only while the previous source is
    /// empty or missing. Returns an empty string when all three are.
    pub fn text_body(&self, content: &Block<'a>) -> Result<&'a str, AnalysisError> {
        let preview = content.str_or(keys::CONTENT_PREVIEW, "")?;
        if !preview.is_empty() {
            return Ok(preview);
        }

        let text = content.str_or(keys::TEXT, "")?;
        if !text.is_empty() {
            return Ok(text);
        }

        let nested = Block::from_value(
            self.data().and_then(|data| data.get(keys::CONTENT_SUMMARY)),
            "data.contentSummary",
        )?;
        nested.str_or(keys::TEXT, "")
    }
}

/// A possibly-missing nested object inside the payload.
///
/// Accessors treat a missing block, a missing key, and a null value alike and
/// return the caller's default. A present value of the wrong type is an error.
#[derive(Debug, Clone)]
pub struct Block<'a> {
    map: Option<&'a Map<String, Value>>,
    path: String,
}

impl<'a> Block<'a> {
    pub fn empty(path: impl Into<String>) -> Self {
        Self {
            map: None,
            path: path.into(),
        }
    }

    pub fn from_value(value: Option<&'a Value>, path: impl Into<String>) -> Result<Self, AnalysisError> {
        let path = path.into();
        match value {
            None | Some(Value::Null) => Ok(Self { map: None, path }),
            Some(Value::Object(map)) => Ok(Self {
                map: Some(map),
                path,
            }),
            Some(other) => Err(AnalysisError::type_mismatch(path, "object", other)),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.map
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|m| m.get(key)).filter(|v| !v.is_null())
    }

    fn field(&self, key: &str) -> String {
        format!("{}.{}", self.path, key)
    }

    /// Nested object under `key`
    pub fn block(&self, key: &str) -> Result<Block<'a>, AnalysisError> {
        Block::from_value(self.get(key), self.field(key))
    }

    pub fn number_or(&self, key: &str, default: f64) -> Result<f64, AnalysisError> {
        match self.get(key) {
            Some(value) => as_number(value, &self.field(key)),
            None => Ok(default),
        }
    }

    pub fn str_or(&self, key: &str, default: &'a str) -> Result<&'a str, AnalysisError> {
        match self.get(key) {
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(AnalysisError::type_mismatch(self.field(key), "string", other)),
            None => Ok(default),
        }
    }

    /// Value under `key` of any shape, cloned as sent
    pub fn value_or(&self, key: &str, default: Value) -> Value {
        self.get(key).cloned().unwrap_or(default)
    }
}

/// Numeric reading of a value; booleans count as 0 or 1
fn as_number(value: &Value, field: &str) -> Result<f64, AnalysisError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| AnalysisError::type_mismatch(field, "number", value)),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(AnalysisError::type_mismatch(field, "number", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!(" ")));
        assert!(is_truthy(&json!({"a": 1})));
    }

    #[test]
    fn test_top_level_wins_over_data() {
        let value = json!({
            "focusTime": 1000,
            "data": { "focusTime": 2000 }
        });
        let payload = EventPayload::new(&value).unwrap();
        assert_eq!(payload.lookup("focusTime"), Some(&json!(1000)));
        assert_eq!(payload.focus_time_ms().unwrap(), 1000.0);
    }

    #[test]
    fn test_falsy_top_level_falls_back_to_data() {
        let value = json!({
            "focusTime": 0,
            "data": { "focusTime": 2000 }
        });
        let payload = EventPayload::new(&value).unwrap();
        assert_eq!(payload.focus_time_ms().unwrap(), 2000.0);
    }

    #[test]
    fn test_missing_everywhere_uses_default() {
        let value = json!({ "data": {} });
        let payload = EventPayload::new(&value).unwrap();
        let default = json!(42);
        assert_eq!(payload.lookup_or("focusTime", &default), &json!(42));
        assert_eq!(payload.focus_time_ms().unwrap(), 0.0);
        assert!(!payload.has_significant_activity());
    }

    #[test]
    fn test_non_object_data_is_ignored() {
        let value = json!({ "data": "opaque" });
        let payload = EventPayload::new(&value).unwrap();
        assert!(payload.data().is_none());
        assert!(payload.lookup("focusTime").is_none());
    }

    #[test]
    fn test_non_object_payload_rejected() {
        let value = json!("just a string");
        assert!(matches!(
            EventPayload::new(&value),
            Err(AnalysisError::NotAnObject("string"))
        ));
    }

    #[test]
    fn test_text_body_prefers_preview() {
        let value = json!({
            "contentSummary": { "contentPreview": "preview text", "text": "full text" }
        });
        let payload = EventPayload::new(&value).unwrap();
        let content = payload.content_block().unwrap();
        assert_eq!(payload.text_body(&content).unwrap(), "preview text");
    }

    #[test]
    fn test_text_body_falls_back_to_text() {
        let value = json!({
            "contentSummary": { "contentPreview": "", "text": "full text" }
        });
        let payload = EventPayload::new(&value).unwrap();
        let content = payload.content_block().unwrap();
        assert_eq!(payload.text_body(&content).unwrap(), "full text");
    }

    #[test]
    fn test_text_body_falls_back_to_wrapped_content() {
        let value = json!({
            "contentSummary": { "title": "Top-level block without text" },
            "data": { "contentSummary": { "text": "wrapped text" } }
        });
        let payload = EventPayload::new(&value).unwrap();
        let content = payload.content_block().unwrap();
        assert_eq!(content.keys(), vec!["title".to_string()]);
        assert_eq!(payload.text_body(&content).unwrap(), "wrapped text");
    }

    #[test]
    fn test_content_block_from_data_wrapper() {
        let value = json!({
            "data": { "contentSummary": { "contentPreview": "wrapped preview" } }
        });
        let payload = EventPayload::new(&value).unwrap();
        let content = payload.content_block().unwrap();
        assert_eq!(payload.text_body(&content).unwrap(), "wrapped preview");
    }

    #[test]
    fn test_text_body_type_mismatch() {
        let value = json!({ "contentSummary": { "contentPreview": 12345 } });
        let payload = EventPayload::new(&value).unwrap();
        let content = payload.content_block().unwrap();
        let err = payload.text_body(&content).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Type mismatch for `contentSummary.contentPreview`: expected string, found number"
        );
    }

    #[test]
    fn test_block_accessors() {
        let value = json!({
            "readingAnalysis": {
                "engagementScore": 75,
                "readingPatterns": { "fastScroll": 3, "backtrack": null }
            }
        });
        let payload = EventPayload::new(&value).unwrap();
        let reading = payload.reading_signals().unwrap();
        assert_eq!(reading.number_or("engagementScore", 0.0).unwrap(), 75.0);
        assert_eq!(reading.number_or("estimatedReadingTime", 0.0).unwrap(), 0.0);

        let patterns = reading.block("readingPatterns").unwrap();
        assert_eq!(patterns.number_or("fastScroll", 0.0).unwrap(), 3.0);
        assert_eq!(patterns.number_or("backtrack", 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_block_type_mismatch_reports_path() {
        let value = json!({ "readingAnalysis": { "readingPatterns": [1, 2] } });
        let payload = EventPayload::new(&value).unwrap();
        let reading = payload.reading_signals().unwrap();
        match reading.block("readingPatterns") {
            Err(AnalysisError::TypeMismatch { field, expected, found }) => {
                assert_eq!(field, "readingAnalysis.readingPatterns");
                assert_eq!(expected, "object");
                assert_eq!(found, "array");
            }
            other => panic!("expected type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_value_or() {
        let value = json!({
            "contentSummary": { "headings": [{ "text": "Intro" }], "domain": null }
        });
        let payload = EventPayload::new(&value).unwrap();
        let content = payload.content_block().unwrap();
        assert_eq!(
            content.value_or("headings", json!([])),
            json!([{ "text": "Intro" }])
        );
        assert_eq!(content.value_or("domain", json!("")), json!(""));
        assert_eq!(content.value_or("missing", json!([])), json!([]));
    }

    #[test]
    fn test_action_read_from_top_level_only() {
        let value = json!({ "action": "page_session", "data": { "action": "tab_switch" } });
        assert_eq!(EventPayload::new(&value).unwrap().action(), Some("page_session"));

        let value = json!({ "data": { "action": "reading_session" } });
        assert_eq!(EventPayload::new(&value).unwrap().action(), None);
    }
}
