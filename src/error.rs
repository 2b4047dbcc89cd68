//! Error types for the MindCache engine
//!
//! Stages inside the engine return [`AnalysisError`] and propagate with `?`.
//! At the analyzer boundary an error is folded into an [`AnalysisFailure`],
//! the structured value handed back to callers instead of a raised error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No meaningful content to analyze")]
    NoMeaningfulContent,

    #[error("Type mismatch for `{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Payload must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("No data provided")]
    EmptyPayload,

    #[error("Failed to parse event payload: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl AnalysisError {
    /// Classify this error into the caller-facing taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::NoMeaningfulContent => ErrorKind::Input,
            _ => ErrorKind::Unexpected,
        }
    }

    pub(crate) fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        AnalysisError::TypeMismatch {
            field: field.into(),
            expected,
            found: value_type_name(found),
        }
    }
}

/// Failure category reported alongside every [`AnalysisFailure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The payload did not carry enough to analyze (e.g. text body too short)
    Input,
    /// The payload was malformed in a way the analyzer could not work around
    Unexpected,
}

/// Structured failure returned by an analyzer in place of a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub kind: ErrorKind,
    pub error: String,
    pub debug_info: DebugInfo,
}

impl AnalysisFailure {
    pub fn new(error: &AnalysisError, debug_info: DebugInfo) -> Self {
        Self {
            kind: error.kind(),
            error: error.to_string(),
            debug_info,
        }
    }

    pub fn is_input_error(&self) -> bool {
        self.kind == ErrorKind::Input
    }
}

/// Diagnostic context attached to a failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DebugInfo {
    /// Context for a rejected text body
    Content {
        content_keys: Vec<String>,
        data_keys: Vec<String>,
        text_length: usize,
    },
    /// Context for an unexpected failure: what the payload looked like
    Payload {
        payload_type: String,
        /// `None` when the payload was not a mapping
        payload_keys: Option<Vec<String>>,
    },
}

impl DebugInfo {
    pub fn for_payload(payload: &serde_json::Value) -> Self {
        DebugInfo::Payload {
            payload_type: value_type_name(payload).to_string(),
            payload_keys: payload
                .as_object()
                .map(|map| map.keys().cloned().collect()),
        }
    }
}

/// JSON type name used in diagnostics
pub fn value_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(AnalysisError::NoMeaningfulContent.kind(), ErrorKind::Input);
        assert_eq!(AnalysisError::EmptyPayload.kind(), ErrorKind::Unexpected);
        assert_eq!(
            AnalysisError::type_mismatch("wordCount", "number", &json!("12")).kind(),
            ErrorKind::Unexpected
        );
    }

    #[test]
    fn test_failure_serialization_shape() {
        let failure = AnalysisFailure::new(
            &AnalysisError::NoMeaningfulContent,
            DebugInfo::Content {
                content_keys: vec!["title".to_string()],
                data_keys: vec!["contentSummary".to_string()],
                text_length: 3,
            },
        );

        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["kind"], "input");
        assert_eq!(value["error"], "No meaningful content to analyze");
        assert_eq!(value["debug_info"]["text_length"], 3);
        assert_eq!(value["debug_info"]["content_keys"][0], "title");
    }

    #[test]
    fn test_payload_debug_for_non_object() {
        let info = DebugInfo::for_payload(&json!([1, 2, 3]));
        assert_eq!(
            info,
            DebugInfo::Payload {
                payload_type: "array".to_string(),
                payload_keys: None,
            }
        );
    }
}
