//! Event pipeline orchestration
//!
//! This module provides the public API for analyzing whole telemetry events.
//! An event is logged, stamped, and, when its action is one the configuration
//! selects, run through both the content and the behavior analyzer.

use crate::behavior::{analyze_behavior_with_config, BehaviorAnalysis};
use crate::config::AnalyzerConfig;
use crate::content::{analyze_content_with_config, ContentAnalysis};
use crate::error::{AnalysisError, AnalysisFailure};
use crate::payload::{keys, EventPayload};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Outcome of one analyzer: the full result or the full failure, never a mix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisReport<T> {
    Completed(T),
    Failed(AnalysisFailure),
}

impl<T> AnalysisReport<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, AnalysisReport::Completed(_))
    }

    pub fn completed(&self) -> Option<&T> {
        match self {
            AnalysisReport::Completed(result) => Some(result),
            AnalysisReport::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&AnalysisFailure> {
        match self {
            AnalysisReport::Completed(_) => None,
            AnalysisReport::Failed(failure) => Some(failure),
        }
    }
}

impl<T> From<Result<T, AnalysisFailure>> for AnalysisReport<T> {
    fn from(result: Result<T, AnalysisFailure>) -> Self {
        match result {
            Ok(value) => AnalysisReport::Completed(value),
            Err(failure) => AnalysisReport::Failed(failure),
        }
    }
}

/// Identifies the engine instance that produced a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Everything derived from one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventReport {
    pub producer: Producer,
    pub analyzed_at: DateTime<Utc>,
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_analysis: Option<AnalysisReport<ContentAnalysis>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior_analysis: Option<AnalysisReport<BehaviorAnalysis>>,
}

impl EventReport {
    /// Whether the event's action selected it for analysis
    pub fn was_analyzed(&self) -> bool {
        self.content_analysis.is_some() || self.behavior_analysis.is_some()
    }
}

/// Analyze one event with default configuration (stateless, one-shot).
///
/// # Example
/// ```
/// use serde_json::json;
///
/// let report = mindcache_engine::analyze_event(&json!({
///     "action": "page_session",
///     "focusTime": 75000,
///     "contentSummary": { "text": "A short but meaningful page body." }
/// }))
/// .unwrap();
/// assert!(report.was_analyzed());
/// ```
pub fn analyze_event(payload: &Value) -> Result<EventReport, AnalysisError> {
    EventAnalyzer::new().analyze_event(payload)
}

/// Analyze one JSON-encoded event and return the JSON-encoded report
pub fn analyze_event_json(json: &str) -> Result<String, AnalysisError> {
    EventAnalyzer::new().analyze_event_json(json)
}

/// Analyze the content of one JSON-encoded payload.
///
/// Only malformed JSON is an `Err`; an analyzer failure is encoded in the
/// returned JSON.
pub fn analyze_content_json(json: &str) -> Result<String, AnalysisError> {
    EventAnalyzer::new().analyze_content_json(json)
}

/// Analyze the reading behavior of one JSON-encoded payload
pub fn analyze_behavior_json(json: &str) -> Result<String, AnalysisError> {
    EventAnalyzer::new().analyze_behavior_json(json)
}

/// Parse NDJSON (newline-delimited JSON) event payloads, skipping blank lines
pub fn parse_ndjson(ndjson: &str) -> Result<Vec<Value>, AnalysisError> {
    let mut payloads = Vec::new();
    for (line_num, line) in ndjson.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(payload) => payloads.push(payload),
            Err(e) => {
                return Err(AnalysisError::ParseError(format!(
                    "Failed to parse line {}: {}",
                    line_num + 1,
                    e
                )));
            }
        }
    }
    Ok(payloads)
}

/// Parse a JSON array of event payloads
pub fn parse_array(json: &str) -> Result<Vec<Value>, AnalysisError> {
    let payloads: Vec<Value> = serde_json::from_str(json)?;
    Ok(payloads)
}

/// Configured analyzer for repeated use.
///
/// Holds no mutable state, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct EventAnalyzer {
    config: AnalyzerConfig,
    instance_id: String,
}

impl Default for EventAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl EventAnalyzer {
    /// Create an analyzer with default thresholds and a unique instance ID
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            config,
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an analyzer with a specific instance ID
    pub fn with_instance_id(mut self, instance_id: String) -> Self {
        self.instance_id = instance_id;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn analyze_content(&self, payload: &Value) -> Result<ContentAnalysis, AnalysisFailure> {
        analyze_content_with_config(payload, &self.config)
    }

    pub fn analyze_behavior(&self, payload: &Value) -> Result<BehaviorAnalysis, AnalysisFailure> {
        analyze_behavior_with_config(payload, &self.config)
    }

    /// Analyze one event.
    ///
    /// Fails only when there is no event to look at: the payload is not an
    /// object, or is an empty one. Analyzer failures are carried inside the
    /// report.
    pub fn analyze_event(&self, payload: &Value) -> Result<EventReport, AnalysisError> {
        let event = EventPayload::new(payload)?;
        if event.is_empty() {
            return Err(AnalysisError::EmptyPayload);
        }

        log::info!("Data keys: {:?}", event.keys());
        if let Some(content) = payload.get(keys::CONTENT_SUMMARY).and_then(Value::as_object) {
            log::debug!("Content summary keys: {:?}", content.keys().collect::<Vec<_>>());
        }
        if let Some(reading) = payload.get(keys::READING_ANALYSIS).and_then(Value::as_object) {
            log::debug!("Reading analysis keys: {:?}", reading.keys().collect::<Vec<_>>());
        }

        let action = event.action().map(str::to_string);
        let selected = action
            .as_deref()
            .map(|a| self.config.analyzes_action(a))
            .unwrap_or(false);

        let (content_analysis, behavior_analysis) = if selected {
            let content = AnalysisReport::from(self.analyze_content(payload));
            let behavior = AnalysisReport::from(self.analyze_behavior(payload));
            log::info!("Content analysis result: {:?}", content);
            log::info!("Behavior analysis result: {:?}", behavior);
            (Some(content), Some(behavior))
        } else {
            log::debug!("Action {:?} not selected for analysis", action);
            (None, None)
        };

        Ok(EventReport {
            producer: self.producer(),
            analyzed_at: Utc::now(),
            action,
            content_analysis,
            behavior_analysis,
        })
    }

    pub fn analyze_event_json(&self, json: &str) -> Result<String, AnalysisError> {
        let payload: Value = serde_json::from_str(json)?;
        let report = self.analyze_event(&payload)?;
        Ok(serde_json::to_string(&report)?)
    }

    pub fn analyze_content_json(&self, json: &str) -> Result<String, AnalysisError> {
        let payload: Value = serde_json::from_str(json)?;
        let report = AnalysisReport::from(self.analyze_content(&payload));
        Ok(serde_json::to_string(&report)?)
    }

    pub fn analyze_behavior_json(&self, json: &str) -> Result<String, AnalysisError> {
        let payload: Value = serde_json::from_str(json)?;
        let report = AnalysisReport::from(self.analyze_behavior(&payload));
        Ok(serde_json::to_string(&report)?)
    }

    fn producer(&self) -> Producer {
        Producer {
            name: PRODUCER_NAME.to_string(),
            version: ENGINE_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        }
    }
}
