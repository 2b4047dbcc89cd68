//! MindCache Engine - On-device analysis of browsing telemetry
//!
//! The engine turns loosely shaped browser-extension events into structured
//! insights through two deterministic analyzers: content analysis (sentiment,
//! topics, entities, readability, summary) and reading behavior analysis
//! (engagement, reading style, focus quality, content preference).
//!
//! ## Modules
//!
//! - **Content Analyzer**: Text body → sentiment, topics, entities, metrics, summary
//! - **Behavior Analyzer**: Reading signals → engagement, style, focus, preference
//! - **Event Pipeline**: Whole events → stamped reports, JSON in and JSON out

pub mod behavior;
pub mod config;
pub mod content;
pub mod error;
pub mod payload;
pub mod pipeline;
pub mod text;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use behavior::{analyze_behavior, analyze_behavior_with_config, BehaviorAnalysis};
pub use config::AnalyzerConfig;
pub use content::{analyze_content, analyze_content_with_config, ContentAnalysis};
pub use error::{AnalysisError, AnalysisFailure, ErrorKind};
pub use pipeline::{analyze_event, AnalysisReport, EventAnalyzer, EventReport};

/// Engine version embedded in every event report
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for event reports
pub const PRODUCER_NAME: &str = "mindcache-engine";
