//! Content analysis module
//!
//! Turns the text carried by a telemetry event into sentiment, topics,
//! entities, reading metrics and an extractive summary.
//!
//! Pipeline: Event JSON → text body resolution → validation → text statistics → ContentAnalysis

pub mod pipeline;
pub mod types;

pub use pipeline::{analyze_content, analyze_content_with_config, classify_sentiment};
pub use types::{ContentAnalysis, ReadingMetrics, Sentiment, SentimentClass};
