//! Reading behavior analysis module
//!
//! This module processes the reading signals attached to a browsing event
//! (engagement score, scroll patterns, focus time) and classifies engagement,
//! reading style, focus quality and content preference.
//!
//! Pipeline: Event JSON → Adapter → Features (classifiers) → BehaviorAnalysis

pub mod adapter;
pub mod features;
pub mod pipeline;
pub mod types;

pub use pipeline::{analyze_behavior, analyze_behavior_with_config};
pub use types::{
    BehaviorAnalysis, BehaviorDebugInfo, BehaviorSignals, ContentPreference, EngagementLevel,
    FocusQuality, FocusSignals, ReadingPatterns, ReadingSignals, ReadingStyle,
};
