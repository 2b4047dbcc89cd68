//! FFI bindings for MindCache Engine
//!
//! This module provides C-compatible functions for calling the engine from other languages.
//! All functions take and return JSON as null-terminated C strings; returned strings are
//! allocated by the engine and must be freed by the caller using `mindcache_free_string`.
//!
//! An analyzer failure is not an FFI error: it comes back as a JSON failure object.
//! NULL is only returned when the input pointer or the input JSON itself is invalid.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::pipeline::EventAnalyzer;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Shared body of every JSON-in/JSON-out entry point
unsafe fn run_json<F>(json: *const c_char, analyze: F) -> *mut c_char
where
    F: FnOnce(&str) -> Result<String, AnalysisError>,
{
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match analyze(&json_str) {
        Ok(result) => string_to_cstr(&result),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Run content analysis over one JSON event payload.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `mindcache_free_string`.
/// - Returns NULL on error; call `mindcache_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn mindcache_analyze_content(json: *const c_char) -> *mut c_char {
    run_json(json, crate::pipeline::analyze_content_json)
}

/// Run behavior analysis over one JSON event payload.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `mindcache_free_string`.
/// - Returns NULL on error; call `mindcache_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn mindcache_analyze_behavior(json: *const c_char) -> *mut c_char {
    run_json(json, crate::pipeline::analyze_behavior_json)
}

/// Analyze one JSON event and return the JSON event report.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `mindcache_free_string`.
/// - Returns NULL on error (including an empty event); call `mindcache_last_error`.
#[no_mangle]
pub unsafe extern "C" fn mindcache_analyze_event(json: *const c_char) -> *mut c_char {
    run_json(json, crate::pipeline::analyze_event_json)
}

// ============================================================================
// Configured Analyzer API
// ============================================================================

/// Opaque handle to an EventAnalyzer
pub struct EventAnalyzerHandle {
    analyzer: EventAnalyzer,
}

/// Create a new EventAnalyzer.
///
/// # Safety
/// - `config_json` may be NULL for the default configuration; otherwise it must be a
///   valid null-terminated C string holding an `AnalyzerConfig` JSON object.
/// - Returns a pointer that must be freed with `mindcache_analyzer_free`.
/// - Returns NULL if the configuration is invalid; call `mindcache_last_error`.
#[no_mangle]
pub unsafe extern "C" fn mindcache_analyzer_new(
    config_json: *const c_char,
) -> *mut EventAnalyzerHandle {
    clear_last_error();

    let config = if config_json.is_null() {
        AnalyzerConfig::default()
    } else {
        let config_str = match cstr_to_string(config_json) {
            Some(s) => s,
            None => {
                set_last_error("Invalid config string pointer");
                return ptr::null_mut();
            }
        };
        match AnalyzerConfig::from_json(&config_str) {
            Ok(config) => config,
            Err(e) => {
                set_last_error(&e.to_string());
                return ptr::null_mut();
            }
        }
    };

    let handle = Box::new(EventAnalyzerHandle {
        analyzer: EventAnalyzer::with_config(config),
    });
    Box::into_raw(handle)
}

/// Free an EventAnalyzer.
///
/// # Safety
/// - `analyzer` must be a valid pointer returned by `mindcache_analyzer_new`.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn mindcache_analyzer_free(analyzer: *mut EventAnalyzerHandle) {
    if !analyzer.is_null() {
        drop(Box::from_raw(analyzer));
    }
}

/// Analyze one JSON event with a configured analyzer.
///
/// # Safety
/// - `analyzer` must be a valid pointer returned by `mindcache_analyzer_new`.
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `mindcache_free_string`.
/// - Returns NULL on error; call `mindcache_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn mindcache_analyzer_analyze_event(
    analyzer: *const EventAnalyzerHandle,
    json: *const c_char,
) -> *mut c_char {
    if analyzer.is_null() {
        clear_last_error();
        set_last_error("Null analyzer pointer");
        return ptr::null_mut();
    }

    let handle = &*analyzer;
    run_json(json, |s| handle.analyzer.analyze_event_json(s))
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by any mindcache_* function.
///
/// # Safety
/// - `s` must be a pointer returned by a mindcache_* function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn mindcache_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a static string that is valid until the next mindcache_* call
///   on the same thread.
/// - Returns NULL if there was no error.
/// - Do NOT free this pointer.
#[no_mangle]
pub unsafe extern "C" fn mindcache_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the engine version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free this pointer.
#[no_mangle]
pub unsafe extern "C" fn mindcache_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample_event_json() -> CString {
        CString::new(
            r#"{
            "action": "page_session",
            "focusTime": 120000,
            "contentSummary": {
                "contentType": "blog",
                "contentPreview": "Gardening is a relaxing hobby. Tomatoes grow well in sunny gardens."
            },
            "readingAnalysis": { "engagementScore": 45, "estimatedReadingTime": 20 }
        }"#,
        )
        .unwrap()
    }

    unsafe fn take_json(ptr: *mut c_char) -> Value {
        assert!(!ptr.is_null());
        let value = serde_json::from_str(CStr::from_ptr(ptr).to_str().unwrap()).unwrap();
        mindcache_free_string(ptr);
        value
    }

    #[test]
    fn test_ffi_analyze_event() {
        let json = sample_event_json();

        unsafe {
            let report = take_json(mindcache_analyze_event(json.as_ptr()));
            assert_eq!(report["action"], "page_session");
            assert_eq!(report["content_analysis"]["content_type"], "blog");
            assert_eq!(report["behavior_analysis"]["engagement_level"], "medium");
            assert_eq!(report["behavior_analysis"]["focus_quality"], "moderate_focus");
            assert!(mindcache_last_error().is_null());
        }
    }

    #[test]
    fn test_ffi_single_analyzers() {
        let json = sample_event_json();

        unsafe {
            let content = take_json(mindcache_analyze_content(json.as_ptr()));
            assert_eq!(content["reading_metrics"]["sentence_count"], 2);

            let behavior = take_json(mindcache_analyze_behavior(json.as_ptr()));
            assert_eq!(behavior["reading_style"], "unknown");
        }
    }

    #[test]
    fn test_ffi_analyzer_failure_is_not_null() {
        let json = CString::new(r#"{"contentSummary": {"text": "hi"}}"#).unwrap();

        unsafe {
            let failure = take_json(mindcache_analyze_content(json.as_ptr()));
            assert_eq!(failure["error"], "No meaningful content to analyze");
            assert_eq!(failure["kind"], "input");
        }
    }

    #[test]
    fn test_ffi_analyzer_lifecycle() {
        let config = CString::new(r#"{"analyzed_actions": ["page_session"]}"#).unwrap();
        let json = sample_event_json();

        unsafe {
            let analyzer = mindcache_analyzer_new(config.as_ptr());
            assert!(!analyzer.is_null());

            let report = take_json(mindcache_analyzer_analyze_event(analyzer, json.as_ptr()));
            assert!(report["producer"]["instance_id"].is_string());
            assert!(report.get("content_analysis").is_some());

            mindcache_analyzer_free(analyzer);

            let default_analyzer = mindcache_analyzer_new(ptr::null());
            assert!(!default_analyzer.is_null());
            mindcache_analyzer_free(default_analyzer);
        }
    }

    #[test]
    fn test_ffi_invalid_config() {
        let config = CString::new(r#"{"focus": {"deep_focus_ms": 1000}}"#).unwrap();

        unsafe {
            let analyzer = mindcache_analyzer_new(config.as_ptr());
            assert!(analyzer.is_null());

            let error = CStr::from_ptr(mindcache_last_error()).to_str().unwrap();
            assert!(error.starts_with("Invalid configuration"));
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        unsafe {
            let invalid_json = CString::new("not json").unwrap();
            let result = mindcache_analyze_event(invalid_json.as_ptr());
            assert!(result.is_null());

            let error = mindcache_last_error();
            assert!(!error.is_null());
            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(error_str.starts_with("Invalid JSON"));

            let empty = CString::new("{}").unwrap();
            assert!(mindcache_analyze_event(empty.as_ptr()).is_null());
            let error_str = CStr::from_ptr(mindcache_last_error()).to_str().unwrap();
            assert_eq!(error_str, "No data provided");

            assert!(mindcache_analyze_event(ptr::null()).is_null());
            assert!(mindcache_analyzer_analyze_event(ptr::null(), invalid_json.as_ptr()).is_null());
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = mindcache_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert_eq!(version_str, crate::ENGINE_VERSION);
        }
    }
}
