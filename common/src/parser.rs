//! Model reply parser
//!
//! Extracts the JSON object from a chat-completion reply. Models often wrap
//! their answer in a Markdown code fence (```` ``` ```` or ```` ```json ````),
//! sometimes with a sentence of prose around it.
//!
//! Parsing is best-effort: a reply that is not a JSON object is returned as a
//! raw-text fallback instead of an error.

use crate::error::{Error, Result};
use crate::types::{Classification, ClassificationResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// The whole reply is one fenced block
    static ref SURROUNDING_FENCE: Regex =
        Regex::new(r"(?s)^```[ \t]*[A-Za-z0-9_+\-]*[ \t]*\r?\n?(.*?)\r?\n?[ \t]*```$").unwrap();

    /// First fenced block anywhere in the reply
    static ref EMBEDDED_FENCE: Regex =
        Regex::new(r"(?s)```[ \t]*[A-Za-z0-9_+\-]*[ \t]*\r?\n(.*?)```").unwrap();
}

/// Remove a code fence surrounding the whole text
///
/// Text without a surrounding fence comes back trimmed. An opening fence whose
/// closing fence was cut off is removed on its own.
///
/// # Examples
/// ```
/// use chefsort_common::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
/// ```
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(caps) = SURROUNDING_FENCE.captures(trimmed) {
        if let Some(inner) = caps.get(1) {
            return inner.as_str().trim();
        }
    }

    // no closing fence
    if trimmed.starts_with("```") {
        return match trimmed.find('\n') {
            Some(newline) => trimmed[newline + 1..].trim(),
            None => trimmed.trim_start_matches('`').trim(),
        };
    }

    trimmed
}

/// First fenced block inside surrounding prose
pub fn extract_fenced_block(text: &str) -> Option<&str> {
    EMBEDDED_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Strict parse of a JSON object
///
/// Fails with `Error::Json` on malformed JSON and `Error::Parse` when the
/// value is valid JSON but not an object.
pub fn parse_json_object(text: &str) -> Result<ClassificationResult> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(ClassificationResult::from_map(map)),
        other => Err(Error::Parse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Best-effort classification parse
///
/// 1. Strip a surrounding fence and parse
/// 2. Otherwise parse the first fenced block in the text
/// 3. Otherwise fall back to the original text
pub fn parse_classification(content: &str) -> Classification {
    if let Ok(result) = parse_json_object(strip_code_fence(content)) {
        return Classification::Structured(result);
    }

    if let Some(block) = extract_fenced_block(content) {
        if let Ok(result) = parse_json_object(block) {
            return Classification::Structured(result);
        }
    }

    Classification::RawTextFallback {
        text: content.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
