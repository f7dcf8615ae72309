//! Cleanup of generated text.
//!
//! The backend likes to wrap structured output in markdown fences and pad
//! it with commentary; these helpers dig the payload out.

use std::sync::LazyLock;

use agentsite_core::{Error, Result};
use regex::Regex;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*").expect("fence regex is valid"));

static JSON_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[\s\S]*\]").expect("array regex is valid"));

/// Strip markdown code fences and trim surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

/// Words beginning with `#`, in order of appearance.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|word| word.starts_with('#'))
        .map(|word| word.to_string())
        .collect()
}

/// Parse a JSON string array out of generated text, tolerating fences and
/// surrounding prose.
pub fn parse_json_array(text: &str) -> Result<Vec<String>> {
    let cleaned = strip_code_fences(text);
    let payload = JSON_ARRAY
        .find(&cleaned)
        .map(|m| m.as_str())
        .unwrap_or(&cleaned);
    serde_json::from_str(payload)
        .map_err(|e| Error::UnexpectedResponse(format!("malformed idea list: {e}")))
}
