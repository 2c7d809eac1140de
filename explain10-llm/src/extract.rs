//! Parsing and normalization of generated text.
//!
//! Models asked for "JSON only" still wrap it in prose now and then
//! (`Sure! {...} Hope that helps`). Parsing is strict first, then falls back
//! to the span from the first `{` to the last `}`.

use std::sync::LazyLock;

use explain10_core::{ExplainResult, MAX_CURIOUS_QUESTIONS};
use regex::Regex;
use serde_json::{Map, Value};

static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("object span regex is valid"));

/// Parse `text` as JSON, recovering an embedded `{...}` span if needed.
///
/// Returns `None` when neither the whole text nor the span parses.
#[must_use]
pub fn parse_lenient(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }
    let span = OBJECT_SPAN.find(text)?;
    serde_json::from_str(span.as_str()).ok()
}

/// Normalize a parsed value into an [`ExplainResult`].
///
/// Returns `None` unless `value` is a JSON object. Missing or non-string
/// fields become empty strings; `curiousQuestions` is honored only when it
/// is an array and is cut to [`MAX_CURIOUS_QUESTIONS`] entries.
#[must_use]
pub fn normalize(value: &Value) -> Option<ExplainResult> {
    let obj = value.as_object()?;
    Some(ExplainResult {
        simple_explanation: string_field(obj, "simpleExplanation"),
        analogy: string_field(obj, "analogy"),
        real_world_example: string_field(obj, "realWorldExample"),
        curious_questions: questions(obj.get("curiousQuestions")),
    })
}

/// Parse and normalize in one step.
#[must_use]
pub fn extract_result(text: &str) -> Option<ExplainResult> {
    parse_lenient(text).as_ref().and_then(normalize)
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn questions(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .take(MAX_CURIOUS_QUESTIONS)
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect()
}
