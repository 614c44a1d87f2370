//! Schema classification for decoded model replies.
//!
//! The classifier turns whatever the model produced into a
//! [`ResponseEnvelope`], walking a first-match-wins ladder: the current
//! items schema, the legacy recommendations schema, a wrapper for any other
//! valid JSON, and a plain-text fallback. Every path yields an envelope;
//! classification never fails.

use serde_json::Value;

use crate::analysis::extract::extract_json_span;
use crate::analysis::types::{DEFAULT_CATEGORY, ItemBody, ResponseEnvelope, ResultItem};

/// Longest prefix of free-form model text kept in the fallback description
const FALLBACK_DESCRIPTION_LIMIT: usize = 500;

/// Normalize a raw model reply into an envelope.
///
/// Composes span extraction, decoding, and classification. Total: a missing
/// or undecodable payload degrades to the text fallback rather than
/// surfacing an error.
pub fn normalize(raw: &str, prompt_name: &str) -> ResponseEnvelope {
    match extract_json_span(raw) {
        Some(candidate) => match serde_json::from_str::<Value>(candidate) {
            Ok(decoded) => classify(&decoded, prompt_name),
            Err(e) => {
                tracing::debug!("Extracted span failed to decode: {e}");
                fallback_envelope(raw, prompt_name)
            }
        },
        None => fallback_envelope(raw, prompt_name),
    }
}

/// Classify a decoded payload into an envelope, first match wins.
pub fn classify(decoded: &Value, prompt_name: &str) -> ResponseEnvelope {
    if let Some(envelope) = classify_current(decoded, prompt_name) {
        return envelope;
    }
    if let Some(envelope) = classify_legacy(decoded, prompt_name) {
        return envelope;
    }

    // Valid JSON in no known shape: wrap the whole object as one insight.
    let item = ResultItem::new(
        DEFAULT_CATEGORY,
        ItemBody::Insight {
            title: "Custom Analysis".to_string(),
            description: decoded.to_string(),
        },
    );
    ResponseEnvelope::new("analysis", vec![item], prompt_name)
}

/// Plain-text fallback when no structured payload was found.
pub fn fallback_envelope(raw: &str, prompt_name: &str) -> ResponseEnvelope {
    let description = if raw.chars().count() > FALLBACK_DESCRIPTION_LIMIT {
        let truncated: String = raw.chars().take(FALLBACK_DESCRIPTION_LIMIT).collect();
        format!("{truncated}...")
    } else {
        raw.to_string()
    };

    let item = ResultItem::new(
        DEFAULT_CATEGORY,
        ItemBody::Insight {
            title: "Text Analysis".to_string(),
            description,
        },
    );
    ResponseEnvelope::new("analysis", vec![item], prompt_name)
}

/// Current schema: `items` array plus a `response_type` string.
fn classify_current(decoded: &Value, prompt_name: &str) -> Option<ResponseEnvelope> {
    let entries = decoded.get("items")?.as_array()?;
    let response_type = decoded.get("response_type")?.as_str()?;

    // Entries missing either key are dropped; a partially malformed reply
    // should not abort the whole response.
    let items = entries.iter().filter_map(convert_entry).collect();
    Some(ResponseEnvelope::new(response_type, items, prompt_name))
}

/// Legacy schema: `recommendations` or `feedback` array of suggestions.
fn classify_legacy(decoded: &Value, prompt_name: &str) -> Option<ResponseEnvelope> {
    let entries = decoded
        .get("recommendations")
        .or_else(|| decoded.get("feedback"))?
        .as_array()?;

    let items = entries
        .iter()
        .filter_map(|entry| {
            let obj = entry.as_object()?;
            let suggestion = obj.get("suggestion")?;
            let category = obj
                .get("category")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_CATEGORY);
            Some(ResultItem::new(
                category,
                ItemBody::Feedback {
                    suggestion: lenient_string(suggestion),
                    priority: priority_field(obj.get("priority"), "medium"),
                },
            ))
        })
        .collect();

    Some(ResponseEnvelope::new("feedback", items, prompt_name))
}

fn convert_entry(entry: &Value) -> Option<ResultItem> {
    let kind = entry.get("type")?.as_str()?;
    let content = entry.get("content")?;

    let category = content
        .get("category")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

    let body = match kind {
        "feedback" => ItemBody::Feedback {
            suggestion: content
                .get("suggestion")
                .map(lenient_string)
                .unwrap_or_default(),
            priority: priority_field(content.get("priority"), "medium"),
        },
        "citation" => ItemBody::Citation {
            source: str_field(content, "source"),
            title: str_field(content, "title"),
            url: str_field(content, "url"),
            relevance: str_field(content, "relevance"),
            priority: priority_field(content.get("priority"), "medium"),
        },
        "diff" => ItemBody::Diff {
            original: str_field(content, "original"),
            suggested: str_field(content, "suggested"),
            reason: str_field(content, "reason"),
            priority: priority_field(content.get("priority"), "high"),
        },
        "analysis" | "insight" => ItemBody::Insight {
            title: str_field(content, "title").unwrap_or_else(|| "Analysis".to_string()),
            description: content
                .get("description")
                .map(lenient_string)
                .unwrap_or_default(),
        },
        other => ItemBody::Other {
            kind: other.to_string(),
            content: content.clone(),
        },
    };

    Some(ResultItem::new(category, body))
}

/// Non-empty string field, absent otherwise.
fn str_field(content: &Value, key: &str) -> Option<String> {
    content
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// String form of a value without JSON quoting for plain strings.
fn lenient_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn priority_field(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}
