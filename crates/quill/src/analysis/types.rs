//! Typed result items produced by the classifier.
//!
//! Defines the core data structures of the normalization pipeline: the
//! per-item sum type the renderer dispatches on, and the envelope that
//! carries one complete analysis result.

use serde_json::Value;

/// Grouping category applied when an item does not declare one
pub const DEFAULT_CATEGORY: &str = "Analysis";

/// One entry of a normalized model response
///
/// Items are immutable once constructed and are created only by the
/// classifier from model output.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    /// Grouping key for the renderer
    pub category: String,
    /// Kind-specific payload
    pub body: ItemBody,
}

/// Kind-specific payload of a result item
///
/// One variant per recognized kind plus a catch-all, so rendering dispatch
/// is exhaustive: every item the classifier emits has a rendering rule.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemBody {
    /// A suggestion with a priority level
    Feedback {
        suggestion: String,
        priority: String,
    },
    /// A source reference; all descriptive fields are optional
    Citation {
        source: Option<String>,
        title: Option<String>,
        url: Option<String>,
        relevance: Option<String>,
        priority: String,
    },
    /// A proposed text edit
    Diff {
        original: Option<String>,
        suggested: Option<String>,
        reason: Option<String>,
        priority: String,
    },
    /// A titled observation; covers both the `analysis` and `insight` kinds
    Insight { title: String, description: String },
    /// Anything with a kind the classifier does not recognize
    Other { kind: String, content: Value },
}

impl ResultItem {
    /// Create a new result item
    pub fn new(category: impl Into<String>, body: ItemBody) -> Self {
        Self {
            category: category.into(),
            body,
        }
    }

    /// Kind tag for logging
    pub fn kind(&self) -> &str {
        match &self.body {
            ItemBody::Feedback { .. } => "feedback",
            ItemBody::Citation { .. } => "citation",
            ItemBody::Diff { .. } => "diff",
            ItemBody::Insight { .. } => "insight",
            ItemBody::Other { kind, .. } => kind,
        }
    }
}

/// The normalized, typed result of one analysis request
///
/// Constructed once per request and returned to the caller; never
/// persisted. `items` may be empty but is never absent; an empty sequence
/// renders as a container with no entries, not an error.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    /// Advisory label from the model; not used for dispatch
    pub response_type: String,
    /// Ordered result items
    pub items: Vec<ResultItem>,
    /// Display name of the instruction that produced this result
    pub prompt_name: String,
}

impl ResponseEnvelope {
    /// Create a new response envelope
    pub fn new(
        response_type: impl Into<String>,
        items: Vec<ResultItem>,
        prompt_name: impl Into<String>,
    ) -> Self {
        Self {
            response_type: response_type.into(),
            items,
            prompt_name: prompt_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_item_kind() {
        let item = ResultItem::new(
            DEFAULT_CATEGORY,
            ItemBody::Feedback {
                suggestion: "tighten the intro".to_string(),
                priority: "medium".to_string(),
            },
        );
        assert_eq!(item.kind(), "feedback");

        let item = ResultItem::new(
            DEFAULT_CATEGORY,
            ItemBody::Other {
                kind: "quote".to_string(),
                content: serde_json::json!({"text": "hello"}),
            },
        );
        assert_eq!(item.kind(), "quote");
    }

    #[test]
    fn test_envelope_allows_empty_items() {
        let envelope = ResponseEnvelope::new("analysis", Vec::new(), "Grammar");
        assert!(envelope.items.is_empty());
        assert_eq!(envelope.response_type, "analysis");
        assert_eq!(envelope.prompt_name, "Grammar");
    }
}
