//! JSON span extraction from raw model replies.

/// Locate a structured payload inside an unstructured reply.
///
/// Returns the span from the first `{` to the last `}` in the text: a
/// single greedy match, not a balanced-brace parse. This tolerates models
/// that wrap JSON in prose or markdown fences, at the cost of being fooled
/// by stray braces in surrounding text: a brace after the real payload
/// widens the span and the decode then fails. Known limitation, kept for
/// compatibility; callers treat a failed decode of the span as "no
/// structured payload present".
pub fn extract_json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bare_json() {
        assert_eq!(extract_json_span(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn extracts_json_wrapped_in_prose() {
        let raw = "Sure! Here is the result:\n{\"a\": 1}\nLet me know if you need more.";
        assert_eq!(extract_json_span(raw), Some("{\"a\": 1}"));
    }

    #[test]
    fn extracts_json_inside_markdown_fence() {
        let raw = "```json\n{\"items\": []}\n```";
        assert_eq!(extract_json_span(raw), Some("{\"items\": []}"));
    }

    #[test]
    fn returns_none_without_braces() {
        assert_eq!(extract_json_span("no structure here"), None);
        assert_eq!(extract_json_span(""), None);
    }

    #[test]
    fn returns_none_when_braces_are_reversed() {
        assert_eq!(extract_json_span("} nothing {"), None);
    }

    #[test]
    fn greedy_span_includes_trailing_prose_braces() {
        // A stray closing brace after the payload widens the span; the
        // caller's decode fails and falls back to plain-text handling.
        let raw = r#"{"a": 1} and then a footnote }"#;
        let span = extract_json_span(raw).unwrap();
        assert!(span.starts_with('{'));
        assert!(span.ends_with('}'));
        assert!(serde_json::from_str::<serde_json::Value>(span).is_err());
    }
}
