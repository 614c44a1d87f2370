//! Markup generation for envelopes, direct model HTML, and error payloads.
//!
//! Structured rendering groups items by category (first-seen order) and
//! dispatches on the item body. Every field access has a default; the
//! renderer never fails on an item the classifier emits.

use serde_json::Value;

use super::escape::{escape_html, strip_style_blocks};
use crate::analysis::{ItemBody, ResponseEnvelope, ResultItem};

/// Render a normalized envelope as grouped, styled markup.
pub fn render_envelope(envelope: &ResponseEnvelope) -> String {
    let mut sections = String::new();
    for (category, items) in group_by_category(&envelope.items) {
        sections.push_str("<div class=\"category-section\">\n");
        sections.push_str(&format!("<h5>{}</h5>\n", escape_html(category)));
        for item in items {
            sections.push_str(&render_item(item));
        }
        sections.push_str("</div>\n");
    }

    format!(
        "<div class=\"feedback-item\">\n<h4>✨ {}</h4>\n{sections}</div>\n",
        escape_html(&envelope.prompt_name),
    )
}

/// Embed model-authored HTML as-is inside a titled container.
///
/// The markup is intentionally left unescaped; style blocks are stripped so
/// the model cannot rewrite page-level rules. The prompt name is still
/// escaped.
pub fn render_direct(raw_html: &str, prompt_name: &str) -> String {
    format!(
        "<div class=\"feedback-item\">\n<h4>✨ {}</h4>\n{}\n</div>\n",
        escape_html(prompt_name),
        strip_style_blocks(raw_html),
    )
}

/// Render improved text as paragraphs in a titled container.
pub fn render_improved(text: &str) -> String {
    paragraph_container("improved-text", "✨ Improved Text", text)
}

/// Render a summary as paragraphs in a titled container.
pub fn render_summary(text: &str) -> String {
    paragraph_container("summary", "📝 Summary", text)
}

/// Uniform error container returned for failed requests.
///
/// Keeps the same outer shape as success output so the front end can render
/// it in place.
pub fn render_error(prompt_name: &str, message: &str) -> String {
    format!(
        "<div class=\"feedback-item\">\n<h4>❌ Error - {}</h4>\n<div class=\"category-section\">\n<h5>Error</h5>\n<p class=\"feedback-high\">• {} <span class=\"priority-badge high\">high</span></p>\n</div>\n</div>\n",
        escape_html(prompt_name),
        escape_html(message),
    )
}

fn paragraph_container(class_prefix: &str, heading: &str, text: &str) -> String {
    let paragraphs = escape_html(text).replace('\n', "</p><p>");
    format!(
        "<div class=\"{class_prefix}-container\">\n<h3>{heading}</h3>\n<div class=\"{class_prefix}-content\">\n<p>{paragraphs}</p>\n</div>\n</div>\n"
    )
}

/// Group items by category, preserving first-seen category order and
/// original item order within each group.
fn group_by_category(items: &[ResultItem]) -> Vec<(&str, Vec<&ResultItem>)> {
    let mut groups: Vec<(&str, Vec<&ResultItem>)> = Vec::new();
    for item in items {
        match groups
            .iter()
            .position(|(category, _)| *category == item.category)
        {
            Some(idx) => groups[idx].1.push(item),
            None => groups.push((item.category.as_str(), vec![item])),
        }
    }
    groups
}

fn render_item(item: &ResultItem) -> String {
    match &item.body {
        ItemBody::Feedback {
            suggestion,
            priority,
        } => {
            let priority = escape_html(priority);
            format!(
                "<p class=\"feedback-{priority}\">• {} <span class=\"priority-badge {priority}\">{priority}</span></p>\n",
                escape_html(suggestion),
            )
        }
        ItemBody::Citation {
            source,
            title,
            url,
            relevance,
            priority,
        } => {
            let mut fields = String::new();
            let labeled = [
                ("Source", source),
                ("Title", title),
                ("URL", url),
                ("Relevance", relevance),
            ];
            for (label, value) in labeled {
                if let Some(value) = value {
                    fields.push_str(&format!(
                        "<div class=\"citation-field\"><span class=\"field-label\">{label}</span> <span class=\"field-value\">{}</span></div>\n",
                        escape_html(value),
                    ));
                }
            }
            format!(
                "<div class=\"citation-item\">\n<div class=\"citation-header\"><span class=\"citation-icon\">📚</span><h6 class=\"citation-title\">Citation</h6></div>\n<div class=\"citation-content\">\n{fields}</div>\n<span class=\"priority-badge citation\">{}</span>\n</div>\n",
                escape_html(priority),
            )
        }
        ItemBody::Diff {
            original,
            suggested,
            reason,
            priority,
        } => {
            let mut sections = String::new();
            if let Some(original) = original {
                sections.push_str(&format!(
                    "<div class=\"diff-section\"><div class=\"diff-text original\" data-label=\"Original\">{}</div></div>\n",
                    escape_html(original),
                ));
            }
            if let Some(suggested) = suggested {
                sections.push_str(&format!(
                    "<div class=\"diff-section\"><div class=\"diff-text suggested\" data-label=\"Suggested\">{}</div></div>\n",
                    escape_html(suggested),
                ));
            }
            if let Some(reason) = reason {
                sections.push_str(&format!(
                    "<div class=\"diff-reason\">{}</div>\n",
                    escape_html(reason),
                ));
            }
            format!(
                "<div class=\"diff-item\">\n<div class=\"diff-header\"><span class=\"diff-icon\">✏️</span><h6 class=\"diff-title\">Suggested Edit</h6></div>\n<div class=\"diff-content\">\n{sections}</div>\n<span class=\"priority-badge diff\">{}</span>\n</div>\n",
                escape_html(priority),
            )
        }
        ItemBody::Insight { title, description } => format!(
            "<div class=\"analysis-item\">\n<h6>{}</h6>\n<p>{}</p>\n</div>\n",
            escape_html(title),
            escape_html(description),
        ),
        // Universal fallback: whatever the kind, the item stays visible.
        ItemBody::Other { content, .. } => {
            let text = match content {
                Value::String(s) => s.clone(),
                other => other
                    .get("suggestion")
                    .or_else(|| other.get("description"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| other.to_string()),
            };
            format!("<p>• {}</p>\n", escape_html(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{DEFAULT_CATEGORY, ResponseEnvelope, ResultItem};
    use serde_json::json;

    fn feedback(category: &str, suggestion: &str, priority: &str) -> ResultItem {
        ResultItem::new(
            category,
            ItemBody::Feedback {
                suggestion: suggestion.to_string(),
                priority: priority.to_string(),
            },
        )
    }

    #[test]
    fn renders_empty_envelope_as_bare_container() {
        let envelope = ResponseEnvelope::new("analysis", Vec::new(), "Review");
        let html = render_envelope(&envelope);
        assert!(html.contains("✨ Review"));
        assert!(!html.contains("category-section"));
    }

    #[test]
    fn groups_categories_in_first_seen_order() {
        let envelope = ResponseEnvelope::new(
            "feedback",
            vec![
                feedback("Style", "one", "low"),
                feedback("Grammar", "two", "medium"),
                feedback("Style", "three", "high"),
            ],
            "Review",
        );
        let html = render_envelope(&envelope);

        let style = html.find("<h5>Style</h5>").unwrap();
        let grammar = html.find("<h5>Grammar</h5>").unwrap();
        assert!(style < grammar);
        assert_eq!(html.matches("<h5>Style</h5>").count(), 1);

        // Items keep original order within their group.
        assert!(html.find("• one").unwrap() < html.find("• three").unwrap());
    }

    #[test]
    fn renders_feedback_with_priority_badge() {
        let envelope = ResponseEnvelope::new(
            "feedback",
            vec![feedback(DEFAULT_CATEGORY, "shorten this", "high")],
            "Review",
        );
        let html = render_envelope(&envelope);
        assert!(html.contains("feedback-high"));
        assert!(html.contains("priority-badge high"));
        assert!(html.contains("• shorten this"));
    }

    #[test]
    fn renders_citation_fields_and_omits_absent_ones() {
        let item = ResultItem::new(
            "References",
            ItemBody::Citation {
                source: Some("Orwell (1946)".to_string()),
                title: None,
                url: Some("https://example.com".to_string()),
                relevance: None,
                priority: "medium".to_string(),
            },
        );
        let envelope = ResponseEnvelope::new("citations", vec![item], "Sources");
        let html = render_envelope(&envelope);

        assert!(html.contains("Source"));
        assert!(html.contains("Orwell (1946)"));
        assert!(html.contains("https://example.com"));
        assert!(!html.contains("Relevance"));
        assert!(html.contains("priority-badge citation"));
    }

    #[test]
    fn renders_diff_blocks_with_reason() {
        let item = ResultItem::new(
            DEFAULT_CATEGORY,
            ItemBody::Diff {
                original: Some("teh cat".to_string()),
                suggested: Some("the cat".to_string()),
                reason: Some("typo".to_string()),
                priority: "high".to_string(),
            },
        );
        let envelope = ResponseEnvelope::new("edits", vec![item], "Edits");
        let html = render_envelope(&envelope);

        assert!(html.contains("data-label=\"Original\""));
        assert!(html.contains("teh cat"));
        assert!(html.contains("data-label=\"Suggested\""));
        assert!(html.contains("diff-reason"));
    }

    #[test]
    fn unknown_kind_is_always_visible() {
        let item = ResultItem::new(
            DEFAULT_CATEGORY,
            ItemBody::Other {
                kind: "metric".to_string(),
                content: json!({"score": 7}),
            },
        );
        let envelope = ResponseEnvelope::new("misc", vec![item], "Scores");
        let html = render_envelope(&envelope);
        assert!(html.contains("score"));
        assert!(html.contains('7'));
    }

    #[test]
    fn unknown_kind_prefers_suggestion_then_description() {
        let with_suggestion = ResultItem::new(
            DEFAULT_CATEGORY,
            ItemBody::Other {
                kind: "note".to_string(),
                content: json!({"suggestion": "use fewer adverbs", "description": "ignored"}),
            },
        );
        let envelope = ResponseEnvelope::new("misc", vec![with_suggestion], "Notes");
        let html = render_envelope(&envelope);
        assert!(html.contains("use fewer adverbs"));
        assert!(!html.contains("ignored"));
    }

    #[test]
    fn escapes_model_supplied_text() {
        let envelope = ResponseEnvelope::new(
            "feedback",
            vec![feedback(DEFAULT_CATEGORY, "<script>alert(1)</script>", "medium")],
            "<img src=x>",
        );
        let html = render_envelope(&envelope);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;img src=x&gt;"));
    }

    #[test]
    fn direct_mode_keeps_markup_but_strips_styles() {
        let raw = "<style>body{display:none}</style><b>model says hi</b>";
        let html = render_direct(raw, "Freeform");
        assert!(html.contains("<b>model says hi</b>"));
        assert!(!html.contains("<style>"));
        assert!(html.contains("✨ Freeform"));
    }

    #[test]
    fn direct_mode_escapes_prompt_name() {
        let html = render_direct("<p>ok</p>", "<script>");
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn improved_text_splits_paragraphs_and_escapes() {
        let html = render_improved("first line\nsecond <b>line</b>");
        assert!(html.contains("✨ Improved Text"));
        assert!(html.contains("<p>first line</p><p>second &lt;b&gt;line&lt;/b&gt;</p>"));
    }

    #[test]
    fn summary_uses_its_own_container() {
        let html = render_summary("the gist");
        assert!(html.contains("📝 Summary"));
        assert!(html.contains("summary-container"));
        assert!(html.contains("the gist"));
    }

    #[test]
    fn error_container_escapes_message() {
        let html = render_error("Grammar", "upstream said <nope>");
        assert!(html.contains("❌ Error - Grammar"));
        assert!(html.contains("&lt;nope&gt;"));
        assert!(html.contains("priority-badge high"));
    }
}
