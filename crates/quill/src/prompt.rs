//! Prompt templates and composition.
//!
//! Fixed templates for the improve and summarize endpoints, the
//! structured-response instructions appended to analysis prompts, and the
//! caller-supplied instruction type.

use serde::Deserialize;

/// Prompt for the improve endpoint
///
/// Placeholder: {text} - the text to improve
pub const IMPROVE_PROMPT: &str = r#"Please improve the following text while maintaining its original meaning and tone.
Focus on clarity, grammar, style, and readability:

"{text}"

Please provide only the improved version of the text without additional commentary."#;

/// Prompt for the summarize endpoint
///
/// Placeholder: {text} - the text to summarize
pub const SUMMARIZE_PROMPT: &str = r#"Please provide a concise summary of the following text, capturing the main points and key information:

"{text}"

Please provide a clear, well-structured summary."#;

/// Appended to analysis prompts in structured mode so the model answers in
/// one of the recognized JSON shapes.
pub const SCHEMA_INSTRUCTIONS: &str = r#"Please respond in JSON format. You can return any type of analysis result. Here are some common formats:

For feedback:
{
    "response_type": "feedback",
    "items": [
        {
            "type": "feedback",
            "content": {
                "category": "Style",
                "suggestion": "Your suggestion here",
                "priority": "high"
            }
        }
    ]
}

For citations/references:
{
    "response_type": "citations",
    "items": [
        {
            "type": "citation",
            "content": {
                "source": "Author Name (Year)",
                "title": "Title of work",
                "url": "https://example.com",
                "relevance": "How this relates to the text"
            }
        }
    ]
}

For text diffs/edits:
{
    "response_type": "edits",
    "items": [
        {
            "type": "diff",
            "content": {
                "original": "original text segment",
                "suggested": "improved text segment",
                "reason": "explanation of change"
            }
        }
    ]
}

For general analysis:
{
    "response_type": "analysis",
    "items": [
        {
            "type": "insight",
            "content": {
                "title": "Key insight",
                "description": "Detailed analysis",
                "evidence": "Supporting evidence from text"
            }
        }
    ]
}

Choose the most appropriate format for your response based on the prompt's intent."#;

/// A user-supplied instruction template
///
/// Supplied by the caller per request; never stored server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptSpec {
    /// Client-side identifier
    #[serde(default)]
    pub id: String,
    /// Display name shown in rendered output
    pub name: String,
    /// Instruction template, may contain a `{text}` placeholder
    #[serde(rename = "prompt")]
    pub template: String,
    /// Whether the client has this instruction enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl PromptSpec {
    /// Build a spec for a one-off instruction without a stored id
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            template: template.into(),
            enabled: true,
        }
    }
}

/// Substitute the literal `{text}` placeholder in a template.
///
/// Templates without the placeholder pass through unchanged.
pub fn fill_template(template: &str, text: &str) -> String {
    template.replace("{text}", text)
}

/// Compose the final analysis prompt.
///
/// Appends the structured-response instructions when the reply will be
/// classified; direct mode sends the filled template alone.
pub fn compose_analysis_prompt(template: &str, text: &str, structured: bool) -> String {
    let filled = fill_template(template, text);
    if structured {
        format!("{filled}\n\n{SCHEMA_INSTRUCTIONS}")
    } else {
        filled
    }
}
