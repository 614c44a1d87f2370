//! Escaping for untrusted text and scrubbing for model-authored markup.

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;

/// Escape the five HTML-significant characters in a value's textual form.
///
/// Every fragment of model- or user-supplied text must pass through here
/// before it is interpolated into markup; this is the sole
/// injection-prevention boundary in the service. Non-string values are
/// formatted through `Display` first, so every input yields a safe string.
pub fn escape_html(value: impl Display) -> String {
    let text = value.to_string();
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").expect("style pattern"));

/// Remove `<style>...</style>` regions from model-authored HTML.
///
/// Direct mode embeds the model's markup verbatim; stripping style blocks
/// keeps it from injecting page-level rules. Case-insensitive and spans
/// newlines. Other tags are left untouched; this is not general
/// sanitization.
pub fn strip_style_blocks(html: &str) -> String {
    STYLE_BLOCK.replace_all(html, "").into_owned()
}
