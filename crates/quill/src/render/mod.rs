//! HTML rendering for normalized model responses.

mod escape;
mod html;

pub use escape::{escape_html, strip_style_blocks};
pub use html::{render_direct, render_envelope, render_error, render_improved, render_summary};

use serde::Deserialize;

/// Rendering path for analysis responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Classify items and render grouped, styled markup (the hardened path)
    #[default]
    Structured,
    /// Trust the model's own HTML, subject only to style-block stripping
    Direct,
}
