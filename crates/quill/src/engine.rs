//! Request orchestration.
//!
//! One engine instance serves every request: it composes the prompt,
//! invokes the model, and routes the reply through normalization and
//! rendering. It holds no per-request state; requests are independent.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::analysis;
use crate::model::{ModelError, ModelProvider};
use crate::prompt::{self, PromptSpec};
use crate::render::{self, RenderMode};

/// Failures surfaced by the orchestrator
#[derive(Debug, Error)]
pub enum EngineError {
    /// Client-side input problem; the model is never invoked
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The completion backend failed
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// A rendered analysis result
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Advisory response label from the envelope
    pub response_type: String,
    /// Renderable markup
    pub html: String,
}

/// Orchestrates one request end to end
#[derive(Clone)]
pub struct AnalysisEngine {
    model: Arc<dyn ModelProvider>,
    mode: RenderMode,
}

impl AnalysisEngine {
    /// Create a new engine with the given backend and rendering mode
    pub fn new(model: Arc<dyn ModelProvider>, mode: RenderMode) -> Self {
        Self { model, mode }
    }

    /// Improve the text while keeping its meaning and tone
    pub async fn improve(&self, text: &str) -> Result<String> {
        require_non_empty(text, "Text cannot be empty")?;

        let prompt = prompt::fill_template(prompt::IMPROVE_PROMPT, text);
        let reply = self.model.complete(&prompt).await?;
        Ok(render::render_improved(&reply))
    }

    /// Summarize the text
    pub async fn summarize(&self, text: &str) -> Result<String> {
        require_non_empty(text, "Text cannot be empty")?;

        let prompt = prompt::fill_template(prompt::SUMMARIZE_PROMPT, text);
        let reply = self.model.complete(&prompt).await?;
        Ok(render::render_summary(&reply))
    }

    /// Run a caller-supplied instruction over the text and render the
    /// normalized result
    pub async fn analyze(&self, text: &str, spec: &PromptSpec) -> Result<AnalysisOutcome> {
        require_non_empty(text, "Text cannot be empty")?;
        require_non_empty(&spec.template, "Prompt text cannot be empty")?;

        let structured = self.mode == RenderMode::Structured;
        let prompt = prompt::compose_analysis_prompt(&spec.template, text, structured);

        let reply = self.model.complete(&prompt).await?;
        debug!(
            "Model reply: {} chars via {}",
            reply.len(),
            self.model.name()
        );

        let outcome = match self.mode {
            RenderMode::Structured => {
                let envelope = analysis::normalize(&reply, &spec.name);
                info!(
                    "Normalized reply into {} item(s), response_type={}",
                    envelope.items.len(),
                    envelope.response_type
                );
                AnalysisOutcome {
                    response_type: envelope.response_type.clone(),
                    html: render::render_envelope(&envelope),
                }
            }
            RenderMode::Direct => AnalysisOutcome {
                response_type: "html".to_string(),
                html: render::render_direct(&reply, &spec.name),
            },
        };

        Ok(outcome)
    }
}

fn require_non_empty(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EngineError::InvalidInput(message.to_string()));
    }
    Ok(())
}
