//! Request handlers for the analysis endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use super::AppState;
use crate::engine::EngineError;
use crate::model::ModelError;
use crate::prompt::PromptSpec;
use crate::render;

/// Body of the improve and summarize endpoints
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
    /// Instruction templates the client ships along for parity with its
    /// sidebar state; not consulted by these endpoints
    #[serde(default)]
    pub prompts: Vec<PromptSpec>,
}

/// Body of the analyze endpoint
#[derive(Debug, Deserialize)]
pub struct AnalyzePromptRequest {
    pub text: String,
    pub prompt_name: String,
    pub prompt_text: String,
}

/// Health check endpoint - returns JSON status
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// API banner for front ends probing the service
pub async fn api_root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"message": "Quill API is running"}))
}

/// Improve the provided text
pub async fn improve_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextRequest>,
) -> Response {
    match state.engine.improve(&request.text).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_response("Improve Text", e),
    }
}

/// Summarize the provided text
pub async fn summarize_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextRequest>,
) -> Response {
    match state.engine.summarize(&request.text).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_response("Summarize Text", e),
    }
}

/// Analyze text with a caller-supplied instruction and return a flexible
/// rendered response: feedback, citations, diffs, or general analysis
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzePromptRequest>,
) -> Response {
    let spec = PromptSpec::new(&request.prompt_name, &request.prompt_text);
    match state.engine.analyze(&request.text, &spec).await {
        Ok(outcome) => Html(outcome.html).into_response(),
        Err(e) => error_response(&request.prompt_name, e),
    }
}

/// Convert an engine failure into the uniform error payload.
///
/// The body keeps the same container shape as success output so the front
/// end can drop it into the same slot. Status mapping: invalid input 400,
/// model timeout 408, anything else from the backend 500.
fn error_response(prompt_name: &str, error: EngineError) -> Response {
    let status = match &error {
        EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        EngineError::Model(ModelError::Timeout { .. }) => StatusCode::REQUEST_TIMEOUT,
        EngineError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::BAD_REQUEST {
        tracing::debug!("Rejected request: {error}");
    } else {
        tracing::error!("Model call failed: {error}");
    }

    (status, Html(render::render_error(prompt_name, &error.to_string()))).into_response()
}
