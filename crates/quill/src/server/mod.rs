//! HTTP boundary: router, application state, and server lifecycle.

mod handlers;

pub use handlers::{AnalyzePromptRequest, TextRequest};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::engine::AnalysisEngine;
use crate::error::{QuillError, Result};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Request orchestrator
    pub engine: AnalysisEngine,
}

/// The HTTP API server
pub struct ApiServer {
    config: ServerConfig,
    engine: AnalysisEngine,
}

impl ApiServer {
    /// Create a new API server with the given configuration and engine
    pub fn new(config: ServerConfig, engine: AnalysisEngine) -> Self {
        Self { config, engine }
    }

    /// Start the server and listen for requests until shutdown
    pub async fn serve(&self) -> Result<()> {
        let state = Arc::new(AppState {
            engine: self.engine.clone(),
        });
        let app = create_router(state);

        let addr: SocketAddr = self
            .config
            .listen_addr
            .parse()
            .map_err(|e| QuillError::Config(format!("Invalid listen address: {e}")))?;

        tracing::info!("Starting API server on {addr}");

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| QuillError::Server(format!("Failed to bind to {addr}: {e}")))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| QuillError::Server(format!("Server error: {e}")))?;

        tracing::info!("API server shut down gracefully");
        Ok(())
    }
}

/// Create the router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/", get(handlers::api_root_handler))
        .route("/improve-text", post(handlers::improve_handler))
        .route("/summarize-text", post(handlers::summarize_handler))
        .route("/analyze-prompt", post(handlers::analyze_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}
