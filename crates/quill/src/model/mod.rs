//! Completion backends.
//!
//! The rest of the service consumes one capability: send a prompt, get the
//! model's raw text back. Backends differ (hosted API, local command-line
//! tool) but failures are reported uniformly so the HTTP layer can map a
//! timeout to 408 and everything else to 500.

mod api;
mod command;
mod provider;

pub use api::ApiModel;
pub use command::CommandModel;
pub use provider::ModelProvider;

use thiserror::Error;

/// Failures of the external completion backend
#[derive(Debug, Error)]
pub enum ModelError {
    /// The call did not finish within the configured deadline
    #[error("Model call timed out after {secs}s")]
    Timeout { secs: u64 },
    /// The backend could not be reached or reported a failure
    #[error("Model unavailable: {0}")]
    Unavailable(String),
    /// The backend could not be constructed from its configuration
    #[error("Model configuration error: {0}")]
    Config(String),
}

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
