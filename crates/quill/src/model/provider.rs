//! Model provider trait for completion backends.

use async_trait::async_trait;

use super::Result;

/// Trait for completion backends (hosted API, local command-line tool)
///
/// Implementations perform the single blocking external operation in the
/// system and must bound it with a timeout; callers never retry.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Send a prompt to the model and return its raw text reply
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
