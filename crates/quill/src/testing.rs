//! Test utilities for quill - canned and failing model providers.
//!
//! These doubles keep handler and engine tests fast and deterministic; no
//! network or subprocess is involved.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::{ModelError, ModelProvider, Result};

/// Model double that returns a canned reply and records every prompt.
#[derive(Debug, Default)]
pub struct MockModel {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl MockModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl ModelProvider for MockModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());
        Ok(self.reply.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Model double that always fails with the configured error kind.
#[derive(Debug)]
pub struct FailingModel {
    timeout: bool,
}

impl FailingModel {
    /// Fails every call with `ModelError::Unavailable`.
    pub fn unavailable() -> Self {
        Self { timeout: false }
    }

    /// Fails every call with `ModelError::Timeout`.
    pub fn timing_out() -> Self {
        Self { timeout: true }
    }
}

#[async_trait]
impl ModelProvider for FailingModel {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        if self.timeout {
            Err(ModelError::Timeout { secs: 60 })
        } else {
            Err(ModelError::Unavailable("connection refused".to_string()))
        }
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
