//! Hosted completion backend using OpenAI-compatible APIs.
//!
//! Works against any OpenAI-compatible endpoint with configurable URL,
//! model, and API key via environment variable. Calls are bounded by the
//! configured timeout and never retried here; retry policy belongs to the
//! deployment in front of the API, not the request path.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ModelError, ModelProvider, Result};
use crate::config::ApiModelConfig;

/// Completion backend speaking the OpenAI chat-completions protocol
#[derive(Debug)]
pub struct ApiModel {
    client: Client,
    config: ApiModelConfig,
    api_key: String,
}

/// OpenAI-compatible chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

/// Message in the chat completion request
#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// OpenAI-compatible chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

/// Choice in the chat completion response
#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

/// Message in the response choice
#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl ApiModel {
    /// Create a new API-backed model from the given configuration
    ///
    /// Reads the API key from the environment variable named in
    /// `config.api_key_env`. Returns an error if the variable is not set.
    pub fn new(config: &ApiModelConfig) -> Result<Self> {
        let api_key = env::var(&config.api_key_env).map_err(|_| {
            ModelError::Config(format!("API key env var '{}' not set", config.api_key_env))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::Config(e.to_string()))?;

        info!(
            "ApiModel initialized with model: {}, api_url: {}",
            config.model, config.api_url
        );

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl ModelProvider for ApiModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: 0.2,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );
        debug!("Calling completion API at: {url}");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout {
                        secs: self.config.timeout_secs,
                    }
                } else {
                    ModelError::Unavailable(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ModelError::Unavailable(format!(
                "API returned {status}: {error_text}"
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            ModelError::Unavailable(format!("Malformed completion payload: {e}"))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ModelError::Unavailable("Empty response".to_string()))
    }

    fn name(&self) -> &'static str {
        "api"
    }
}
