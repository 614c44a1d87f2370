use serde::Deserialize;

use crate::render::RenderMode;

/// Main configuration structure for Quill
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Completion backend configuration
    #[serde(default)]
    pub model: ModelConfig,
    /// Rendering configuration
    #[serde(default)]
    pub render: RenderConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:8000")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:8000".to_string()
}

/// Completion backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Backend type: api or command
    #[serde(default = "default_model_backend")]
    pub backend: String,
    /// Hosted API backend configuration
    #[serde(default)]
    pub api: ApiModelConfig,
    /// Command-line tool backend configuration
    #[serde(default)]
    pub command: CommandModelConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backend: default_model_backend(),
            api: ApiModelConfig::default(),
            command: CommandModelConfig::default(),
        }
    }
}

fn default_model_backend() -> String {
    "api".to_string()
}

/// Hosted API configuration for the completion backend
#[derive(Debug, Clone, Deserialize)]
pub struct ApiModelConfig {
    /// API endpoint URL
    #[serde(default)]
    pub api_url: String,
    /// Environment variable name for the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Model identifier for the remote API
    #[serde(default = "default_api_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_model_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiModelConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key_env: default_api_key_env(),
            model: default_api_model(),
            timeout_secs: default_model_timeout_secs(),
        }
    }
}

fn default_api_key_env() -> String {
    "QUILL_API_KEY".to_string()
}

fn default_api_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_model_timeout_secs() -> u64 {
    60
}

/// Command-line tool configuration for the completion backend
#[derive(Debug, Clone, Deserialize)]
pub struct CommandModelConfig {
    /// Program to invoke; the prompt is written to its stdin
    #[serde(default = "default_command_program")]
    pub program: String,
    /// Arguments passed to the program
    #[serde(default = "default_command_args")]
    pub args: Vec<String>,
    /// Invocation timeout in seconds
    #[serde(default = "default_model_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CommandModelConfig {
    fn default() -> Self {
        Self {
            program: default_command_program(),
            args: default_command_args(),
            timeout_secs: default_model_timeout_secs(),
        }
    }
}

fn default_command_program() -> String {
    "claude".to_string()
}

fn default_command_args() -> Vec<String> {
    vec!["-p".to_string()]
}

/// Rendering configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RenderConfig {
    /// Rendering path for analysis responses
    #[serde(default)]
    pub mode: RenderMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1:8000");
        assert_eq!(config.model.backend, "api");
        assert_eq!(config.model.api.api_url, "");
        assert_eq!(config.model.api.api_key_env, "QUILL_API_KEY");
        assert_eq!(config.model.api.model, "gpt-4o-mini");
        assert_eq!(config.model.api.timeout_secs, 60);
        assert_eq!(config.model.command.program, "claude");
        assert_eq!(config.model.command.args, vec!["-p".to_string()]);
        assert_eq!(config.model.command.timeout_secs, 60);
        assert_eq!(config.render.mode, RenderMode::Structured);
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
[server]
listen_addr = "0.0.0.0:8080"

[model]
backend = "api"

[model.api]
api_url = "https://api.groq.com/openai/v1"
api_key_env = "GROQ_API_KEY"
model = "openai/gpt-oss-120b"
timeout_secs = 30

[render]
mode = "direct"
"#;

        let config: Config = toml::from_str(toml_str).expect("Failed to parse TOML");

        assert_eq!(config.server.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.model.backend, "api");
        assert_eq!(config.model.api.api_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.model.api.api_key_env, "GROQ_API_KEY");
        assert_eq!(config.model.api.model, "openai/gpt-oss-120b");
        assert_eq!(config.model.api.timeout_secs, 30);
        assert_eq!(config.render.mode, RenderMode::Direct);
    }

    #[test]
    fn test_toml_partial_deserialization() {
        // Only a couple of fields set; everything else falls back to defaults
        let toml_str = r#"
[model]
backend = "command"

[model.command]
program = "ollama"
args = ["run", "llama3"]
"#;

        let config: Config = toml::from_str(toml_str).expect("Failed to parse partial TOML");

        assert_eq!(config.server.listen_addr, "127.0.0.1:8000");
        assert_eq!(config.model.backend, "command");
        assert_eq!(config.model.command.program, "ollama");
        assert_eq!(
            config.model.command.args,
            vec!["run".to_string(), "llama3".to_string()]
        );
        assert_eq!(config.model.command.timeout_secs, 60);
        assert_eq!(config.render.mode, RenderMode::Structured);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").expect("Failed to parse empty TOML");
        assert_eq!(config.server.listen_addr, "127.0.0.1:8000");
        assert_eq!(config.model.backend, "api");
        assert_eq!(config.render.mode, RenderMode::Structured);
    }

    #[test]
    fn test_invalid_render_mode_is_rejected() {
        let toml_str = r#"
[render]
mode = "freeform"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }
}
