//! Quill daemon - HTTP API for LLM-backed text analysis

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use quill::config::Config;
use quill::engine::AnalysisEngine;
use quill::error::Result;
use quill::model::{ApiModel, CommandModel, ModelProvider};
use quill::server::ApiServer;

/// Quill - backend that turns raw LLM replies into safe, renderable HTML
#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "A backend that turns raw LLM replies into safe, renderable HTML")]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the API server (default command)
    #[command(name = "serve")]
    Serve,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        None | Some(Command::Serve) => serve(cli.config).await,
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,quill=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = config_path {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|e| {
            quill::QuillError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| quill::QuillError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    } else {
        let default_paths = [
            dirs::home_dir().map(|h| h.join(".quill").join("config.toml")),
            dirs::config_dir().map(|c| c.join("quill").join("config.toml")),
            Some(PathBuf::from("config.toml")),
        ];

        for path_opt in default_paths.iter().flatten() {
            if path_opt.exists() {
                tracing::info!("Loading config from: {}", path_opt.display());
                let content = std::fs::read_to_string(path_opt).map_err(|e| {
                    quill::QuillError::Config(format!(
                        "Failed to read config file {}: {}",
                        path_opt.display(),
                        e
                    ))
                })?;
                let config: Config = toml::from_str(&content).map_err(|e| {
                    quill::QuillError::Config(format!("Failed to parse config: {e}"))
                })?;
                return Ok(config);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }
}

fn build_model(config: &Config) -> Result<Arc<dyn ModelProvider>> {
    match config.model.backend.as_str() {
        "api" => {
            let model = ApiModel::new(&config.model.api)
                .map_err(|e| quill::QuillError::Config(e.to_string()))?;
            Ok(Arc::new(model))
        }
        "command" => Ok(Arc::new(CommandModel::new(&config.model.command))),
        other => Err(quill::QuillError::Config(format!(
            "Unknown model backend: {other}"
        ))),
    }
}

async fn serve(config_path: Option<PathBuf>) -> Result<()> {
    tracing::info!("Starting Quill daemon");

    let config = load_config(config_path)?;
    tracing::debug!("Config loaded: {:?}", config);

    let model = build_model(&config)?;
    tracing::info!("Model backend: {}", model.name());

    let engine = AnalysisEngine::new(model, config.render.mode);
    let server = ApiServer::new(config.server.clone(), engine);

    server.serve().await?;

    tracing::info!("Quill daemon stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nlisten_addr = \"127.0.0.1:9000\"\n\n[render]\nmode = \"direct\""
        )
        .unwrap();

        let config = load_config(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_load_config_missing_explicit_path_fails() {
        let result = load_config(Some(PathBuf::from("/nonexistent/quill.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();

        let result = load_config(Some(file.path().to_path_buf()));
        assert!(result.is_err());
    }

    #[test]
    fn test_build_model_command_backend() {
        let mut config = Config::default();
        config.model.backend = "command".to_string();

        let model = build_model(&config).unwrap();
        assert_eq!(model.name(), "command");
    }

    #[test]
    fn test_build_model_unknown_backend_fails() {
        let mut config = Config::default();
        config.model.backend = "carrier-pigeon".to_string();

        let result = build_model(&config);
        assert!(result.is_err());
    }
}
