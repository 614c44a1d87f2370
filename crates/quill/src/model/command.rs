//! Local completion backend that shells out to a command-line tool.
//!
//! The prompt is written to the tool's stdin and the reply read from its
//! stdout, which keeps arbitrarily long prompts off the argv limit. The
//! program and arguments come from configuration; nothing is located at
//! module load time.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use super::{ModelError, ModelProvider, Result};
use crate::config::CommandModelConfig;

/// Completion backend that pipes prompts through a local program
#[derive(Debug)]
pub struct CommandModel {
    config: CommandModelConfig,
}

impl CommandModel {
    /// Create a new command-backed model from the given configuration
    pub fn new(config: &CommandModelConfig) -> Self {
        info!(
            "CommandModel initialized with program: {} {}",
            config.program,
            config.args.join(" ")
        );
        Self {
            config: config.clone(),
        }
    }

    async fn run(&self, prompt: &str) -> Result<String> {
        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ModelError::Unavailable(format!(
                    "Failed to spawn '{}': {e}",
                    self.config.program
                ))
            })?;

        // Feed stdin while draining stdout; writing first and reading after
        // can deadlock once either pipe buffer fills.
        let stdin = child.stdin.take();
        let (write_result, output) = tokio::join!(
            async {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(prompt.as_bytes()).await?;
                    stdin.shutdown().await?;
                }
                Ok::<_, std::io::Error>(())
            },
            child.wait_with_output(),
        );

        let output =
            output.map_err(|e| ModelError::Unavailable(format!("Failed to read output: {e}")))?;

        // A child that died early also breaks the stdin pipe; report the
        // exit status, not the secondary write error.
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ModelError::Unavailable(format!(
                "'{}' exited with {}: {}",
                self.config.program,
                output.status,
                stderr.trim()
            )));
        }

        write_result
            .map_err(|e| ModelError::Unavailable(format!("Failed to write prompt: {e}")))?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl ModelProvider for CommandModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(
            "Invoking '{}' with {} prompt bytes",
            self.config.program,
            prompt.len()
        );

        let secs = self.config.timeout_secs;
        // kill_on_drop reaps the child when the deadline fires
        match tokio::time::timeout(Duration::from_secs(secs), self.run(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(ModelError::Timeout { secs }),
        }
    }

    fn name(&self) -> &'static str {
        "command"
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;

    fn create_test_config(program: &str, args: &[&str], timeout_secs: u64) -> CommandModelConfig {
        CommandModelConfig {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timeout_secs,
        }
    }

    #[tokio::test]
    async fn test_command_model_round_trips_prompt() {
        let model = CommandModel::new(&create_test_config("cat", &[], 5));
        let result = model.complete("hello from stdin").await;
        assert_eq!(result.unwrap(), "hello from stdin");
    }

    #[tokio::test]
    async fn test_command_model_nonzero_exit_is_unavailable() {
        let model = CommandModel::new(&create_test_config("false", &[], 5));
        let result = model.complete("ignored").await;
        match result {
            Err(ModelError::Unavailable(msg)) => assert!(msg.contains("exited with")),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_command_model_missing_binary_is_unavailable() {
        let model = CommandModel::new(&create_test_config("quill-no-such-binary", &[], 5));
        let result = model.complete("ignored").await;
        match result {
            Err(ModelError::Unavailable(msg)) => assert!(msg.contains("Failed to spawn")),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_command_model_deadline_is_timeout() {
        let model = CommandModel::new(&create_test_config("sleep", &["5"], 1));
        let result = model.complete("ignored").await;
        match result {
            Err(ModelError::Timeout { secs }) => assert_eq!(secs, 1),
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_command_model_name() {
        let model = CommandModel::new(&create_test_config("cat", &[], 5));
        assert_eq!(model.name(), "command");
    }
}
