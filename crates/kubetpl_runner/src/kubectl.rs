//! kubectl process runner.
//!
//! Each document is passed on the child's stdin; nothing goes through a
//! shell.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{RunnerError, RunnerResult};
use crate::runner::{ApplyRequest, CommandRunner, ExecutionResult};

/// Default cluster-management executable.
pub const DEFAULT_KUBECTL: &str = "kubectl";

/// kubectl runner options.
#[derive(Debug, Clone, Default)]
pub struct KubectlOptions {
    /// Dry-run mode (print commands without executing)
    pub dry_run: bool,
}

impl KubectlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }
}

/// Runs `<kubectl> <verb> --context <context> -f -` per document.
pub struct KubectlRunner {
    executable: PathBuf,
    options: KubectlOptions,
}

impl KubectlRunner {
    /// Create a runner invoking `executable`.
    pub fn new(executable: impl Into<PathBuf>, options: KubectlOptions) -> Self {
        Self {
            executable: executable.into(),
            options,
        }
    }

    /// Check if dry-run mode is enabled.
    pub fn is_dry_run(&self) -> bool {
        self.options.dry_run
    }

    /// Build the command line arguments for one request.
    pub fn build_args(&self, request: &ApplyRequest<'_>) -> Vec<String> {
        vec![
            request.verb.to_string(),
            "--context".to_string(),
            request.context.to_string(),
            "-f".to_string(),
            "-".to_string(),
        ]
    }

    /// Format command for logging.
    pub fn format_command(&self, args: &[String]) -> String {
        let mut cmd = self.executable.display().to_string();
        for arg in args {
            if arg.is_empty() || arg.contains(' ') {
                cmd.push_str(&format!(" '{}'", arg));
            } else {
                cmd.push_str(&format!(" {}", arg));
            }
        }
        cmd
    }

    fn program(&self) -> String {
        self.executable.display().to_string()
    }
}

#[async_trait]
impl CommandRunner for KubectlRunner {
    async fn apply(&self, request: &ApplyRequest<'_>) -> RunnerResult<ExecutionResult> {
        let args = self.build_args(request);
        let command_line = self.format_command(&args);

        if self.options.dry_run {
            info!("Dry run for {:?}: {}", request.source, command_line);
            eprintln!("{} < {}", command_line, request.source.display());
            return Ok(ExecutionResult::dry_run());
        }

        debug!("Executing: {}", command_line);

        let mut child = Command::new(&self.executable)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                program: self.program(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let written = match stdin.write_all(request.document.as_bytes()).await {
                Ok(()) => stdin.shutdown().await,
                Err(e) => Err(e),
            };
            // A child that exits without draining stdin is judged by its exit status
            if let Err(source) = written {
                if source.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(RunnerError::Stdin {
                        program: self.program(),
                        source,
                    });
                }
            }
        }

        let status = child.wait().await.map_err(|source| RunnerError::Wait {
            program: self.program(),
            source,
        })?;

        let result = ExecutionResult::exited(status.code());
        debug!("{} finished with {}", self.program(), result);
        Ok(result)
    }
}
