//! Command runner trait and types.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use crate::error::RunnerResult;

/// One rendered document to hand to the cluster tool.
#[derive(Debug, Clone, Copy)]
pub struct ApplyRequest<'a> {
    /// Sub-command, e.g. `apply` or `delete`
    pub verb: &'a str,
    /// Value for `--context`
    pub context: &'a str,
    /// Rendered document, written to stdin
    pub document: &'a str,
    /// Template the document was rendered from
    pub source: &'a Path,
}

/// Result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code; `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Whether the command was only printed
    pub dry_run: bool,
}

impl ExecutionResult {
    pub fn exited(exit_code: Option<i32>) -> Self {
        Self {
            exit_code,
            dry_run: false,
        }
    }

    pub fn dry_run() -> Self {
        Self {
            exit_code: Some(0),
            dry_run: true,
        }
    }

    /// Check if execution was successful (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "exit status {}", code),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Hands rendered documents to an external cluster-management command.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command for one document and wait for it to exit.
    async fn apply(&self, request: &ApplyRequest<'_>) -> RunnerResult<ExecutionResult>;
}
