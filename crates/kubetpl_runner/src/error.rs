//! Error types for the runner module.

use thiserror::Error;

/// Result type alias for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Errors that can occur while running kubectl.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to spawn {program}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Failed to write document to {program} stdin")]
    Stdin {
        program: String,
        source: std::io::Error,
    },

    #[error("Failed waiting for {program}")]
    Wait {
        program: String,
        source: std::io::Error,
    },

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}
