//! Error types for rendering and dispatch.

use std::path::PathBuf;
use thiserror::Error;

use kubetpl_runner::{ExecutionResult, RunnerError};

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering or dispatching resources.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to read template {file}")]
    Read {
        file: PathBuf,
        source: std::io::Error,
    },

    #[error("Error templating resource {file}: {message}")]
    Template { file: PathBuf, message: String },

    #[error("Resource set has no context, required for '{verb}'")]
    MissingContext { verb: String },

    #[error("kubectl error on file {file} ({status})")]
    ExternalCommand {
        file: PathBuf,
        status: ExecutionResult,
    },

    #[error("Failed to write rendered output")]
    Output(#[source] std::io::Error),

    #[error(transparent)]
    Runner(#[from] RunnerError),
}
