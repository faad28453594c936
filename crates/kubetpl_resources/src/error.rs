//! Error types for resource resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors that can occur while loading and resolving a resource set.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Failed to read resource set {path}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid YAML in resource set {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    #[error("Invalid resource set {path}: {message}")]
    ManifestSchema { path: PathBuf, message: String },

    #[error("Malformed include node at {position}: at least one of 'name' or 'path' is required")]
    MalformedInclude { position: String },

    #[error("Include and exclude filters are mutually exclusive")]
    ConflictingFilters,

    #[error("Cannot find resource {logical}")]
    ResourceNotFound { logical: String },

    #[error("Failed to list resource directory {path}")]
    DirectoryRead {
        path: PathBuf,
        source: walkdir::Error,
    },
}
