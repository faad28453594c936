//! Resource set loading functionality.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ResourceError, ResourceResult};
use crate::manifest::{ResourceSet, REQUIRED_KEYS};

/// Loads a resource set manifest from disk.
pub struct ManifestLoader {
    path: PathBuf,
}

impl ManifestLoader {
    /// Create a loader for the manifest at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory containing the manifest, used as the last resolution root.
    pub fn manifest_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Read and parse the manifest.
    pub fn load(&self) -> ResourceResult<ResourceSet> {
        debug!("Loading resource set from {:?}", self.path);
        let content = fs::read_to_string(&self.path).map_err(|source| {
            ResourceError::ManifestRead {
                path: self.path.clone(),
                source,
            }
        })?;
        Self::load_str(&content, &self.path)
    }

    /// Parse manifest content; `origin` is only used in error messages.
    pub fn load_str(content: &str, origin: &Path) -> ResourceResult<ResourceSet> {
        let document: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ResourceError::ManifestParse {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;

        let mapping = document
            .as_mapping()
            .ok_or_else(|| schema_error(origin, "top-level document must be a mapping"))?;

        for key in REQUIRED_KEYS {
            if !mapping.contains_key(*key) {
                return Err(schema_error(
                    origin,
                    format!("missing required key '{}'", key),
                ));
            }
        }

        let resource_set: ResourceSet =
            serde_yaml::from_value(document).map_err(|e| schema_error(origin, e.to_string()))?;

        debug!(
            "Resource set has {} global variable(s) and {} top-level include(s)",
            resource_set.global.len(),
            resource_set.include.len()
        );
        Ok(resource_set)
    }
}

fn schema_error(origin: &Path, message: impl Into<String>) -> ResourceError {
    ResourceError::ManifestSchema {
        path: origin.to_path_buf(),
        message: message.into(),
    }
}
