//! Resource location resolution.
//!
//! A logical path is looked up, in order:
//! 1. as-is, when it is absolute
//! 2. relative to the working directory
//! 3. relative to the directory containing the manifest
//!
//! Directories expand into their immediate `.yml`, `.yaml` and `.json`
//! children, sorted by file name.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{ResourceError, ResourceResult};
use crate::flatten::LogicalPath;

/// File name suffixes picked up from resource directories.
pub const TEMPLATE_EXTENSIONS: &[&str] = &[".yml", ".yaml", ".json"];

/// An existing template file and the logical path it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub logical: LogicalPath,
    pub path: PathBuf,
}

impl fmt::Display for ResolvedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Whether a directory member should be templated.
pub fn is_template_file(file_name: &str) -> bool {
    TEMPLATE_EXTENSIONS
        .iter()
        .any(|ext| file_name.ends_with(ext))
}

/// Maps logical paths onto the filesystem.
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    cwd: PathBuf,
    manifest_dir: PathBuf,
}

impl ResourceLocator {
    /// Create a locator searching `cwd`, then `manifest_dir`.
    pub fn new(cwd: impl Into<PathBuf>, manifest_dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            manifest_dir: manifest_dir.into(),
        }
    }

    /// Candidate locations in priority order.
    fn candidates(&self, logical: &LogicalPath) -> Vec<PathBuf> {
        let path = logical.as_path();
        if path.is_absolute() {
            vec![path.to_path_buf()]
        } else {
            vec![self.cwd.join(path), self.manifest_dir.join(path)]
        }
    }

    /// Find the first existing location for a logical path.
    pub fn locate(&self, logical: &LogicalPath) -> ResourceResult<PathBuf> {
        match self
            .candidates(logical)
            .into_iter()
            .find(|candidate| candidate.exists())
        {
            Some(found) => {
                debug!("Resource {} found at {:?}", logical, found);
                Ok(found)
            }
            None => Err(ResourceError::ResourceNotFound {
                logical: logical.to_string(),
            }),
        }
    }

    /// Resolve one logical path into template files.
    pub fn resolve(&self, logical: &LogicalPath) -> ResourceResult<Vec<ResolvedFile>> {
        let location = self.locate(logical)?;

        if location.is_file() {
            return Ok(vec![ResolvedFile {
                logical: logical.clone(),
                path: location,
            }]);
        }

        if location.is_dir() {
            let files = expand_directory(&location)?;
            if files.is_empty() {
                warn!(
                    "Resource directory {:?} contains no .yml, .yaml or .json files",
                    location
                );
            }
            return Ok(files
                .into_iter()
                .map(|path| ResolvedFile {
                    logical: logical.clone(),
                    path,
                })
                .collect());
        }

        warn!(
            "Resource {} at {:?} is neither a file nor a directory, skipping",
            logical, location
        );
        Ok(Vec::new())
    }

    /// Resolve every logical path, stopping at the first unresolvable one.
    pub fn resolve_all(&self, logical: &[LogicalPath]) -> ResourceResult<Vec<ResolvedFile>> {
        let mut resolved = Vec::new();
        for path in logical {
            resolved.extend(self.resolve(path)?);
        }
        debug!(
            "Resolved {} resource(s) into {} file(s)",
            logical.len(),
            resolved.len()
        );
        Ok(resolved)
    }
}

/// List the template files directly inside `dir`.
///
/// Only entries with a template name are inspected; symlinks among them are
/// followed and kept when they point at a regular file.
fn expand_directory(dir: &Path) -> ResourceResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ResourceError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;

        if !is_template_file(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let file_type = entry.file_type();
        let is_file = if file_type.is_symlink() {
            match fs::metadata(entry.path()) {
                Ok(target) => target.is_file(),
                Err(e) => {
                    warn!("Skipping unreadable link {:?}: {}", entry.path(), e);
                    false
                }
            }
        } else {
            file_type.is_file()
        };

        if is_file {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
