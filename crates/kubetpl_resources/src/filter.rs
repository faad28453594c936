//! Include/exclude selection over logical paths.

use tracing::debug;

use crate::error::{ResourceError, ResourceResult};
use crate::flatten::LogicalPath;

/// Which logical paths take part in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Every resource.
    #[default]
    All,
    /// Resources starting with at least one prefix.
    Include(Vec<String>),
    /// Resources starting with none of the prefixes.
    Exclude(Vec<String>),
}

impl Selection {
    /// Build a selection from `--include` and `--exclude` prefixes.
    pub fn from_prefixes(include: Vec<String>, exclude: Vec<String>) -> ResourceResult<Self> {
        match (include.is_empty(), exclude.is_empty()) {
            (false, false) => Err(ResourceError::ConflictingFilters),
            (false, true) => Ok(Selection::Include(include)),
            (true, false) => Ok(Selection::Exclude(exclude)),
            (true, true) => Ok(Selection::All),
        }
    }

    pub fn matches(&self, path: &LogicalPath) -> bool {
        match self {
            Selection::All => true,
            Selection::Include(prefixes) => prefixes.iter().any(|p| path.starts_with(p)),
            Selection::Exclude(prefixes) => !prefixes.iter().any(|p| path.starts_with(p)),
        }
    }

    /// Retain matching paths, preserving order.
    pub fn apply(&self, paths: &[LogicalPath]) -> Vec<LogicalPath> {
        paths
            .iter()
            .filter(|path| {
                let keep = self.matches(path);
                if !keep {
                    debug!("Filtered out resource {}", path);
                }
                keep
            })
            .cloned()
            .collect()
    }
}
