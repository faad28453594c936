//! Include tree flattening.
//!
//! Walks the include tree depth-first and yields one [`LogicalPath`] per
//! leaf, in source order. Groups only contribute a prefix.

use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{ResourceError, ResourceResult};
use crate::manifest::IncludeNode;

/// Address of a resource relative to the resource set root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalPath(String);

impl LogicalPath {
    /// Create a logical path from its string form.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// View the path as a filesystem path.
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Plain string prefix test, not segment-aware.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Extend with one segment using the platform separator.
    ///
    /// An absolute segment replaces the accumulated prefix.
    pub fn join(&self, segment: &str) -> Self {
        Self(self.as_path().join(segment).to_string_lossy().into_owned())
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogicalPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl AsRef<Path> for LogicalPath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

/// Position of a node as sibling indices from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePosition(Vec<usize>);

impl NodePosition {
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("include")?;
        for index in &self.0 {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}

/// A node that had neither `name` nor `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedNode {
    pub position: NodePosition,
    /// Logical path of the enclosing group
    pub parent: LogicalPath,
}

/// Result of flattening an include tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flattened {
    pub paths: Vec<LogicalPath>,
    pub malformed: Vec<MalformedNode>,
}

impl Flattened {
    /// Reject the tree if any node was malformed.
    pub fn into_strict(self) -> ResourceResult<Vec<LogicalPath>> {
        match self.malformed.first() {
            Some(node) => Err(ResourceError::MalformedInclude {
                position: node.position.to_string(),
            }),
            None => Ok(self.paths),
        }
    }
}

/// Flatten an include tree into logical paths.
///
/// Malformed nodes are reported and skipped together with their subtree.
pub fn flatten(nodes: &[IncludeNode]) -> Flattened {
    let mut flattened = Flattened::default();
    let mut position = Vec::new();
    walk(nodes, &LogicalPath::default(), &mut position, &mut flattened);
    debug!(
        "Flattened include tree into {} resource(s)",
        flattened.paths.len()
    );
    flattened
}

fn walk(
    nodes: &[IncludeNode],
    prefix: &LogicalPath,
    position: &mut Vec<usize>,
    out: &mut Flattened,
) {
    for (index, node) in nodes.iter().enumerate() {
        position.push(index);

        match node.label().segment() {
            None => {
                let malformed = MalformedNode {
                    position: NodePosition(position.clone()),
                    parent: prefix.clone(),
                };
                warn!(
                    "Malformed resources set at {}, at least one 'name' or 'path' is required",
                    malformed.position
                );
                out.malformed.push(malformed);
            }
            Some(segment) => {
                let path = prefix.join(segment);
                match node {
                    IncludeNode::Group { include, .. } => walk(include, &path, position, out),
                    IncludeNode::Leaf(_) => out.paths.push(path),
                }
            }
        }

        position.pop();
    }
}
