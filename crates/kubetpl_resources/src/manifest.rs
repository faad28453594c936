//! Resource set manifest definitions.
//!
//! A resource set is a YAML document with three top-level keys:
//!
//! ```yaml
//! global:
//!   env: prod
//! context: prod-cluster
//! include:
//!   - name: base
//!     include:
//!       - name: namespace.yaml
//!       - path: rbac
//!   - path: /srv/shared/monitoring
//! ```
//!
//! Nodes carrying an `include` list are groups; every other node is a leaf
//! that names a file or directory.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Variables declared under `global`.
pub type Variables = BTreeMap<String, serde_json::Value>;

/// Keys every resource set must declare.
pub const REQUIRED_KEYS: &[&str] = &["global", "include"];

/// A parsed resource set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceSet {
    /// Template variables shared by every resource
    #[serde(default, deserialize_with = "null_as_empty")]
    pub global: Variables,
    /// Cluster context passed to kubectl
    #[serde(default)]
    pub context: Option<String>,
    /// Root of the include tree
    pub include: Vec<IncludeNode>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Variables, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Variables>::deserialize(deserializer)?.unwrap_or_default())
}

/// The `name`/`path` pair identifying a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NodeLabel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl NodeLabel {
    /// Label a node by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: None,
        }
    }

    /// Label a node by an explicit path.
    pub fn pathed(path: impl Into<String>) -> Self {
        Self {
            name: None,
            path: Some(path.into()),
        }
    }

    /// The segment this node contributes to a logical path.
    ///
    /// `path` wins over `name`; `None` means the node is malformed.
    pub fn segment(&self) -> Option<&str> {
        self.path.as_deref().or(self.name.as_deref())
    }
}

/// A node of the include tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawIncludeNode")]
pub enum IncludeNode {
    /// A file or directory reference.
    Leaf(NodeLabel),
    /// A namespace grouping further nodes.
    Group {
        label: NodeLabel,
        include: Vec<IncludeNode>,
    },
}

impl IncludeNode {
    /// Create a file or directory reference.
    pub fn leaf(label: NodeLabel) -> Self {
        IncludeNode::Leaf(label)
    }

    /// Create a group of nested nodes.
    pub fn group(label: NodeLabel, include: Vec<IncludeNode>) -> Self {
        IncludeNode::Group { label, include }
    }

    /// Get the node's label.
    pub fn label(&self) -> &NodeLabel {
        match self {
            IncludeNode::Leaf(label) => label,
            IncludeNode::Group { label, .. } => label,
        }
    }
}

/// Wire shape of a node before it is classified.
#[derive(Deserialize)]
struct RawIncludeNode {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    include: Option<Vec<IncludeNode>>,
}

impl From<RawIncludeNode> for IncludeNode {
    fn from(raw: RawIncludeNode) -> Self {
        let label = NodeLabel {
            name: raw.name,
            path: raw.path,
        };
        match raw.include {
            Some(include) => IncludeNode::Group { label, include },
            None => IncludeNode::Leaf(label),
        }
    }
}
