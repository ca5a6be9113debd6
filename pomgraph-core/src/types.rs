//! Shared value types for module identities, graph nodes, and relation labels.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Packaging assumed when a descriptor omits `<packaging>`.
pub const DEFAULT_PACKAGING: &str = "jar";

/// Extra attributes declared on a `<dependency>` (scope, type, ...).
pub type DependencyMetadata = BTreeMap<String, String>;

/// A Maven module identity: the `(groupId, artifactId)` pair.
///
/// Compared verbatim. There is no version component.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId {
    pub group: String,
    pub artifact: String,
}

impl ModuleId {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// Graph node id for this identity.
    pub fn node_id(&self) -> NodeId {
        NodeId(format!("{}:{}", self.group, self.artifact))
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

/// Stable graph node id, `"<group>:<artifact>"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Attributes carried by a graph node. An empty string means "unknown".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAttributes {
    pub packaging: String,
    pub descriptor_path: String,
}

impl NodeAttributes {
    pub fn new(packaging: impl Into<String>, descriptor_path: impl Into<String>) -> Self {
        Self {
            packaging: packaging.into(),
            descriptor_path: descriptor_path.into(),
        }
    }

    /// Fill in attributes that are still unknown. Known values are never replaced.
    pub fn merge(&mut self, incoming: &NodeAttributes) {
        fill_if_empty(&mut self.packaging, &incoming.packaging);
        fill_if_empty(&mut self.descriptor_path, &incoming.descriptor_path);
    }
}

fn fill_if_empty(stored: &mut String, incoming: &str) {
    if stored.is_empty() && !incoming.is_empty() {
        *stored = incoming.to_string();
    }
}

/// Semantic meaning of an edge.
///
/// Declaration order is the order labels are rendered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    /// `module -> parent` inheritance.
    Parent,
    /// `aggregator -> sub-module` containment.
    Module,
    /// `module -> dependency`.
    Dependency,
}

impl RelationKind {
    pub const ALL: [RelationKind; 3] = [
        RelationKind::Parent,
        RelationKind::Module,
        RelationKind::Dependency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Module => "module",
            Self::Dependency => "dependency",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parent" => Ok(Self::Parent),
            "module" => Ok(Self::Module),
            "dependency" => Ok(Self::Dependency),
            _ => Err(format!(
                "Unknown relation kind: '{}' (expected parent, module or dependency)",
                s
            )),
        }
    }
}

/// The set of relation labels on one edge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSet(BTreeSet<RelationKind>);

impl RelationSet {
    pub fn single(kind: RelationKind) -> Self {
        let mut set = Self::default();
        set.insert(kind);
        set
    }

    /// Add a label. Returns `false` if it was already present.
    pub fn insert(&mut self, kind: RelationKind) -> bool {
        self.0.insert(kind)
    }

    pub fn contains(&self, kind: RelationKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = RelationKind> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-joined label, e.g. `"module,dependency"`.
    pub fn label(&self) -> String {
        self.iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for RelationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
