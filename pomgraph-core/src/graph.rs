//! Module graph storage powered by petgraph.
//!
//! Holds an in-memory directed graph where:
//! - Nodes are [`ModuleNode`]s keyed by `"<group>:<artifact>"`
//! - Edges carry a [`RelationSet`] (parent, module, dependency)
//!
//! There is at most one edge per ordered `(source, target)` pair. Connecting
//! the same pair again unions the relation labels into the existing edge.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use crate::error::{GraphError, Result};
use crate::types::{NodeAttributes, NodeId, RelationKind, RelationSet};

/// A graph node: one logical Maven module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleNode {
    pub id: NodeId,
    pub attributes: NodeAttributes,
}

/// A borrowed view of one edge.
#[derive(Clone, Copy, Debug)]
pub struct EdgeView<'g> {
    pub source: &'g NodeId,
    pub target: &'g NodeId,
    pub relations: &'g RelationSet,
}

/// Directed module graph with an id -> index lookup.
#[derive(Debug, Default)]
pub struct ModuleGraph {
    graph: DiGraph<ModuleNode, RelationSet>,
    node_map: HashMap<NodeId, NodeIndex>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new node. Fails if `id` is already present.
    pub fn insert_node(&mut self, id: NodeId, attributes: NodeAttributes) -> Result<()> {
        if self.node_map.contains_key(&id) {
            return Err(GraphError::AmbiguousIdentity { id: id.to_string() });
        }
        let idx = self.graph.add_node(ModuleNode {
            id: id.clone(),
            attributes,
        });
        self.node_map.insert(id, idx);
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&ModuleNode> {
        self.index_of_str(id).map(|idx| &self.graph[idx])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut ModuleNode> {
        let idx = self.index_of_str(id)?;
        Some(&mut self.graph[idx])
    }

    /// Connect `source -> target` with `kind`, merging into an existing edge.
    ///
    /// Both endpoints must already be registered.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId, kind: RelationKind) -> Result<()> {
        let s = self.index_of(source)?;
        let t = self.index_of(target)?;

        match self.graph.find_edge(s, t) {
            Some(edge) => {
                self.graph[edge].insert(kind);
            }
            None => {
                self.graph.add_edge(s, t, RelationSet::single(kind));
            }
        }
        Ok(())
    }

    /// Relation labels on the edge `source -> target`, if any.
    pub fn relations(&self, source: &str, target: &str) -> Option<&RelationSet> {
        let s = self.index_of_str(source)?;
        let t = self.index_of_str(target)?;
        self.graph.find_edge(s, t).map(|edge| &self.graph[edge])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ModuleNode> {
        self.graph.node_weights()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.graph.edge_references().map(|edge| EdgeView {
            source: &self.graph[edge.source()].id,
            target: &self.graph[edge.target()].id,
            relations: edge.weight(),
        })
    }

    /// Ids of nodes reachable over one outgoing edge labeled `kind`.
    pub fn targets(&self, source: &str, kind: RelationKind) -> Vec<&NodeId> {
        let Some(idx) = self.index_of_str(source) else {
            return vec![];
        };
        self.graph
            .edges(idx)
            .filter(|edge| edge.weight().contains(kind))
            .map(|edge| &self.graph[edge.target()].id)
            .collect()
    }

    /// Get the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if a node exists in the graph.
    pub fn has_node(&self, id: &str) -> bool {
        self.index_of_str(id).is_some()
    }

    /// Number of edges carrying `kind` among their labels.
    pub fn edge_count_of(&self, kind: RelationKind) -> usize {
        self.graph
            .edge_weights()
            .filter(|relations| relations.contains(kind))
            .count()
    }

    fn index_of(&self, id: &NodeId) -> Result<NodeIndex> {
        // an unregistered endpoint means the store was bypassed
        self.node_map
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnregisteredNode { id: id.to_string() })
    }

    fn index_of_str(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }
}
