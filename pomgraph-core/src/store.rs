//! Deduplicating registry from module identity to graph node.
//!
//! The same module is usually seen several times during a build: as a
//! scanned descriptor, as somebody's sub-module, as a parent, as a
//! dependency. [`NodeStore::get_or_create_node`] collapses all of those into
//! one node and merges whatever metadata each sighting carried.
//!
//! Not thread-safe; the store is mutated only by the single build pass.

use tracing::trace;

use crate::error::Result;
use crate::graph::ModuleGraph;
use crate::module::MavenModule;
use crate::types::{NodeId, RelationKind};

/// Owns the graph under construction and keeps one node per identity.
#[derive(Debug, Default)]
pub struct NodeStore {
    graph: ModuleGraph,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the node for `module`, creating or merging as needed.
    ///
    /// A new node is seeded from the module's packaging and descriptor path.
    /// An existing node only has its empty attributes filled in; known
    /// values are never overwritten.
    pub fn get_or_create_node(&mut self, module: &MavenModule) -> Result<NodeId> {
        let id = module.id().node_id();
        let incoming = module.attributes();

        match self.graph.node_mut(id.as_str()) {
            Some(node) => {
                node.attributes.merge(&incoming);
            }
            None => {
                trace!("Registering node {}", id);
                self.graph.insert_node(id.clone(), incoming)?;
            }
        }
        Ok(id)
    }

    /// Connect two registered nodes, merging labels on an existing edge.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId, kind: RelationKind) -> Result<()> {
        self.graph.connect(source, target, kind)
    }

    pub fn graph(&self) -> &ModuleGraph {
        &self.graph
    }

    pub fn into_graph(self) -> ModuleGraph {
        self.graph
    }
}
