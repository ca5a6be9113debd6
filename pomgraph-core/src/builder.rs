//! Graph builders for the three relation kinds.
//!
//! Each kind is one pass over the module set:
//!
//! | Kind         | Edge                   | Source of truth          |
//! |--------------|------------------------|--------------------------|
//! | `Dependency` | module -> dependency   | `<dependencies>`         |
//! | `Module`     | module -> sub-module   | `<modules>`              |
//! | `Parent`     | module -> parent       | `<parent>`               |
//!
//! Every endpoint goes through the [`NodeStore`], so targets that only ever
//! appear as a reference still become (attribute-less) nodes, and a target
//! that is later scanned directly gets its metadata merged in. Passes can run
//! in any order; an ordered pair connected by several passes ends up as one
//! edge carrying every label.

use tracing::debug;

use crate::descriptor::DescriptorCache;
use crate::error::Result;
use crate::graph::ModuleGraph;
use crate::module::MavenModule;
use crate::store::NodeStore;
use crate::types::RelationKind;

/// Run one relation pass over `modules`.
///
/// Each module is registered as a node before its edges are added, so a
/// module with no relations of this kind still appears in the graph.
pub fn build(
    kind: RelationKind,
    modules: &[MavenModule],
    store: &mut NodeStore,
    cache: &mut DescriptorCache,
) -> Result<()> {
    for module in modules {
        store.get_or_create_node(module)?;
        add_edges(kind, module, store, cache)?;
    }
    debug!(
        "{} pass done: {} edges carry this label",
        kind,
        store.graph().edge_count_of(kind)
    );
    Ok(())
}

/// Add the `kind` edges leaving `module`.
pub fn add_edges(
    kind: RelationKind,
    module: &MavenModule,
    store: &mut NodeStore,
    cache: &mut DescriptorCache,
) -> Result<()> {
    let targets: Vec<MavenModule> = match kind {
        RelationKind::Dependency => module
            .dependencies(cache)?
            .into_iter()
            .map(|(dependency, _)| dependency)
            .collect(),
        RelationKind::Module => module.sub_modules(cache)?,
        RelationKind::Parent => module.parent(cache)?.into_iter().collect(),
    };

    if targets.is_empty() {
        return Ok(());
    }

    let source = store.get_or_create_node(module)?;
    for target in &targets {
        let target = store.get_or_create_node(target)?;
        store.connect(&source, &target, kind)?;
    }
    Ok(())
}

/// Build a graph over `modules` with every relation kind in `kinds`.
///
/// Duplicate kinds are ignored. An empty `kinds` yields a graph with nodes
/// only.
pub fn build_graph(
    modules: &[MavenModule],
    kinds: &[RelationKind],
    cache: &mut DescriptorCache,
) -> Result<ModuleGraph> {
    let mut store = NodeStore::new();

    if kinds.is_empty() {
        for module in modules {
            store.get_or_create_node(module)?;
        }
    }

    let mut done: Vec<RelationKind> = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        if done.contains(&kind) {
            continue;
        }
        build(kind, modules, &mut store, cache)?;
        done.push(kind);
    }

    Ok(store.into_graph())
}
