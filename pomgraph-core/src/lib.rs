//! pomgraph core - Maven module graph assembly.
//!
//! Reads `pom.xml` descriptors, deduplicates the modules they describe and
//! the modules they reference, and links them into a single directed graph.
//!
//! # Features
//!
//! - **Three relation kinds**: parent, sub-module containment, dependency
//! - **One node per identity**: `group:artifact`, with metadata merged across
//!   every sighting
//! - **One edge per ordered pair**: relation labels accumulate on it
//! - **Gitignore-aware discovery** via the `ignore` crate
//! - **Parallel descriptor reads** using Rayon
//! - **Export formats**: GraphML, JSON, DOT
//!
//! # Usage
//!
//! ```no_run
//! use pomgraph_core::{build_module_graph, exporter, BuildOptions};
//!
//! let report = build_module_graph(&["./my-project"], &BuildOptions::default())?;
//! let graphml = exporter::graphml::export(&report.graph);
//! # Ok::<(), pomgraph_core::GraphError>(())
//! ```

pub mod builder;
pub mod descriptor;
pub mod error;
pub mod exporter;
pub mod graph;
pub mod module;
pub mod pipeline;
pub mod scanner;
pub mod store;
pub mod types;

pub use builder::build_graph;
pub use descriptor::{DescriptorCache, ParsedDescriptor};
pub use error::{GraphError, Result};
pub use exporter::ExportFormat;
pub use graph::ModuleGraph;
pub use module::MavenModule;
pub use pipeline::{build_module_graph, BuildOptions, BuildReport};
pub use scanner::{ScanOptions, ScanResult};
pub use store::NodeStore;
pub use types::{ModuleId, NodeAttributes, NodeId, RelationKind, RelationSet};
