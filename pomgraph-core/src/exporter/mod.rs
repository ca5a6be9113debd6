//! Graph serialization.
//!
//! - graphml: GraphML 1.0 (the default interchange format)
//! - json: node/edge lists for scripting
//! - dot: Graphviz `digraph`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::graph::ModuleGraph;

pub mod dot;
pub mod graphml;
pub mod json;

/// Node attribute name for the packaging.
pub const PACKAGING_KEY: &str = "packaging";
/// Node attribute name for the descriptor path.
pub const POM_KEY: &str = "pom";
/// Edge attribute name for the comma-joined relation label.
pub const LINK_KEY: &str = "linktype";

/// Export format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Graphml,
    Json,
    Dot,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Graphml => "graphml",
            Self::Json => "json",
            Self::Dot => "dot",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "graphml" => Ok(Self::Graphml),
            "json" => Ok(Self::Json),
            "dot" | "gv" => Ok(Self::Dot),
            _ => Err(format!("Unknown export format: '{}'", s)),
        }
    }
}

/// Serialize `graph` in `format`. `pretty` only affects JSON.
pub fn export(graph: &ModuleGraph, format: ExportFormat, pretty: bool) -> Result<String> {
    match format {
        ExportFormat::Graphml => Ok(graphml::export(graph)),
        ExportFormat::Json => json::export(graph, pretty),
        ExportFormat::Dot => Ok(dot::export(graph)),
    }
}

/// Escape text for XML content and attribute values.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::graph::ModuleGraph;
    use crate::types::{ModuleId, NodeAttributes, RelationKind};

    /// root (pom) aggregates and depends on core; core depends on an external lib.
    pub fn sample_graph() -> ModuleGraph {
        let mut graph = ModuleGraph::new();
        let root = ModuleId::new("org.acme", "root").node_id();
        let core = ModuleId::new("org.acme", "core").node_id();
        let lib = ModuleId::new("com.ext", "lib").node_id();

        graph
            .insert_node(root.clone(), NodeAttributes::new("pom", "/repo/pom.xml"))
            .unwrap();
        graph
            .insert_node(core.clone(), NodeAttributes::new("jar", "/repo/core/pom.xml"))
            .unwrap();
        graph.insert_node(lib.clone(), NodeAttributes::default()).unwrap();

        graph.connect(&root, &core, RelationKind::Module).unwrap();
        graph.connect(&root, &core, RelationKind::Dependency).unwrap();
        graph.connect(&core, &root, RelationKind::Parent).unwrap();
        graph.connect(&core, &lib, RelationKind::Dependency).unwrap();
        graph
    }
}
