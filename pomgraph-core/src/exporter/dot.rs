//! Graphviz DOT exporter.

use crate::graph::ModuleGraph;
use crate::types::RelationKind;

/// Export the graph as a Graphviz `digraph`.
///
/// Modules with `pom` packaging are drawn as folders; modules with no
/// descriptor are dashed. Edge style follows the strongest relation: parent
/// edges are dotted, containment is bold.
pub fn export(graph: &ModuleGraph) -> String {
    let mut lines = vec![
        "digraph modules {".to_string(),
        "    rankdir=LR;".to_string(),
        "    node [shape=box];".to_string(),
    ];

    for node in graph.nodes() {
        let mut attrs = vec![format!("label={}", quote(node.id.as_str()))];
        if node.attributes.packaging == "pom" {
            attrs.push("shape=folder".to_string());
        }
        if node.attributes.descriptor_path.is_empty() {
            attrs.push("style=dashed".to_string());
        }
        lines.push(format!("    {} [{}];", quote(node.id.as_str()), attrs.join(", ")));
    }

    for edge in graph.edges() {
        let style = if edge.relations.contains(RelationKind::Module) {
            "bold"
        } else if edge.relations.contains(RelationKind::Parent) {
            "dotted"
        } else {
            "solid"
        };
        lines.push(format!(
            "    {} -> {} [label={}, style={}];",
            quote(edge.source.as_str()),
            quote(edge.target.as_str()),
            quote(&edge.relations.label()),
            style
        ));
    }

    lines.push("}".to_string());

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}
