//! GraphML exporter.
//!
//! Nodes carry `packaging` and `pom` (descriptor path) string attributes;
//! edges carry `linktype`, the comma-joined relation label. Node and edge
//! order follow graph insertion order.

use super::{escape_xml, LINK_KEY, PACKAGING_KEY, POM_KEY};
use crate::graph::ModuleGraph;

const GRAPHML_NAMESPACE: &str = "http://graphml.graphdrawing.org/xmlns";

/// Export the graph as a GraphML document.
pub fn export(graph: &ModuleGraph) -> String {
    let mut lines = Vec::new();

    lines.push("<?xml version=\"1.0\" encoding=\"UTF-8\"?>".to_string());
    lines.push(format!(
        "<graphml xmlns=\"{ns}\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xsi:schemaLocation=\"{ns} {ns}/1.0/graphml.xsd\">",
        ns = GRAPHML_NAMESPACE
    ));
    for (key, domain) in [(PACKAGING_KEY, "node"), (POM_KEY, "node"), (LINK_KEY, "edge")] {
        lines.push(format!(
            "  <key id=\"{0}\" for=\"{1}\" attr.name=\"{0}\" attr.type=\"string\"/>",
            key, domain
        ));
    }
    lines.push("  <graph id=\"G\" edgedefault=\"directed\">".to_string());

    for node in graph.nodes() {
        lines.push(format!("    <node id=\"{}\">", escape_xml(node.id.as_str())));
        lines.push(data_line(PACKAGING_KEY, &node.attributes.packaging));
        lines.push(data_line(POM_KEY, &node.attributes.descriptor_path));
        lines.push("    </node>".to_string());
    }

    for (i, edge) in graph.edges().enumerate() {
        lines.push(format!(
            "    <edge id=\"e{}\" source=\"{}\" target=\"{}\">",
            i,
            escape_xml(edge.source.as_str()),
            escape_xml(edge.target.as_str())
        ));
        lines.push(data_line(LINK_KEY, &edge.relations.label()));
        lines.push("    </edge>".to_string());
    }

    lines.push("  </graph>".to_string());
    lines.push("</graphml>".to_string());

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn data_line(key: &str, value: &str) -> String {
    format!("      <data key=\"{}\">{}</data>", key, escape_xml(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::test_support::sample_graph;
    use crate::types::{ModuleId, NodeAttributes};

    #[test]
    fn test_export_graphml_structure() {
        let output = export(&sample_graph());

        assert!(output.starts_with("<?xml"));
        assert!(output.contains("edgedefault=\"directed\""));
        assert!(output.contains("attr.name=\"linktype\""));
        assert_eq!(output.matches("<node ").count(), 3);
        assert_eq!(output.matches("<edge ").count(), 3);
        assert!(output.contains("<node id=\"org.acme:root\">"));
        assert!(output.contains("<data key=\"packaging\">pom</data>"));
        assert!(output.contains("<data key=\"pom\">/repo/core/pom.xml</data>"));
        assert!(output.contains(
            "<edge id=\"e0\" source=\"org.acme:root\" target=\"org.acme:core\">"
        ));
        assert!(output.contains("<data key=\"linktype\">module,dependency</data>"));
    }

    #[test]
    fn test_export_graphml_is_well_formed() {
        let mut graph = sample_graph();
        graph
            .insert_node(
                ModuleId::new("odd&group", "<artifact>").node_id(),
                NodeAttributes::new("jar", "/repo/it's/pom.xml"),
            )
            .unwrap();
        let output = export(&graph);

        let doc = roxmltree::Document::parse(&output).unwrap();
        let nodes = doc
            .descendants()
            .filter(|n| n.has_tag_name((GRAPHML_NAMESPACE, "node")))
            .count();
        assert_eq!(nodes, 4);
        assert!(doc
            .descendants()
            .any(|n| n.attribute("id") == Some("odd&group:<artifact>")));
    }

    #[test]
    fn test_export_empty_graph() {
        let output = export(&ModuleGraph::new());
        assert!(output.contains("<graph id=\"G\" edgedefault=\"directed\">"));
        assert!(!output.contains("<node "));
    }
}
