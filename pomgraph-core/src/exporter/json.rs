//! JSON format exporter.

use serde::Serialize;

use crate::error::Result;
use crate::graph::ModuleGraph;
use crate::types::RelationKind;

#[derive(Serialize)]
struct GraphDocument<'g> {
    nodes: Vec<NodeRecord<'g>>,
    edges: Vec<EdgeRecord<'g>>,
}

#[derive(Serialize)]
struct NodeRecord<'g> {
    id: &'g str,
    packaging: &'g str,
    pom: &'g str,
}

#[derive(Serialize)]
struct EdgeRecord<'g> {
    source: &'g str,
    target: &'g str,
    linktype: String,
    relations: Vec<RelationKind>,
}

/// Export the graph as `{ "nodes": [...], "edges": [...] }`.
pub fn export(graph: &ModuleGraph, pretty: bool) -> Result<String> {
    let document = GraphDocument {
        nodes: graph
            .nodes()
            .map(|node| NodeRecord {
                id: node.id.as_str(),
                packaging: &node.attributes.packaging,
                pom: &node.attributes.descriptor_path,
            })
            .collect(),
        edges: graph
            .edges()
            .map(|edge| EdgeRecord {
                source: edge.source.as_str(),
                target: edge.target.as_str(),
                linktype: edge.relations.label(),
                relations: edge.relations.iter().collect(),
            })
            .collect(),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::test_support::sample_graph;

    #[test]
    fn test_export_json() {
        let output = export(&sample_graph(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(value["nodes"][0]["id"], "org.acme:root");
        assert_eq!(value["nodes"][2]["packaging"], "");
        assert_eq!(value["edges"][0]["linktype"], "module,dependency");
        assert_eq!(
            value["edges"][0]["relations"],
            serde_json::json!(["module", "dependency"])
        );
    }

    #[test]
    fn test_export_json_pretty() {
        let output = export(&sample_graph(), true).unwrap();
        assert!(output.contains('\n'));
    }
}
