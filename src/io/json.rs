//! JSON rendering of GraphIR documents
//!
//! The JSON form mirrors the protobuf messages field by field and is meant
//! for diagnostics, not as an interchange format.

use std::path::Path;

use crate::error::ExportResult;
use crate::proto::Graph;

use super::writer::write_bytes;

/// Render a document as JSON
pub fn graph_to_json(graph: &Graph, pretty: bool) -> ExportResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(graph)?
    } else {
        serde_json::to_string(graph)?
    };
    Ok(json)
}

/// Parse a document from its JSON rendering
pub fn graph_from_json(json: &str) -> ExportResult<Graph> {
    Ok(serde_json::from_str(json)?)
}

/// Write the pretty JSON rendering to a file
pub fn save_graph_json<P: AsRef<Path>>(graph: &Graph, path: P) -> ExportResult<()> {
    let json = graph_to_json(graph, true)?;
    write_bytes(path.as_ref(), json.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{GraphInfo, Node};

    fn make_graph() -> Graph {
        let mut node = Node {
            name: "Plus5".to_string(),
            op: "Plus".to_string(),
            ..Default::default()
        };
        node.ext_attrs.insert("b".to_string(), "2".to_string());
        node.ext_attrs.insert("a".to_string(), "1".to_string());
        Graph {
            graph_info: Some(GraphInfo {
                framework_name: "cntk".to_string(),
                ..Default::default()
            }),
            nodes: vec![node],
        }
    }

    #[test]
    fn test_render_fields() {
        let json = graph_to_json(&make_graph(), false).unwrap();
        assert!(json.contains(r#""framework_name":"cntk""#));
        assert!(json.contains(r#""op":"Plus""#));
        assert!(json.contains(r#""ext_attrs":{"a":"1","b":"2"}"#));
    }

    #[test]
    fn test_json_roundtrip() {
        let graph = make_graph();
        let json = graph_to_json(&graph, true).unwrap();
        assert_eq!(graph_from_json(&json).unwrap(), graph);
    }

    #[test]
    fn test_missing_fields_default() {
        let graph = graph_from_json(r#"{ "nodes": [ { "name": "n" } ] }"#).unwrap();
        assert!(graph.graph_info.is_none());
        assert!(graph.nodes[0].inputs.is_empty());
    }
}
