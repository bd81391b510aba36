//! GraphIR Protocol Buffer types
//!
//! This module re-exports the types generated by `prost-build` from
//! `proto/graph_ir.proto` (package `graphIR`). The build script also derives
//! serde traits on every message for the JSON diagnostic rendering.
//! Additional extension methods are provided in the `extensions` submodule.

/// Generated GraphIR protobuf types
#[allow(missing_docs)]
#[allow(clippy::all)]
pub mod graph_ir {
    include!(concat!(env!("OUT_DIR"), "/graph_ir.rs"));
}

// Re-export commonly used types at module level
pub use graph_ir::{Edge, Graph, GraphInfo, InitArg, Node};

/// Extension methods for GraphIR protobuf types
pub mod extensions;

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_graph_default() {
        let graph = Graph::default();
        assert!(graph.graph_info.is_none());
        assert!(graph.nodes.is_empty());
    }

    #[test]
    fn test_node_default() {
        let node = Node::default();
        assert!(node.inputs.is_empty());
        assert!(node.outputs.is_empty());
        assert!(node.ext_attrs.is_empty());
    }

    #[test]
    fn test_node_wire_roundtrip_keeps_maps() {
        let mut node = Node {
            name: "Times3/layer".to_string(),
            op: "Times".to_string(),
            ..Default::default()
        };
        node.ext_attrs.insert("axis".to_string(), "1".to_string());
        node.init_attrs.insert(
            "W".to_string(),
            InitArg {
                dbytes: 4,
                data_base64: "AACAPw==".to_string(),
            },
        );

        let decoded = Node::decode(node.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, node);
    }

    #[test]
    fn test_wire_tags() {
        let edge = Edge {
            dbytes: 4,
            ..Default::default()
        };
        // field 3, varint
        assert_eq!(edge.encode_to_vec(), vec![0x18, 0x04]);

        let arg = InitArg {
            data_base64: "A".to_string(),
            ..Default::default()
        };
        // field 2, length-delimited
        assert_eq!(arg.encode_to_vec(), vec![0x12, 0x01, b'A']);

        let mut node = Node::default();
        node.ext_attrs.insert("k".to_string(), "v".to_string());
        // field 5, length-delimited map entry
        assert_eq!(node.encode_to_vec()[0], 0x2A);

        let graph = Graph {
            graph_info: Some(GraphInfo::default()),
            nodes: Vec::new(),
        };
        // field 1, empty message
        assert_eq!(graph.encode_to_vec(), vec![0x0A, 0x00]);
    }

    #[test]
    fn test_json_uses_field_names() {
        let edge = Edge {
            name: "in1".to_string(),
            dtype: "fp32".to_string(),
            dbytes: 4,
            shape: vec![4, 4],
        };
        let json = serde_json::to_string(&edge).unwrap();
        assert!(json.contains("\"dbytes\":4"));
        assert!(json.contains("\"shape\":[4,4]"));
    }
}
