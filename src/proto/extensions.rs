//! Extension methods for GraphIR protobuf types
//!
//! Provides convenient helper methods for working with GraphIR protobuf types.

use super::graph_ir::*;
use crate::tensor::dtype::ElementType;
use crate::tensor::shape::numel;

// ============================================================================
// Graph extensions
// ============================================================================

impl Graph {
    /// Find a node by its unique name
    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// All nodes with the given op tag, in document order
    pub fn nodes_by_op<'a>(&'a self, op: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| n.op == op)
    }

    /// Get mutable reference to the header, creating if necessary
    pub fn graph_info_mut(&mut self) -> &mut GraphInfo {
        self.graph_info.get_or_insert_with(GraphInfo::default)
    }

    /// Total number of embedded payloads
    pub fn init_arg_count(&self) -> usize {
        self.nodes.iter().map(|n| n.init_attrs.len()).sum()
    }
}

// ============================================================================
// Node extensions
// ============================================================================

impl Node {
    /// Get a rendered attribute
    pub fn get_ext_attr(&self, key: &str) -> Option<&str> {
        self.ext_attrs.get(key).map(|s| s.as_str())
    }

    /// Get an embedded tensor payload
    pub fn get_init_arg(&self, key: &str) -> Option<&InitArg> {
        self.init_attrs.get(key)
    }

    /// Check if this node has a specific op tag
    pub fn is_op(&self, op: &str) -> bool {
        self.op == op
    }
}

// ============================================================================
// Edge extensions
// ============================================================================

impl Edge {
    /// Get the total number of elements
    pub fn num_elements(&self) -> usize {
        numel(&self.shape)
    }

    /// Check if this edge is a scalar
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Create a new Edge for an element type
pub fn make_edge(name: &str, elem: ElementType, shape: &[i64]) -> Edge {
    Edge {
        name: name.to_string(),
        dtype: elem.tag().to_string(),
        dbytes: elem.size_in_bytes() as i32,
        shape: shape.to_vec(),
    }
}

/// Create a new InitArg for an element type
pub fn make_init_arg(elem: ElementType, data_base64: String) -> InitArg {
    InitArg {
        dbytes: elem.size_in_bytes() as i32,
        data_base64,
    }
}
