//! GraphIR writer
//!
//! Save GraphIR documents to files or bytes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use prost::Message;

use crate::error::{ExportError, ExportResult};
use crate::proto::Graph;

/// Save a GraphIR document to a file
///
/// # Example
///
/// ```ignore
/// use graphir_export::io::save_graph;
///
/// save_graph(&graph, "model.graphir")?;
/// ```
pub fn save_graph<P: AsRef<Path>>(graph: &Graph, path: P) -> ExportResult<()> {
    write_bytes(path.as_ref(), &graph.encode_to_vec())
}

/// Encode a GraphIR document to bytes
pub fn graph_to_bytes(graph: &Graph) -> Vec<u8> {
    graph.encode_to_vec()
}

/// Calculate the size of an encoded document in bytes
pub fn graph_size(graph: &Graph) -> usize {
    graph.encoded_len()
}

/// Statistics of a saved document
#[derive(Debug, Clone)]
pub struct SaveStats {
    /// Size in bytes
    pub size_bytes: usize,
    /// Number of nodes
    pub node_count: usize,
    /// Number of embedded payloads
    pub init_arg_count: usize,
}

/// Save a document and return statistics
pub fn save_graph_with_stats<P: AsRef<Path>>(graph: &Graph, path: P) -> ExportResult<SaveStats> {
    let bytes = graph.encode_to_vec();
    let stats = SaveStats {
        size_bytes: bytes.len(),
        node_count: graph.nodes.len(),
        init_arg_count: graph.init_arg_count(),
    };

    write_bytes(path.as_ref(), &bytes)?;
    Ok(stats)
}

pub(crate) fn write_bytes(path: &Path, bytes: &[u8]) -> ExportResult<()> {
    let file = File::create(path).map_err(|e| {
        ExportError::InvalidModel(format!("Failed to create file '{}': {}", path.display(), e))
    })?;

    let mut writer = BufWriter::new(file);

    writer.write_all(bytes).map_err(|e| {
        ExportError::InvalidModel(format!("Failed to write file '{}': {}", path.display(), e))
    })?;

    writer.flush().map_err(|e| {
        ExportError::InvalidModel(format!("Failed to flush file '{}': {}", path.display(), e))
    })?;

    Ok(())
}
