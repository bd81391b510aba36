//! GraphIR import
//!
//! Rebuilding a source graph from GraphIR is not implemented. Every entry
//! point reports the conversion as unavailable; callers must not treat the
//! result as success.

use tracing::warn;

use crate::error::{ExportError, ExportResult};
use crate::graph::ComputationGraph;
use crate::proto::Graph;
use crate::traits::GraphImporter;

/// Importer that always reports [`ExportError::ImportUnavailable`]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedImporter;

impl GraphImporter for UnsupportedImporter {
    fn import(&self, graph: &Graph, _template: &ComputationGraph) -> ExportResult<ComputationGraph> {
        warn!(nodes = graph.nodes.len(), "GraphIR import requested but not available");
        Err(ExportError::ImportUnavailable)
    }
}

/// Convert a GraphIR document back to a source graph
///
/// Always returns `None`.
pub fn graph_ir_to_model(graph: &Graph, template: &ComputationGraph) -> Option<ComputationGraph> {
    UnsupportedImporter.import(graph, template).ok()
}
