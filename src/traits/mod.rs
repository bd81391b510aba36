//! Core traits for graphir-export
//!
//! Defines the two conversion directions between source graphs and GraphIR.

use crate::error::ExportResult;
use crate::graph::ComputationGraph;
use crate::proto::Graph;

/// Source graph to GraphIR conversion
///
/// # Example
///
/// ```ignore
/// struct NodeCounter;
///
/// impl GraphExporter for NodeCounter {
///     fn export(&self, source: &ComputationGraph) -> ExportResult<Graph> {
///         Ok(Graph::default())
///     }
/// }
/// ```
pub trait GraphExporter {
    /// Export the graph reachable from the source's root function
    fn export(&self, source: &ComputationGraph) -> ExportResult<Graph>;
}

/// GraphIR to source graph conversion
///
/// `template` is the model the document was exported from; an importer may
/// use it to recover information GraphIR does not carry.
pub trait GraphImporter {
    /// Rebuild a source graph from a GraphIR document
    fn import(&self, graph: &Graph, template: &ComputationGraph) -> ExportResult<ComputationGraph>;
}
