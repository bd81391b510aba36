//! Graph assembly
//!
//! Drives the walker with the node encoder and collects the GraphIR document.

use prost::Message;
use tracing::{debug, info, warn};

use crate::encode::{EncodeStats, NodeEncoder};
use crate::error::{ExportError, ExportResult};
use crate::graph::{ComputationGraph, FunctionId};
use crate::io::json::graph_to_json;
use crate::proto::Graph;
use crate::traits::GraphExporter;
use crate::traversal::traverse;

use super::options::ExportOptions;

/// Statistics from one export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Functions visited
    pub nodes: usize,
    /// Input edges emitted
    pub input_edges: usize,
    /// Output edges emitted
    pub output_edges: usize,
    /// Payloads embedded, tensors and node dictionaries
    pub payloads: usize,
    /// Payloads cut by the payload policy
    pub payloads_truncated: usize,
    /// Size of the protobuf encoding in bytes
    pub encoded_size: usize,
}

impl ExportStats {
    fn from_encoder(stats: EncodeStats, encoded_size: usize) -> Self {
        Self {
            nodes: stats.nodes,
            input_edges: stats.input_edges,
            output_edges: stats.output_edges,
            payloads: stats.payloads,
            payloads_truncated: stats.payloads_truncated,
            encoded_size,
        }
    }
}

/// Builds GraphIR documents from source graphs
///
/// # Example
///
/// ```ignore
/// use graphir_export::builder::{ExportOptions, GraphBuilder};
///
/// let builder = GraphBuilder::new(ExportOptions::default().with_model_name("slu"));
/// let (graph, stats) = builder.build_with_stats(&source, root)?;
/// println!("{} nodes, {} bytes", stats.nodes, stats.encoded_size);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    options: ExportOptions,
}

impl GraphBuilder {
    /// Create a builder with options
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export the graph reachable from `root`
    pub fn build(&self, source: &ComputationGraph, root: FunctionId) -> ExportResult<Graph> {
        self.build_with_stats(source, root).map(|(graph, _)| graph)
    }

    /// Export the graph reachable from `root`, with statistics
    pub fn build_with_stats(
        &self,
        source: &ComputationGraph,
        root: FunctionId,
    ) -> ExportResult<(Graph, ExportStats)> {
        let mut graph = Graph {
            graph_info: Some(self.options.graph_info.to_graph_info()),
            nodes: Vec::new(),
        };

        let mut encoder = NodeEncoder::new(source, &self.options);
        let order = traverse(source, root, |_, function| {
            let node = encoder.encode(function)?;
            graph.nodes.push(node);
            Ok(())
        })?;

        let stats = ExportStats::from_encoder(encoder.stats(), graph.encoded_len());

        if stats.payloads_truncated > 0 {
            warn!(
                truncated = stats.payloads_truncated,
                "payloads were truncated, exported tensor data is incomplete"
            );
        }

        if self.options.json_dump {
            self.dump(source, &graph, &order);
        }

        info!(
            nodes = stats.nodes,
            payloads = stats.payloads,
            bytes = stats.encoded_size,
            "graph exported"
        );

        Ok((graph, stats))
    }

    /// Export from the graph's recorded root
    pub fn build_from_root(&self, source: &ComputationGraph) -> ExportResult<Graph> {
        let root = source.root().ok_or(ExportError::MissingRoot)?;
        self.build(source, root)
    }

    fn dump(&self, source: &ComputationGraph, graph: &Graph, order: &[FunctionId]) {
        match graph_to_json(graph, true) {
            Ok(json) => debug!("{}", json),
            Err(e) => warn!("failed to render graph as JSON: {}", e),
        }
        for &id in order {
            if let Ok(f) = source.function(id) {
                debug!(uid = %f.uid, op = %f.op_name, "visited");
            }
        }
    }
}

impl GraphExporter for GraphBuilder {
    fn export(&self, source: &ComputationGraph) -> ExportResult<Graph> {
        self.build_from_root(source)
    }
}

/// Export a source graph from its recorded root
pub fn build_graph(source: &ComputationGraph, options: &ExportOptions) -> ExportResult<Graph> {
    GraphBuilder::new(options.clone()).build_from_root(source)
}
