//! GraphIR I/O module
//!
//! This module provides functions for loading source models and for saving
//! and loading GraphIR documents.
//!
//! # Example
//!
//! ```ignore
//! use graphir_export::io::{export_file, load_graph, save_graph_json};
//!
//! // One-shot export
//! let stats = export_file("slu.model.json", "slu.graphir", Default::default())?;
//! println!("Exported {} nodes", stats.nodes);
//!
//! // Inspect the result
//! let graph = load_graph("slu.graphir")?;
//! save_graph_json(&graph, "slu.graphir.json")?;
//! ```

pub mod json;
pub mod reader;
pub mod writer;

// Re-exports
pub use json::{graph_from_json, graph_to_json, save_graph_json};
pub use reader::{
    load_graph, load_graph_from_bytes, load_source_model, source_model_from_json,
    ModelDescription,
};
pub use writer::{graph_size, graph_to_bytes, save_graph, save_graph_with_stats, SaveStats};

use std::path::Path;

use crate::builder::{ExportOptions, ExportStats, GraphBuilder};
use crate::error::{ExportError, ExportResult};
use crate::graph::ComputationGraph;
use crate::proto::Graph;

/// Export a source model in memory
pub fn export_model(
    source: &ComputationGraph,
    options: &ExportOptions,
) -> ExportResult<(Graph, ExportStats)> {
    let root = source.root().ok_or(ExportError::MissingRoot)?;
    GraphBuilder::new(options.clone()).build_with_stats(source, root)
}

/// Export a model description file to a GraphIR file
///
/// This is the main entry point for file-based export.
///
/// # Example
///
/// ```ignore
/// use graphir_export::io::export_file;
/// use graphir_export::builder::ExportOptions;
///
/// let options = ExportOptions::default().with_model_name("slu");
/// let stats = export_file("slu.model.json", "slu.graphir", options)?;
/// println!("{} payloads, {} bytes", stats.payloads, stats.encoded_size);
/// ```
pub fn export_file<P1: AsRef<Path>, P2: AsRef<Path>>(
    input: P1,
    output: P2,
    options: ExportOptions,
) -> ExportResult<ExportStats> {
    let source = load_source_model(input)?;
    let (graph, stats) = export_model(&source, &options)?;
    save_graph(&graph, output)?;
    Ok(stats)
}
