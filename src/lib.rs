//! # GraphIR Export
//!
//! Export trained computation graphs to GraphIR, a protobuf interchange
//! format for external execution backends such as FPGA accelerators.
//!
//! This crate walks a source graph from its root function in dependency
//! order and encodes every reachable function as a GraphIR node: op tag,
//! input and output tensor shapes, scalar attributes, and parameter or
//! constant tensors embedded as base64.
//!
//! ## Features
//!
//! - **Traversal**: visit-once, pre-order walk with cycle detection
//! - **Encoding**: fp32 edges, base64 payloads with an explicit truncation policy
//! - **Assembly**: configurable header metadata, protobuf and JSON output
//!
//! ## Example
//!
//! ```ignore
//! use graphir_export::prelude::*;
//!
//! let source = load_source_model("slu.model.json")?;
//! let graph = build_graph(&source, &ExportOptions::default())?;
//! save_graph(&graph, "slu.graphir")?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// ============================================================================
// Module declarations
// ============================================================================

pub mod builder;
pub mod encode;
pub mod error;
pub mod graph;
pub mod import;
pub mod io;
pub mod proto;
pub mod tensor;
pub mod traits;
pub mod traversal;

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Prelude module - import commonly used types with `use graphir_export::prelude::*`
pub mod prelude {
    pub use crate::builder::{
        build_graph, ExportOptions, ExportStats, GraphBuilder, GraphInfoConfig,
    };
    pub use crate::encode::{NodeEncoder, OpPolicy, OutputMode, PayloadPolicy};
    pub use crate::error::{ExportError, ExportResult};
    pub use crate::graph::{
        ComputationGraph, Dictionary, DictionaryValue, FunctionId, VariableId, VariableKind,
    };
    pub use crate::import::{graph_ir_to_model, UnsupportedImporter};
    pub use crate::io::{
        export_file, export_model, graph_to_json, load_graph, load_source_model, save_graph,
        save_graph_json,
    };
    pub use crate::proto::graph_ir::*;
    pub use crate::traits::{GraphExporter, GraphImporter};
    pub use crate::traversal::traverse;
}

// ============================================================================
// Crate-level re-exports
// ============================================================================

pub use error::{ExportError, ExportResult};
pub use traits::{GraphExporter, GraphImporter};

// ============================================================================
// Version information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
