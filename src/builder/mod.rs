//! GraphIR assembly
//!
//! This module owns the output document:
//!
//! - [`GraphBuilder`]: walks a source graph and collects encoded nodes
//! - [`ExportOptions`]: header metadata, payload policy and op rules
//!
//! # Overview
//!
//! The builder writes the header from [`GraphInfoConfig`], walks the source
//! graph from its root in dependency order and appends one node per visited
//! function. Any encoding error aborts the whole build.
//!
//! # Example
//!
//! ```ignore
//! use graphir_export::builder::{build_graph, ExportOptions};
//!
//! let options = ExportOptions::default()
//!     .with_model_name("my-sluhandson.cntk")
//!     .with_framework("cntk", "2.0beta1.0");
//! let graph = build_graph(&source, &options)?;
//! ```

pub mod graph;
pub mod options;

// Re-export main types and functions
pub use graph::{build_graph, ExportStats, GraphBuilder};
pub use options::{
    ExportOptions, GraphInfoConfig, DEFAULT_FRAMEWORK_NAME, DEFAULT_GRAPH_VERSION,
};
