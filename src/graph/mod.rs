//! Source computation graph
//!
//! This module holds the in-memory model that is exported:
//!
//! - [`ComputationGraph`]: arena of functions and variables with index handles
//! - [`Function`] / [`Variable`]: operations and tensor-valued operands
//! - [`Dictionary`]: ordered, typed attribute maps
//!
//! # Overview
//!
//! A function consumes input variables and produces output variables. An
//! output variable records its producing function, which is how the graph
//! walker follows dependencies from a root function down to the leaves.
//! Parameters and constants carry their values as `ndarray::ArrayD<f32>`.
//!
//! # Example
//!
//! ```ignore
//! use graphir_export::graph::ComputationGraph;
//!
//! let mut graph = ComputationGraph::new();
//! let x = graph.add_input("Input0", "in1", &[4, 4]);
//! let w = graph.add_parameter("Parameter1", "W", &[4, 4], vec![0.0; 16])?;
//!
//! let times = graph
//!     .function_builder("Times")
//!     .inputs(&[x, w])
//!     .output("Output2", "", &[4, 4])
//!     .add()?;
//! graph.set_root(times)?;
//! ```

pub mod context;
pub mod dictionary;
pub mod variable;

// Re-export main types
pub use context::{ComputationGraph, FunctionBuilder};
pub use dictionary::{Dictionary, DictionaryValue};
pub use variable::{Function, FunctionId, Variable, VariableId, VariableKind};
