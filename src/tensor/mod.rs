//! Tensor utilities for GraphIR export
//!
//! This module provides utilities for working with tensors:
//! - Element type tags and widths (`dtype`)
//! - Shape utilities (`shape`)
//!
//! # Example
//!
//! ```ignore
//! use graphir_export::tensor::{checked_numel, ElementType};
//!
//! let count = checked_numel("W", &[4, 4])?;
//! assert_eq!(count * ElementType::Float32.size_in_bytes(), 64);
//! ```

pub mod dtype;
pub mod shape;

// Re-export commonly used items
pub use dtype::{ElementType, FP32_BYTES, FP32_TAG};
pub use shape::{checked_numel, flatten_f32, format_shape, is_dynamic, numel, try_numel, Shape};
