//! Shape utilities for source tensors
//!
//! Functions for working with tensor shapes and dimensions.

use ndarray::ArrayD;
use smallvec::SmallVec;

use crate::error::{ExportError, ExportResult};

/// Dimension list; most tensors have rank 4 or less
pub type Shape = SmallVec<[i64; 4]>;

/// Calculate total number of elements from shape, saturating on overflow
pub fn numel(shape: &[i64]) -> usize {
    try_numel(shape).unwrap_or(usize::MAX)
}

/// Total number of elements, or `None` if the count does not fit in `usize`
pub fn try_numel(shape: &[i64]) -> Option<usize> {
    // empty shape is a scalar
    shape.iter().try_fold(1usize, |acc, &d| {
        let dim = usize::try_from(d.max(0)).ok()?;
        acc.checked_mul(dim)
    })
}

/// Check if shape contains dynamic dimensions (negative values)
pub fn is_dynamic(shape: &[i64]) -> bool {
    shape.iter().any(|&d| d < 0)
}

/// Element count of a shape that must be fully static
pub fn checked_numel(name: &str, shape: &[i64]) -> ExportResult<usize> {
    if is_dynamic(shape) {
        return Err(ExportError::InvalidModel(format!(
            "Tensor '{}' has dynamic shape {:?} but carries data",
            name, shape
        )));
    }
    try_numel(shape).ok_or_else(|| {
        ExportError::InvalidModel(format!(
            "Tensor '{}' has shape {:?} with too many elements",
            name, shape
        ))
    })
}

/// Flatten a tensor value to its elements in logical (row-major) order
pub fn flatten_f32(value: &ArrayD<f32>) -> Vec<f32> {
    match value.as_slice() {
        Some(slice) => slice.to_vec(),
        None => value.iter().copied().collect(),
    }
}

/// Render a shape as `[d0, d1, ...]` for diagnostics
pub fn format_shape(shape: &[i64]) -> String {
    let dims: Vec<String> = shape.iter().map(|d| d.to_string()).collect();
    format!("[{}]", dims.join(", "))
}
