//! Error types for graphir-export
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Main error type for GraphIR export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// A dependency cycle was found while walking the source graph
    #[error("Cycle detected: function '{0}' depends on itself")]
    CycleDetected(String),

    /// Function handle does not exist in the source graph
    #[error("Function not found: {0}")]
    FunctionNotFound(String),

    /// Variable handle does not exist in the source graph
    #[error("Variable not found: {0}")]
    VariableNotFound(String),

    /// No root function was given or recorded in the source graph
    #[error("Source graph has no root function")]
    MissingRoot,

    /// Parameter or constant without a value buffer
    #[error("Tensor data missing for variable: {0}")]
    MissingTensorData(String),

    /// Value buffer does not match the declared shape
    #[error("Tensor '{name}' holds {actual} elements, shape {shape:?} requires {expected}")]
    TensorSizeMismatch {
        /// Variable name
        name: String,
        /// Declared shape
        shape: Vec<i64>,
        /// Element count implied by the shape
        expected: usize,
        /// Element count of the buffer
        actual: usize,
    },

    /// Two functions share a uid
    #[error("Duplicate function uid: {0}")]
    DuplicateUid(String),

    /// Source model is malformed
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// GraphIR to framework conversion is not implemented
    #[error("GraphIR import is not available")]
    ImportUnavailable,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Protobuf decode error
    #[error("Protobuf decode error: {0}")]
    ProtoDecode(#[from] prost::DecodeError),

    /// Protobuf encode error
    #[error("Protobuf encode error: {0}")]
    ProtoEncode(#[from] prost::EncodeError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExportError::CycleDetected("PastValue12".to_string());
        assert!(err.to_string().contains("PastValue12"));
    }

    #[test]
    fn test_size_mismatch_display() {
        let err = ExportError::TensorSizeMismatch {
            name: "W".to_string(),
            shape: vec![4, 4],
            expected: 16,
            actual: 15,
        };
        let msg = err.to_string();
        assert!(msg.contains("16"));
        assert!(msg.contains("15"));
    }
}
