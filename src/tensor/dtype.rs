//! Element type tags
//!
//! GraphIR records every tensor with a string datatype tag and a byte width.
//! Only 32-bit floats are exported.

use serde::{Deserialize, Serialize};

/// Datatype tag for 32-bit floats
pub const FP32_TAG: &str = "fp32";

/// Byte width of a 32-bit float
pub const FP32_BYTES: usize = 4;

/// Element types understood by the exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// IEEE-754 single precision
    #[default]
    Float32,
}

impl ElementType {
    /// GraphIR datatype tag
    pub fn tag(self) -> &'static str {
        match self {
            ElementType::Float32 => FP32_TAG,
        }
    }

    /// Size in bytes of one element
    pub fn size_in_bytes(self) -> usize {
        match self {
            ElementType::Float32 => FP32_BYTES,
        }
    }

    /// Parse a datatype tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            FP32_TAG => Some(ElementType::Float32),
            _ => None,
        }
    }
}
