//! Tensor payload encoding
//!
//! Tensor values are embedded in GraphIR as padded standard base64 of their
//! little-endian element bytes. A [`PayloadPolicy`] decides whether long
//! payloads are kept whole or cut down for debugging dumps.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Suffix appended to a truncated payload
pub const TRUNCATION_MARKER: &str = "...";

/// Encoded length above which the reference debug policy truncates
pub const REFERENCE_LIMIT: usize = 100;

/// Characters kept by the reference debug policy
pub const REFERENCE_KEEP: usize = 90;

/// What to do with long encoded payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PayloadPolicy {
    /// Embed the complete encoding
    #[default]
    Full,
    /// Keep `keep` characters plus the marker once the encoding exceeds `limit`
    ///
    /// `keep` is capped at `limit`.
    Truncate {
        /// Longest encoding left untouched
        limit: usize,
        /// Characters kept before the marker
        keep: usize,
    },
}

impl PayloadPolicy {
    /// The lossy debug policy: more than 100 characters become 90 plus `...`
    pub fn reference() -> Self {
        PayloadPolicy::Truncate {
            limit: REFERENCE_LIMIT,
            keep: REFERENCE_KEEP,
        }
    }

    /// Check if this policy can lose data
    pub fn is_lossy(&self) -> bool {
        matches!(self, PayloadPolicy::Truncate { .. })
    }

    /// Apply the policy to a finished encoding
    pub fn apply(&self, mut text: String) -> EncodedPayload {
        let original_len = text.len();
        match *self {
            PayloadPolicy::Truncate { limit, keep } if original_len > limit => {
                // base64 output is ASCII, any index is a char boundary
                text.truncate(keep.min(limit));
                text.push_str(TRUNCATION_MARKER);
                debug!(original_len, kept = text.len(), "payload truncated");
                EncodedPayload {
                    text,
                    truncated: true,
                    original_len,
                }
            }
            _ => EncodedPayload {
                text,
                truncated: false,
                original_len,
            },
        }
    }
}

/// Result of encoding one payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    /// Text to embed
    pub text: String,
    /// Whether data was dropped
    pub truncated: bool,
    /// Length of the complete encoding
    pub original_len: usize,
}

/// Length of the padded base64 encoding of `byte_len` bytes
pub fn encoded_len(byte_len: usize) -> usize {
    byte_len.div_ceil(3) * 4
}

/// Encode raw bytes under a policy
pub fn encode_bytes(bytes: &[u8], policy: PayloadPolicy) -> EncodedPayload {
    let mut text = String::with_capacity(encoded_len(bytes.len()));
    STANDARD.encode_string(bytes, &mut text);
    policy.apply(text)
}

/// Little-endian bytes of a float buffer
pub fn f32_le_bytes(values: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * 4);
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Encode a float buffer under a policy
pub fn encode_f32(values: &[f32], policy: PayloadPolicy) -> EncodedPayload {
    encode_bytes(&f32_le_bytes(values), policy)
}

/// Decode an untruncated payload back to floats
///
/// Returns `None` for truncated or malformed text.
pub fn decode_f32(text: &str) -> Option<Vec<f32>> {
    if text.ends_with(TRUNCATION_MARKER) {
        return None;
    }
    let bytes = STANDARD.decode(text).ok()?;
    if bytes.len() % 4 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}
