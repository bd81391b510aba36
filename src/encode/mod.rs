//! GraphIR encoding
//!
//! This module turns source functions into GraphIR records:
//!
//! - [`node`]: one [`Function`](crate::graph::Function) to one [`Node`](crate::proto::Node)
//! - [`payload`]: base64 tensor payloads and the [`PayloadPolicy`]
//! - [`attrs`]: attribute rendering
//! - [`policy`]: per-op rules such as `Combine` output aliasing
//!
//! # Example
//!
//! ```ignore
//! use graphir_export::encode::{NodeEncoder, PayloadPolicy};
//! use graphir_export::builder::ExportOptions;
//!
//! let options = ExportOptions::default().with_payload_policy(PayloadPolicy::reference());
//! let mut encoder = NodeEncoder::new(&graph, &options);
//! let node = encoder.encode_id(times)?;
//! println!("{} truncated payloads", encoder.stats().payloads_truncated);
//! ```

pub mod attrs;
pub mod node;
pub mod payload;
pub mod policy;

// Re-export main types and functions
pub use attrs::{encode_dictionary, render_value, NODE_DICTIONARY_KEY, UNSUPPORTED_ATTR};
pub use node::{unique_name, EncodeStats, NodeEncoder};
pub use payload::{
    decode_f32, encode_bytes, encode_f32, encoded_len, EncodedPayload, PayloadPolicy,
    TRUNCATION_MARKER,
};
pub use policy::{OpPolicy, OutputMode, COMBINE_OP};
