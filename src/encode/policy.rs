//! Per-op encoding rules
//!
//! Some operations need special handling when encoded. The rules live in a
//! lookup table keyed by op tag, so new cases do not touch the encoder.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Op tag of the pure routing node
pub const COMBINE_OP: &str = "Combine";

/// How a node's outputs are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// One edge per output
    #[default]
    Emit,
    /// Outputs alias the inputs and are not emitted
    AliasInputs,
}

/// Table of op-specific rules
///
/// A table read from config is merged onto the default, so listing one op
/// keeps the `Combine` rule. Map `Combine` to `emit` to turn it off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "FxHashMap<String, OutputMode>",
    into = "FxHashMap<String, OutputMode>"
)]
pub struct OpPolicy {
    outputs: FxHashMap<String, OutputMode>,
}

impl From<FxHashMap<String, OutputMode>> for OpPolicy {
    fn from(rules: FxHashMap<String, OutputMode>) -> Self {
        let mut policy = Self::default();
        policy.outputs.extend(rules);
        policy
    }
}

impl From<OpPolicy> for FxHashMap<String, OutputMode> {
    fn from(policy: OpPolicy) -> Self {
        policy.outputs
    }
}

impl Default for OpPolicy {
    fn default() -> Self {
        Self::empty().with_output_mode(COMBINE_OP, OutputMode::AliasInputs)
    }
}

impl OpPolicy {
    /// A table without any rules
    pub fn empty() -> Self {
        Self {
            outputs: FxHashMap::default(),
        }
    }

    /// Set the output mode for an op tag
    pub fn set_output_mode(&mut self, op: &str, mode: OutputMode) {
        self.outputs.insert(op.to_string(), mode);
    }

    /// Builder-style `set_output_mode`
    pub fn with_output_mode(mut self, op: &str, mode: OutputMode) -> Self {
        self.set_output_mode(op, mode);
        self
    }

    /// Output mode for an op tag
    pub fn output_mode(&self, op: &str) -> OutputMode {
        self.outputs.get(op).copied().unwrap_or_default()
    }

    /// Check if outputs of this op are emitted
    pub fn emits_outputs(&self, op: &str) -> bool {
        self.output_mode(op) == OutputMode::Emit
    }
}
