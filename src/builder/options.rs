//! Export configuration

use serde::{Deserialize, Serialize};

use crate::encode::{OpPolicy, PayloadPolicy};
use crate::proto::GraphInfo;

/// Default framework name written to the GraphIR header
pub const DEFAULT_FRAMEWORK_NAME: &str = "graphir-export";

/// Default GraphIR document version
pub const DEFAULT_GRAPH_VERSION: &str = "1.0";

/// Header metadata written to every exported graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphInfoConfig {
    /// Free-text description
    pub description: String,
    /// Producing framework name
    pub framework_name: String,
    /// Producing framework version
    pub framework_version: String,
    /// Document format version
    pub graph_version: String,
    /// Model name
    pub model_name: String,
}

impl Default for GraphInfoConfig {
    fn default() -> Self {
        Self {
            description: String::new(),
            framework_name: DEFAULT_FRAMEWORK_NAME.to_string(),
            framework_version: crate::VERSION.to_string(),
            graph_version: DEFAULT_GRAPH_VERSION.to_string(),
            model_name: String::new(),
        }
    }
}

impl GraphInfoConfig {
    /// Header message for this configuration
    pub fn to_graph_info(&self) -> GraphInfo {
        GraphInfo {
            description: self.description.clone(),
            framework_name: self.framework_name.clone(),
            framework_version: self.framework_version.clone(),
            graph_version: self.graph_version.clone(),
            model_name: self.model_name.clone(),
        }
    }
}

/// Export options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Header metadata
    pub graph_info: GraphInfoConfig,
    /// Payload truncation policy
    pub payload: PayloadPolicy,
    /// Embed each node's serialized attribute dictionary
    pub emit_node_dictionary: bool,
    /// Log the JSON rendering of the finished graph
    pub json_dump: bool,
    /// Per-op encoding rules
    pub op_policy: OpPolicy,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            graph_info: GraphInfoConfig::default(),
            payload: PayloadPolicy::Full,
            emit_node_dictionary: false,
            json_dump: false,
            op_policy: OpPolicy::default(),
        }
    }
}

impl ExportOptions {
    /// Parse options from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> crate::error::ExportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the header metadata
    pub fn with_graph_info(mut self, info: GraphInfoConfig) -> Self {
        self.graph_info = info;
        self
    }

    /// Set the model name
    pub fn with_model_name(mut self, name: &str) -> Self {
        self.graph_info.model_name = name.to_string();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: &str) -> Self {
        self.graph_info.description = description.to_string();
        self
    }

    /// Set the producing framework
    pub fn with_framework(mut self, name: &str, version: &str) -> Self {
        self.graph_info.framework_name = name.to_string();
        self.graph_info.framework_version = version.to_string();
        self
    }

    /// Set the payload policy
    pub fn with_payload_policy(mut self, policy: PayloadPolicy) -> Self {
        self.payload = policy;
        self
    }

    /// Enable or disable the node dictionary attribute
    pub fn with_node_dictionary(mut self, enable: bool) -> Self {
        self.emit_node_dictionary = enable;
        self
    }

    /// Enable or disable the JSON dump
    pub fn with_json_dump(mut self, enable: bool) -> Self {
        self.json_dump = enable;
        self
    }

    /// Replace the per-op rules
    pub fn with_op_policy(mut self, policy: OpPolicy) -> Self {
        self.op_policy = policy;
        self
    }
}
