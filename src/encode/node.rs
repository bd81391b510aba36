//! Node encoding
//!
//! Turns one source [`Function`] into one GraphIR [`Node`].

use tracing::{debug, trace, warn};

use crate::builder::ExportOptions;
use crate::error::{ExportError, ExportResult};
use crate::graph::{ComputationGraph, Function, FunctionId, Variable};
use crate::proto::extensions::{make_edge, make_init_arg};
use crate::proto::{Edge, InitArg, Node};
use crate::tensor::{checked_numel, flatten_f32, format_shape, ElementType};

use super::attrs::{encode_dictionary, render_value, NODE_DICTIONARY_KEY};
use super::payload::encode_f32;

/// Counters accumulated while encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Nodes encoded
    pub nodes: usize,
    /// Input edges emitted
    pub input_edges: usize,
    /// Output edges emitted
    pub output_edges: usize,
    /// Payloads embedded, tensors and node dictionaries
    pub payloads: usize,
    /// Payloads cut by the payload policy
    pub payloads_truncated: usize,
    /// Rendered attributes
    pub attributes: usize,
}

/// Unique name of a graph element: `uid/name`, or `uid` when unnamed
pub fn unique_name(uid: &str, name: &str) -> String {
    if name.is_empty() {
        uid.to_string()
    } else {
        format!("{}/{}", uid, name)
    }
}

/// Encodes functions of one source graph
pub struct NodeEncoder<'a> {
    graph: &'a ComputationGraph,
    options: &'a ExportOptions,
    stats: EncodeStats,
}

impl<'a> NodeEncoder<'a> {
    /// Create an encoder over a source graph
    pub fn new(graph: &'a ComputationGraph, options: &'a ExportOptions) -> Self {
        Self {
            graph,
            options,
            stats: EncodeStats::default(),
        }
    }

    /// Counters so far
    pub fn stats(&self) -> EncodeStats {
        self.stats
    }

    /// Encode a function by handle
    pub fn encode_id(&mut self, id: FunctionId) -> ExportResult<Node> {
        let graph = self.graph;
        self.encode(graph.function(id)?)
    }

    /// Encode one function
    pub fn encode(&mut self, function: &Function) -> ExportResult<Node> {
        let graph = self.graph;
        debug!(uid = %function.uid, op = %function.op_name, "encoding node");

        let mut node = Node {
            name: unique_name(&function.uid, &function.name),
            op: function.op_name.clone(),
            ..Default::default()
        };

        for &id in &function.inputs {
            let var = graph.variable(id)?;
            if var.is_placeholder() {
                warn!(uid = %var.uid, node = %node.name, "unbound placeholder input");
            }
            trace!(name = %var.name, shape = %format_shape(&var.shape), "input");
            node.inputs.push(edge_for(var));
        }
        self.stats.input_edges += node.inputs.len();

        // parameters first, then constants, each in input order
        let stored = function
            .inputs
            .iter()
            .map(|&id| graph.variable(id))
            .collect::<ExportResult<Vec<_>>>()?;
        let parameters = stored.iter().filter(|v| v.is_parameter());
        let constants = stored.iter().filter(|v| v.is_constant());
        for var in parameters.chain(constants) {
            let arg = self.encode_tensor(var)?;
            node.init_attrs.insert(unique_name(&var.uid, &var.name), arg);
        }

        if self.options.emit_node_dictionary {
            let payload = encode_dictionary(&function.attributes, self.options.payload)?;
            self.stats.payloads += 1;
            if payload.truncated {
                self.stats.payloads_truncated += 1;
            }
            node.ext_attrs
                .insert(NODE_DICTIONARY_KEY.to_string(), payload.text);
        }

        for (key, value) in function.attributes.iter() {
            node.ext_attrs.insert(key.to_string(), render_value(value));
            self.stats.attributes += 1;
        }

        if self.options.op_policy.emits_outputs(&function.op_name) {
            for &id in &function.outputs {
                let var = graph.variable(id)?;
                trace!(name = %var.name, shape = %format_shape(&var.shape), "output");
                node.outputs.push(edge_for(var));
            }
            self.stats.output_edges += node.outputs.len();
        }

        self.stats.nodes += 1;
        Ok(node)
    }

    fn encode_tensor(&mut self, var: &Variable) -> ExportResult<InitArg> {
        let value = var
            .value
            .as_ref()
            .ok_or_else(|| ExportError::MissingTensorData(var.uid.clone()))?;

        let expected = checked_numel(&var.uid, &var.shape)?;
        if value.len() != expected {
            return Err(ExportError::TensorSizeMismatch {
                name: var.uid.clone(),
                shape: var.shape.to_vec(),
                expected,
                actual: value.len(),
            });
        }

        let payload = encode_f32(&flatten_f32(value), self.options.payload);
        self.stats.payloads += 1;
        if payload.truncated {
            self.stats.payloads_truncated += 1;
        }
        trace!(
            name = %var.name,
            elements = expected,
            encoded_len = payload.original_len,
            "tensor payload"
        );

        Ok(make_init_arg(ElementType::Float32, payload.text))
    }
}

fn edge_for(var: &Variable) -> Edge {
    make_edge(
        &unique_name(&var.uid, &var.name),
        ElementType::Float32,
        &var.shape,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::attrs::UNSUPPORTED_ATTR;
    use crate::encode::payload::{decode_f32, f32_le_bytes, PayloadPolicy};
    use crate::encode::policy::COMBINE_OP;
    use crate::graph::{DictionaryValue, Variable, VariableKind};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    fn weights() -> Vec<f32> {
        (0..16).map(|i| i as f32 * 0.125).collect()
    }

    fn make_times_graph() -> (ComputationGraph, FunctionId) {
        let mut graph = ComputationGraph::new();
        let x = graph.add_input("Input0", "in1", &[4, 4]);
        let w = graph
            .add_parameter("Parameter1", "W", &[4, 4], weights())
            .unwrap();
        let b = graph
            .add_constant("Constant2", "b", &[4], vec![1.0; 4])
            .unwrap();
        let times = graph
            .function_builder("Times")
            .uid("Times3")
            .name("dense")
            .inputs(&[x, w, b])
            .output("Output4", "", &[4, 4])
            .attribute("outputRank", DictionaryValue::SizeT(1))
            .attribute("inferInputRankToMap", DictionaryValue::Int(-1))
            .attribute("axes", DictionaryValue::Shape(vec![0]))
            .add()
            .unwrap();
        (graph, times)
    }

    #[test]
    fn test_unique_name() {
        assert_eq!(unique_name("Parameter1", "W"), "Parameter1/W");
        assert_eq!(unique_name("Output4", ""), "Output4");
    }

    #[test]
    fn test_encode_times_node() {
        let (graph, times) = make_times_graph();
        let options = ExportOptions::default();
        let mut encoder = NodeEncoder::new(&graph, &options);
        let node = encoder.encode_id(times).unwrap();

        assert_eq!(node.name, "Times3/dense");
        assert_eq!(node.op, "Times");
        assert_eq!(node.inputs.len(), 3);
        assert_eq!(node.inputs[0].name, "Input0/in1");
        assert_eq!(node.inputs[0].dtype, "fp32");
        assert_eq!(node.inputs[0].dbytes, 4);
        assert_eq!(node.inputs[0].shape, vec![4, 4]);

        assert_eq!(node.outputs.len(), 1);
        assert_eq!(node.outputs[0].name, "Output4");

        let w = node.get_init_arg("Parameter1/W").unwrap();
        assert_eq!(w.dbytes, 4);
        assert_eq!(
            STANDARD.decode(&w.data_base64).unwrap(),
            f32_le_bytes(&weights())
        );
        let b = node.get_init_arg("Constant2/b").unwrap();
        assert_eq!(decode_f32(&b.data_base64).unwrap(), vec![1.0; 4]);

        assert_eq!(node.get_ext_attr("outputRank"), Some("1"));
        assert_eq!(node.get_ext_attr("inferInputRankToMap"), Some("-1"));
        assert_eq!(node.get_ext_attr("axes"), Some(UNSUPPORTED_ATTR));
        assert!(node.get_ext_attr(NODE_DICTIONARY_KEY).is_none());

        let stats = encoder.stats();
        assert_eq!(stats.nodes, 1);
        assert_eq!(stats.payloads, 2);
        assert_eq!(stats.payloads_truncated, 0);
        assert_eq!(stats.attributes, 3);
    }

    #[test]
    fn test_combine_emits_no_outputs() {
        let mut graph = ComputationGraph::new();
        let x = graph.add_input("Input0", "x", &[3]);
        let y = graph.add_input("Input1", "y", &[3]);
        let combine = graph
            .function_builder(COMBINE_OP)
            .inputs(&[x, y])
            .output("Output2", "", &[3])
            .output("Output3", "", &[3])
            .add()
            .unwrap();

        let options = ExportOptions::default();
        let mut encoder = NodeEncoder::new(&graph, &options);
        let node = encoder.encode_id(combine).unwrap();

        assert_eq!(node.inputs.len(), 2);
        assert!(node.outputs.is_empty());
        assert_eq!(encoder.stats().output_edges, 0);
    }

    #[test]
    fn test_reference_truncation() {
        let (graph, times) = make_times_graph();
        let options = ExportOptions::default().with_payload_policy(PayloadPolicy::reference());
        let mut encoder = NodeEncoder::new(&graph, &options);
        let node = encoder.encode_id(times).unwrap();

        // 16 floats = 64 bytes = 88 characters, under the limit
        let w = node.get_init_arg("Parameter1/W").unwrap();
        assert_eq!(w.data_base64.len(), 88);
        assert_eq!(encoder.stats().payloads_truncated, 0);
    }

    #[test]
    fn test_large_parameter_truncated_under_reference() {
        let mut graph = ComputationGraph::new();
        let x = graph.add_input("Input0", "x", &[8]);
        let w = graph
            .add_parameter("Parameter1", "W", &[8, 8], vec![0.5; 64])
            .unwrap();
        let f = graph
            .function_builder("Times")
            .inputs(&[w, x])
            .output("Output2", "", &[8])
            .add()
            .unwrap();

        let options = ExportOptions::default().with_payload_policy(PayloadPolicy::reference());
        let mut encoder = NodeEncoder::new(&graph, &options);
        let node = encoder.encode_id(f).unwrap();
        let data = &node.get_init_arg("Parameter1/W").unwrap().data_base64;
        assert_eq!(data.len(), 93);
        assert!(data.ends_with("..."));
        assert_eq!(encoder.stats().payloads_truncated, 1);

        let options = ExportOptions::default();
        let node = NodeEncoder::new(&graph, &options).encode_id(f).unwrap();
        let data = &node.get_init_arg("Parameter1/W").unwrap().data_base64;
        assert_eq!(decode_f32(data).unwrap(), vec![0.5; 64]);
    }

    #[test]
    fn test_scalar_parameter() {
        let mut graph = ComputationGraph::new();
        let s = graph.add_constant("Constant0", "", &[], vec![3.0]).unwrap();
        let f = graph
            .function_builder("ElementTimes")
            .input(s)
            .output("Output1", "", &[])
            .add()
            .unwrap();

        let options = ExportOptions::default();
        let node = NodeEncoder::new(&graph, &options).encode_id(f).unwrap();
        assert!(node.inputs[0].shape.is_empty());
        let c = node.get_init_arg("Constant0").unwrap();
        assert_eq!(decode_f32(&c.data_base64).unwrap(), vec![3.0]);
    }

    #[test]
    fn test_missing_tensor_data_is_fatal() {
        let mut graph = ComputationGraph::new();
        let w = graph.add_variable(Variable::new(
            "Parameter0",
            "W",
            VariableKind::Parameter,
            &[2, 2],
        ));
        let f = graph
            .function_builder("Times")
            .input(w)
            .output("Output1", "", &[2])
            .add()
            .unwrap();

        let options = ExportOptions::default();
        let result = NodeEncoder::new(&graph, &options).encode_id(f);
        assert!(matches!(result, Err(ExportError::MissingTensorData(_))));
    }

    #[test]
    fn test_node_dictionary_attr() {
        let (graph, times) = make_times_graph();
        let options = ExportOptions::default().with_node_dictionary(true);
        let node = NodeEncoder::new(&graph, &options).encode_id(times).unwrap();

        let encoded = node.get_ext_attr(NODE_DICTIONARY_KEY).unwrap();
        let json = STANDARD.decode(encoded).unwrap();
        let dict: crate::graph::Dictionary = serde_json::from_slice(&json).unwrap();
        assert_eq!(dict.get("outputRank"), Some(&DictionaryValue::SizeT(1)));
    }

    #[test]
    fn test_dictionary_payload_counted() {
        let mut graph = ComputationGraph::new();
        let x = graph.add_input("Input0", "x", &[2]);
        let attributes = (0..20).fold(crate::graph::Dictionary::new(), |d, i| {
            d.with(format!("key{}", i), DictionaryValue::Int(i))
        });
        let f = graph
            .function_builder("Tanh")
            .input(x)
            .output("Output1", "", &[2])
            .attributes(attributes)
            .add()
            .unwrap();

        let options = ExportOptions::default()
            .with_node_dictionary(true)
            .with_payload_policy(PayloadPolicy::reference());
        let mut encoder = NodeEncoder::new(&graph, &options);
        encoder.encode_id(f).unwrap();

        let stats = encoder.stats();
        assert_eq!(stats.payloads, 1);
        assert_eq!(stats.payloads_truncated, 1);
        assert!(stats.payloads_truncated <= stats.payloads);
    }

    #[test]
    fn test_placeholder_still_emitted() {
        let mut graph = ComputationGraph::new();
        let p = graph.add_placeholder("Placeholder0", "", &[5]);
        let f = graph
            .function_builder("Tanh")
            .input(p)
            .output("Output1", "", &[5])
            .add()
            .unwrap();

        let options = ExportOptions::default();
        let node = NodeEncoder::new(&graph, &options).encode_id(f).unwrap();
        assert_eq!(node.inputs[0].name, "Placeholder0");
        assert_eq!(node.inputs[0].shape, vec![5]);
    }
}
