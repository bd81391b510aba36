//! Model and GraphIR readers
//!
//! Load source models from JSON descriptions and GraphIR documents from
//! protobuf bytes.
//!
//! # Model description format
//!
//! ```json
//! {
//!   "root": "Times3",
//!   "variables": [
//!     { "uid": "Input0", "name": "in1", "kind": "input", "shape": [4, 4] },
//!     { "uid": "Parameter1", "name": "W", "kind": "parameter", "shape": [4, 4],
//!       "value": [0.0, 0.1, ...] }
//!   ],
//!   "functions": [
//!     { "uid": "Times3", "name": "", "op": "Times",
//!       "inputs": ["Parameter1", "Input0"],
//!       "outputs": [{ "uid": "Output4", "shape": [4, 4] }],
//!       "attributes": { "outputRank": { "type": "size_t", "value": 1 } } }
//!   ]
//! }
//! ```
//!
//! Function inputs name either a free variable or an output of any
//! function, so definition order does not matter.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use prost::Message;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::graph::context::make_value;
use crate::graph::{
    ComputationGraph, Dictionary, Function, FunctionId, Variable, VariableId, VariableKind,
};
use crate::proto::Graph;
use crate::tensor::Shape;

/// Kind of a free (not function-produced) variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKindDesc {
    /// Graph input
    Input,
    /// Learned parameter
    Parameter,
    /// Constant
    Constant,
    /// Placeholder
    Placeholder,
}

/// Free variable in a model description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableDesc {
    /// Unique identifier
    pub uid: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Role
    pub kind: VariableKindDesc,
    /// Dimensions
    #[serde(default)]
    pub shape: Vec<i64>,
    /// Flattened row-major values
    #[serde(default)]
    pub value: Option<Vec<f32>>,
}

/// Function result in a model description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDesc {
    /// Unique identifier
    pub uid: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Dimensions
    #[serde(default)]
    pub shape: Vec<i64>,
}

/// Function in a model description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDesc {
    /// Unique identifier
    pub uid: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Op tag
    pub op: String,
    /// Operand uids in order
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Results
    #[serde(default)]
    pub outputs: Vec<OutputDesc>,
    /// Attributes
    #[serde(default)]
    pub attributes: Dictionary,
}

/// JSON description of a source model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDescription {
    /// Uid of the root function; the last function when absent
    #[serde(default)]
    pub root: Option<String>,
    /// Free variables
    #[serde(default)]
    pub variables: Vec<VariableDesc>,
    /// Functions
    #[serde(default)]
    pub functions: Vec<FunctionDesc>,
}

impl ModelDescription {
    /// Build the in-memory graph
    pub fn into_graph(self) -> ExportResult<ComputationGraph> {
        let mut graph = ComputationGraph::new();
        let mut by_uid: FxHashMap<String, VariableId> = FxHashMap::default();

        for desc in self.variables {
            let kind = match desc.kind {
                VariableKindDesc::Input => VariableKind::Input,
                VariableKindDesc::Parameter => VariableKind::Parameter,
                VariableKindDesc::Constant => VariableKind::Constant,
                VariableKindDesc::Placeholder => VariableKind::Placeholder,
            };
            let value = desc
                .value
                .map(|data| make_value(&desc.uid, &desc.shape, data))
                .transpose()?;
            let uid = desc.uid.clone();
            let id = graph.add_variable(Variable {
                uid: desc.uid,
                name: desc.name,
                kind,
                shape: Shape::from_vec(desc.shape),
                value,
            });
            insert_unique(&mut by_uid, uid, id)?;
        }

        // outputs first, so inputs can reference functions defined later
        let base = graph.next_function_id().0;
        let mut outputs = Vec::with_capacity(self.functions.len());
        for (i, desc) in self.functions.iter().enumerate() {
            let owner = FunctionId(base + i);
            let mut ids = Vec::with_capacity(desc.outputs.len());
            for out in &desc.outputs {
                let id = graph.add_variable(Variable::new(
                    &out.uid,
                    &out.name,
                    VariableKind::Output { owner },
                    &out.shape,
                ));
                insert_unique(&mut by_uid, out.uid.clone(), id)?;
                ids.push(id);
            }
            outputs.push(ids);
        }

        let mut last = None;
        for (desc, outputs) in self.functions.into_iter().zip(outputs) {
            let inputs = desc
                .inputs
                .iter()
                .map(|uid| {
                    by_uid.get(uid).copied().ok_or_else(|| {
                        ExportError::VariableNotFound(format!("{} (input of {})", uid, desc.uid))
                    })
                })
                .collect::<ExportResult<Vec<_>>>()?;

            last = Some(graph.push_function(Function {
                uid: desc.uid,
                name: desc.name,
                op_name: desc.op,
                inputs,
                outputs,
                attributes: desc.attributes,
            })?);
        }

        let root = match self.root {
            Some(uid) => Some(
                graph
                    .function_by_uid(&uid)
                    .ok_or_else(|| ExportError::FunctionNotFound(uid))?,
            ),
            None => last,
        };
        if let Some(root) = root {
            graph.set_root(root)?;
        }

        graph.validate()?;
        Ok(graph)
    }
}

fn insert_unique(
    map: &mut FxHashMap<String, VariableId>,
    uid: String,
    id: VariableId,
) -> ExportResult<()> {
    if map.contains_key(&uid) {
        return Err(ExportError::InvalidModel(format!(
            "Duplicate variable uid: {}",
            uid
        )));
    }
    map.insert(uid, id);
    Ok(())
}

/// Parse a source model from a JSON description
pub fn source_model_from_json(json: &str) -> ExportResult<ComputationGraph> {
    let desc: ModelDescription = serde_json::from_str(json)?;
    desc.into_graph()
}

/// Load a source model from a JSON description file
///
/// # Example
///
/// ```ignore
/// use graphir_export::io::load_source_model;
///
/// let model = load_source_model("slu.model.json")?;
/// println!("{} functions", model.function_count());
/// ```
pub fn load_source_model<P: AsRef<Path>>(path: P) -> ExportResult<ComputationGraph> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        ExportError::InvalidModel(format!("Failed to open file '{}': {}", path.display(), e))
    })?;

    let desc: ModelDescription = serde_json::from_reader(BufReader::new(file))?;
    desc.into_graph()
}

/// Load a GraphIR document from a file path
pub fn load_graph<P: AsRef<Path>>(path: P) -> ExportResult<Graph> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| {
        ExportError::InvalidModel(format!("Failed to open file '{}': {}", path.display(), e))
    })?;

    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();

    reader.read_to_end(&mut buffer).map_err(|e| {
        ExportError::InvalidModel(format!("Failed to read file '{}': {}", path.display(), e))
    })?;

    load_graph_from_bytes(&buffer)
}

/// Decode a GraphIR document from bytes
pub fn load_graph_from_bytes(bytes: &[u8]) -> ExportResult<Graph> {
    Ok(Graph::decode(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMES_MODEL: &str = r#"{
        "root": "Times3",
        "variables": [
            { "uid": "Input0", "name": "in1", "kind": "input", "shape": [4, 4] },
            { "uid": "Parameter1", "name": "W", "kind": "parameter", "shape": [2, 2],
              "value": [1.0, 2.0, 3.0, 4.0] }
        ],
        "functions": [
            { "uid": "Times3", "op": "Times",
              "inputs": ["Parameter1", "Input0"],
              "outputs": [{ "uid": "Output4", "shape": [4, 4] }],
              "attributes": { "outputRank": { "type": "size_t", "value": 1 } } }
        ]
    }"#;

    #[test]
    fn test_load_description() {
        let graph = source_model_from_json(TIMES_MODEL).unwrap();
        assert_eq!(graph.function_count(), 1);
        assert_eq!(graph.variable_count(), 3);

        let root = graph.root().unwrap();
        let f = graph.function(root).unwrap();
        assert_eq!(f.op_name, "Times");
        assert_eq!(f.inputs.len(), 2);
        assert_eq!(graph.parameters_of(root).unwrap()[0].name, "W");
    }

    #[test]
    fn test_forward_reference() {
        let json = r#"{
            "variables": [{ "uid": "x", "kind": "input", "shape": [2] }],
            "functions": [
                { "uid": "top", "op": "ReLU", "inputs": ["mid_out"],
                  "outputs": [{ "uid": "top_out", "shape": [2] }] },
                { "uid": "mid", "op": "Tanh", "inputs": ["x"],
                  "outputs": [{ "uid": "mid_out", "shape": [2] }] }
            ],
            "root": "top"
        }"#;
        let graph = source_model_from_json(json).unwrap();
        let top = graph.function_by_uid("top").unwrap();
        let mid = graph.function_by_uid("mid").unwrap();
        let input = graph.function(top).unwrap().inputs[0];
        assert_eq!(graph.variable(input).unwrap().owner(), Some(mid));
    }

    #[test]
    fn test_default_root_is_last_function() {
        let json = r#"{
            "functions": [
                { "uid": "a", "op": "Tanh" },
                { "uid": "b", "op": "Tanh" }
            ]
        }"#;
        let graph = source_model_from_json(json).unwrap();
        assert_eq!(graph.root(), graph.function_by_uid("b"));
    }

    #[test]
    fn test_unknown_input_rejected() {
        let json = r#"{ "functions": [{ "uid": "a", "op": "Tanh", "inputs": ["nope"] }] }"#;
        assert!(matches!(
            source_model_from_json(json),
            Err(ExportError::VariableNotFound(_))
        ));
    }

    #[test]
    fn test_value_size_checked() {
        let json = r#"{ "variables": [
            { "uid": "w", "kind": "constant", "shape": [3], "value": [1.0] }
        ] }"#;
        assert!(matches!(
            source_model_from_json(json),
            Err(ExportError::TensorSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_oversized_shape_rejected() {
        let json = r#"{ "variables": [
            { "uid": "w", "kind": "parameter", "shape": [4294967296, 4294967296], "value": [] }
        ] }"#;
        assert!(matches!(
            source_model_from_json(json),
            Err(ExportError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_duplicate_uids_rejected() {
        let json = r#"{ "variables": [
            { "uid": "x", "kind": "input" },
            { "uid": "x", "kind": "input" }
        ] }"#;
        assert!(source_model_from_json(json).is_err());

        let json = r#"{ "functions": [
            { "uid": "f", "op": "Tanh" },
            { "uid": "f", "op": "Tanh" }
        ] }"#;
        assert!(matches!(
            source_model_from_json(json),
            Err(ExportError::DuplicateUid(_))
        ));
    }

    #[test]
    fn test_load_invalid_bytes() {
        assert!(load_graph_from_bytes(&[0xFF, 0xFF, 0xFF]).is_err());
    }

    #[test]
    fn test_load_source_model_file() {
        let path = std::env::temp_dir().join(format!("graphir_model_{}.json", std::process::id()));
        std::fs::write(&path, TIMES_MODEL).unwrap();

        let graph = load_source_model(&path).unwrap();
        assert_eq!(graph.function_count(), 1);

        std::fs::remove_file(&path).ok();
    }
}
