//! Source computation graph
//!
//! `ComputationGraph` is an arena of functions and variables. Handles are
//! plain indices, so identity never depends on addresses and the graph can
//! be shared immutably while it is exported.

use ndarray::{ArrayD, IxDyn};
use rustc_hash::FxHashMap;

use crate::error::{ExportError, ExportResult};
use crate::tensor::{checked_numel, Shape};

use super::dictionary::{Dictionary, DictionaryValue};
use super::variable::{Function, FunctionId, Variable, VariableId, VariableKind};

/// Arena-backed computation graph
#[derive(Debug, Clone, Default)]
pub struct ComputationGraph {
    functions: Vec<Function>,
    variables: Vec<Variable>,
    uid_index: FxHashMap<String, FunctionId>,
    root: Option<FunctionId>,
}

impl ComputationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get a function by handle
    pub fn function(&self, id: FunctionId) -> ExportResult<&Function> {
        self.functions
            .get(id.0)
            .ok_or_else(|| ExportError::FunctionNotFound(id.to_string()))
    }

    /// Get a variable by handle
    pub fn variable(&self, id: VariableId) -> ExportResult<&Variable> {
        self.variables
            .get(id.0)
            .ok_or_else(|| ExportError::VariableNotFound(id.to_string()))
    }

    /// Find a function by uid
    pub fn function_by_uid(&self, uid: &str) -> Option<FunctionId> {
        self.uid_index.get(uid).copied()
    }

    /// Root function, if recorded
    pub fn root(&self) -> Option<FunctionId> {
        self.root
    }

    /// Record the root function
    pub fn set_root(&mut self, id: FunctionId) -> ExportResult<()> {
        self.function(id)?;
        self.root = Some(id);
        Ok(())
    }

    /// Number of functions
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Number of variables
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Iterate all functions with their handles
    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &Function)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, f)| (FunctionId(i), f))
    }

    /// Input variables of a function, in declared order
    pub fn inputs_of(&self, id: FunctionId) -> ExportResult<Vec<&Variable>> {
        self.function(id)?
            .inputs
            .iter()
            .map(|&v| self.variable(v))
            .collect()
    }

    /// Output variables of a function, in declared order
    pub fn outputs_of(&self, id: FunctionId) -> ExportResult<Vec<&Variable>> {
        self.function(id)?
            .outputs
            .iter()
            .map(|&v| self.variable(v))
            .collect()
    }

    /// Parameter inputs of a function
    pub fn parameters_of(&self, id: FunctionId) -> ExportResult<Vec<&Variable>> {
        Ok(self
            .inputs_of(id)?
            .into_iter()
            .filter(|v| v.is_parameter())
            .collect())
    }

    /// Constant inputs of a function
    pub fn constants_of(&self, id: FunctionId) -> ExportResult<Vec<&Variable>> {
        Ok(self
            .inputs_of(id)?
            .into_iter()
            .filter(|v| v.is_constant())
            .collect())
    }

    /// Placeholder inputs of a function
    pub fn placeholders_of(&self, id: FunctionId) -> ExportResult<Vec<&Variable>> {
        Ok(self
            .inputs_of(id)?
            .into_iter()
            .filter(|v| v.is_placeholder())
            .collect())
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Add a variable and return its handle
    pub fn add_variable(&mut self, variable: Variable) -> VariableId {
        self.variables.push(variable);
        VariableId(self.variables.len() - 1)
    }

    /// Add a graph input
    pub fn add_input(&mut self, uid: &str, name: &str, shape: &[i64]) -> VariableId {
        self.add_variable(Variable::new(uid, name, VariableKind::Input, shape))
    }

    /// Add a placeholder
    pub fn add_placeholder(&mut self, uid: &str, name: &str, shape: &[i64]) -> VariableId {
        self.add_variable(Variable::new(uid, name, VariableKind::Placeholder, shape))
    }

    /// Add a parameter with stored values
    pub fn add_parameter(
        &mut self,
        uid: &str,
        name: &str,
        shape: &[i64],
        data: Vec<f32>,
    ) -> ExportResult<VariableId> {
        self.add_stored(uid, name, VariableKind::Parameter, shape, data)
    }

    /// Add a constant with stored values
    pub fn add_constant(
        &mut self,
        uid: &str,
        name: &str,
        shape: &[i64],
        data: Vec<f32>,
    ) -> ExportResult<VariableId> {
        self.add_stored(uid, name, VariableKind::Constant, shape, data)
    }

    fn add_stored(
        &mut self,
        uid: &str,
        name: &str,
        kind: VariableKind,
        shape: &[i64],
        data: Vec<f32>,
    ) -> ExportResult<VariableId> {
        let value = make_value(uid, shape, data)?;
        Ok(self.add_variable(Variable::new(uid, name, kind, shape).with_value(value)))
    }

    /// Start building a function with the given op tag
    pub fn function_builder(&mut self, op_name: &str) -> FunctionBuilder<'_> {
        FunctionBuilder::new(self, op_name)
    }

    /// Add a fully formed function
    ///
    /// Input and output handles must already exist. Use this when output
    /// variables were created up front with a known owner handle.
    pub fn push_function(&mut self, function: Function) -> ExportResult<FunctionId> {
        if self.uid_index.contains_key(&function.uid) {
            return Err(ExportError::DuplicateUid(function.uid));
        }
        for &v in function.inputs.iter().chain(function.outputs.iter()) {
            self.variable(v)?;
        }

        let id = FunctionId(self.functions.len());
        self.uid_index.insert(function.uid.clone(), id);
        self.functions.push(function);
        Ok(id)
    }

    /// Handle the next pushed function will receive
    pub fn next_function_id(&self) -> FunctionId {
        FunctionId(self.functions.len())
    }

    /// Append an operand to an existing function
    ///
    /// This is how recurrent loops are closed after both ends exist.
    pub fn connect_input(&mut self, function: FunctionId, input: VariableId) -> ExportResult<()> {
        self.variable(input)?;
        let f = self
            .functions
            .get_mut(function.0)
            .ok_or_else(|| ExportError::FunctionNotFound(function.to_string()))?;
        f.inputs.push(input);
        Ok(())
    }

    /// Check structural consistency
    ///
    /// Every output variable must name an existing owner that lists it among
    /// its outputs, and every stored value must match its shape.
    pub fn validate(&self) -> ExportResult<()> {
        for (i, var) in self.variables.iter().enumerate() {
            if let Some(owner) = var.owner() {
                let f = self.function(owner).map_err(|_| {
                    ExportError::InvalidModel(format!(
                        "Variable '{}' is owned by missing function {}",
                        var.uid, owner
                    ))
                })?;
                if !f.outputs.contains(&VariableId(i)) {
                    return Err(ExportError::InvalidModel(format!(
                        "Variable '{}' is not an output of its owner '{}'",
                        var.uid, f.uid
                    )));
                }
            }
            if let Some(value) = &var.value {
                let expected = checked_numel(&var.uid, &var.shape)?;
                if value.len() != expected {
                    return Err(ExportError::TensorSizeMismatch {
                        name: var.uid.clone(),
                        shape: var.shape.to_vec(),
                        expected,
                        actual: value.len(),
                    });
                }
            }
        }
        if let Some(root) = self.root {
            self.function(root)?;
        }
        Ok(())
    }
}

/// Build an `ArrayD` from flat data, checking the element count
pub(crate) fn make_value(name: &str, shape: &[i64], data: Vec<f32>) -> ExportResult<ArrayD<f32>> {
    let expected = checked_numel(name, shape)?;
    if data.len() != expected {
        return Err(ExportError::TensorSizeMismatch {
            name: name.to_string(),
            shape: shape.to_vec(),
            expected,
            actual: data.len(),
        });
    }
    let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
    ArrayD::from_shape_vec(IxDyn(&dims), data).map_err(|e| ExportError::Internal(e.to_string()))
}

/// Fluent builder for adding a function together with its outputs
///
/// # Example
///
/// ```ignore
/// let times = graph
///     .function_builder("Times")
///     .uid("Times3")
///     .name("layer1")
///     .input(w)
///     .input(x)
///     .output("Output4", "", &[4, 4])
///     .add()?;
/// ```
pub struct FunctionBuilder<'g> {
    graph: &'g mut ComputationGraph,
    function: Function,
    outputs: Vec<(String, String, Shape)>,
}

impl<'g> FunctionBuilder<'g> {
    fn new(graph: &'g mut ComputationGraph, op_name: &str) -> Self {
        let uid = format!("{}{}", op_name, graph.function_count());
        Self {
            graph,
            function: Function {
                uid,
                op_name: op_name.to_string(),
                ..Default::default()
            },
            outputs: Vec::new(),
        }
    }

    /// Set the uid (defaults to op tag plus function index)
    pub fn uid(mut self, uid: &str) -> Self {
        self.function.uid = uid.to_string();
        self
    }

    /// Set the display name
    pub fn name(mut self, name: &str) -> Self {
        self.function.name = name.to_string();
        self
    }

    /// Append an operand
    pub fn input(mut self, input: VariableId) -> Self {
        self.function.inputs.push(input);
        self
    }

    /// Append several operands
    pub fn inputs(mut self, inputs: &[VariableId]) -> Self {
        self.function.inputs.extend_from_slice(inputs);
        self
    }

    /// Declare a result
    pub fn output(mut self, uid: &str, name: &str, shape: &[i64]) -> Self {
        self.outputs
            .push((uid.to_string(), name.to_string(), Shape::from_slice(shape)));
        self
    }

    /// Set an attribute
    pub fn attribute(mut self, key: &str, value: DictionaryValue) -> Self {
        self.function.attributes.insert(key, value);
        self
    }

    /// Replace all attributes
    pub fn attributes(mut self, attributes: Dictionary) -> Self {
        self.function.attributes = attributes;
        self
    }

    /// Insert the function and its output variables
    pub fn add(self) -> ExportResult<FunctionId> {
        let Self {
            graph,
            mut function,
            outputs,
        } = self;

        if graph.uid_index.contains_key(&function.uid) {
            return Err(ExportError::DuplicateUid(function.uid));
        }
        for &v in &function.inputs {
            graph.variable(v)?;
        }

        let owner = graph.next_function_id();
        for (uid, name, shape) in outputs {
            let var = Variable {
                uid,
                name,
                kind: VariableKind::Output { owner },
                shape,
                value: None,
            };
            function.outputs.push(graph.add_variable(var));
        }

        graph.push_function(function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_dense_graph() -> (ComputationGraph, FunctionId) {
        let mut graph = ComputationGraph::new();
        let x = graph.add_input("Input0", "features", &[4]);
        let w = graph
            .add_parameter("Parameter1", "W", &[4, 4], vec![0.5; 16])
            .unwrap();
        let b = graph
            .add_constant("Constant2", "b", &[4], vec![0.0; 4])
            .unwrap();
        let times = graph
            .function_builder("Times")
            .uid("Times3")
            .inputs(&[w, x])
            .output("Output4", "", &[4])
            .add()
            .unwrap();
        let t_out = graph.function(times).unwrap().outputs[0];
        let plus = graph
            .function_builder("Plus")
            .uid("Plus5")
            .inputs(&[t_out, b])
            .output("Output6", "z", &[4])
            .add()
            .unwrap();
        graph.set_root(plus).unwrap();
        (graph, times)
    }

    #[test]
    fn test_builder_creates_owned_outputs() {
        let (graph, times) = make_dense_graph();
        let outputs = graph.outputs_of(times).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].owner(), Some(times));
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_parameters_and_constants() {
        let (graph, times) = make_dense_graph();
        let plus = graph.function_by_uid("Plus5").unwrap();

        let params = graph.parameters_of(times).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "W");
        assert!(graph.constants_of(times).unwrap().is_empty());

        let consts = graph.constants_of(plus).unwrap();
        assert_eq!(consts.len(), 1);
        assert_eq!(consts[0].name, "b");
    }

    #[test]
    fn test_duplicate_uid_rejected() {
        let (mut graph, _) = make_dense_graph();
        let result = graph.function_builder("Plus").uid("Plus5").add();
        assert!(matches!(result, Err(ExportError::DuplicateUid(_))));
    }

    #[test]
    fn test_parameter_size_checked() {
        let mut graph = ComputationGraph::new();
        let result = graph.add_parameter("Parameter0", "W", &[2, 2], vec![1.0; 3]);
        assert!(matches!(result, Err(ExportError::TensorSizeMismatch { .. })));
    }

    #[test]
    fn test_unknown_handles() {
        let graph = ComputationGraph::new();
        assert!(graph.function(FunctionId(0)).is_err());
        assert!(graph.variable(VariableId(3)).is_err());
        assert!(graph.root().is_none());
    }

    #[test]
    fn test_validate_detects_foreign_owner() {
        let mut graph = ComputationGraph::new();
        graph.add_variable(Variable::new(
            "Output0",
            "",
            VariableKind::Output {
                owner: FunctionId(7),
            },
            &[1],
        ));
        assert!(graph.validate().is_err());
    }
}
