//! Functions and variables of the source graph

use ndarray::ArrayD;

use crate::tensor::Shape;

use super::dictionary::Dictionary;

/// Stable handle of a function in a [`ComputationGraph`](super::ComputationGraph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub usize);

/// Stable handle of a variable in a [`ComputationGraph`](super::ComputationGraph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub usize);

impl std::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "f#{}", self.0)
    }
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v#{}", self.0)
    }
}

/// Role of a variable in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Graph input fed at evaluation time
    Input,
    /// Produced by a function
    Output {
        /// Producing function
        owner: FunctionId,
    },
    /// Learned tensor with stored values
    Parameter,
    /// Fixed tensor with stored values
    Constant,
    /// Unbound slot awaiting replacement
    Placeholder,
}

/// Tensor-valued variable
#[derive(Debug, Clone)]
pub struct Variable {
    /// Stable identifier
    pub uid: String,
    /// Display name, may be empty
    pub name: String,
    /// Role
    pub kind: VariableKind,
    /// Declared dimensions
    pub shape: Shape,
    /// Stored values for parameters and constants
    pub value: Option<ArrayD<f32>>,
}

impl Variable {
    /// Create a variable without stored values
    pub fn new(uid: &str, name: &str, kind: VariableKind, shape: &[i64]) -> Self {
        Self {
            uid: uid.to_string(),
            name: name.to_string(),
            kind,
            shape: Shape::from_slice(shape),
            value: None,
        }
    }

    /// Attach stored values
    pub fn with_value(mut self, value: ArrayD<f32>) -> Self {
        self.value = Some(value);
        self
    }

    /// Producing function, if this is an output
    pub fn owner(&self) -> Option<FunctionId> {
        match self.kind {
            VariableKind::Output { owner } => Some(owner),
            _ => None,
        }
    }

    /// Check if this variable is produced by a function
    pub fn is_output(&self) -> bool {
        matches!(self.kind, VariableKind::Output { .. })
    }

    /// Check if this variable is a learned parameter
    pub fn is_parameter(&self) -> bool {
        self.kind == VariableKind::Parameter
    }

    /// Check if this variable is a constant
    pub fn is_constant(&self) -> bool {
        self.kind == VariableKind::Constant
    }

    /// Check if this variable is a placeholder
    pub fn is_placeholder(&self) -> bool {
        self.kind == VariableKind::Placeholder
    }
}

/// One operation of the source graph
#[derive(Debug, Clone, Default)]
pub struct Function {
    /// Stable identifier, unique within the graph
    pub uid: String,
    /// Display name, may be empty
    pub name: String,
    /// Operation tag
    pub op_name: String,
    /// Operands in declared order
    pub inputs: Vec<VariableId>,
    /// Results in declared order
    pub outputs: Vec<VariableId>,
    /// Node-level attributes
    pub attributes: Dictionary,
}

impl Function {
    /// Check if this function has a specific op tag
    pub fn is_op(&self, op: &str) -> bool {
        self.op_name == op
    }
}
