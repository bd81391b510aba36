//! Attribute dictionaries
//!
//! Functions carry a dictionary of named, typed attribute values. Scalar
//! values are exported as strings; composite values have no string form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Typed attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DictionaryValue {
    /// Boolean flag
    Bool(bool),
    /// Signed 32-bit integer
    Int(i32),
    /// Unsigned size
    SizeT(u64),
    /// Double precision float
    Double(f64),
    /// Single precision float
    Float(f32),
    /// Text
    String(String),
    /// Tensor shape
    Shape(Vec<i64>),
    /// Static or dynamic axis index
    Axis(i32),
    /// Heterogeneous list
    Vector(Vec<DictionaryValue>),
    /// Nested dictionary
    Dictionary(Dictionary),
}

impl DictionaryValue {
    /// Name of the value's type, as used in JSON model descriptions
    pub fn type_name(&self) -> &'static str {
        match self {
            DictionaryValue::Bool(_) => "bool",
            DictionaryValue::Int(_) => "int",
            DictionaryValue::SizeT(_) => "size_t",
            DictionaryValue::Double(_) => "double",
            DictionaryValue::Float(_) => "float",
            DictionaryValue::String(_) => "string",
            DictionaryValue::Shape(_) => "shape",
            DictionaryValue::Axis(_) => "axis",
            DictionaryValue::Vector(_) => "vector",
            DictionaryValue::Dictionary(_) => "dictionary",
        }
    }

    /// Whether the value is a scalar with a natural text form
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            DictionaryValue::Bool(_)
                | DictionaryValue::Int(_)
                | DictionaryValue::SizeT(_)
                | DictionaryValue::Double(_)
                | DictionaryValue::Float(_)
                | DictionaryValue::String(_)
        )
    }
}

/// Ordered attribute map (declaration order preserved)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: IndexMap<String, DictionaryValue>,
}

impl Dictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, key: impl Into<String>, value: DictionaryValue) {
        self.entries.insert(key.into(), value);
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: DictionaryValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up an entry
    pub fn get(&self, key: &str) -> Option<&DictionaryValue> {
        self.entries.get(key)
    }

    /// Iterate entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DictionaryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
