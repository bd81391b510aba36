//! Attribute rendering
//!
//! Scalar attribute values are stored in `ext_attrs` as text. Composite
//! values render as [`UNSUPPORTED_ATTR`].

use crate::error::ExportResult;
use crate::graph::{Dictionary, DictionaryValue};

use super::payload::{encode_bytes, EncodedPayload, PayloadPolicy};

/// Placeholder for values without a text form
pub const UNSUPPORTED_ATTR: &str = "<<unsupported>>";

/// Reserved `ext_attrs` key for the serialized attribute dictionary
pub const NODE_DICTIONARY_KEY: &str = "##NODE##DICTIONARY##";

/// Render one attribute value as text
///
/// Booleans render as `1`/`0`, floating point values with six decimals.
pub fn render_value(value: &DictionaryValue) -> String {
    match value {
        DictionaryValue::Bool(b) => u8::from(*b).to_string(),
        DictionaryValue::Int(i) => i.to_string(),
        DictionaryValue::SizeT(n) => n.to_string(),
        DictionaryValue::Double(d) => format!("{:.6}", d),
        DictionaryValue::Float(f) => format!("{:.6}", f),
        DictionaryValue::String(s) => s.clone(),
        _ => UNSUPPORTED_ATTR.to_string(),
    }
}

/// Serialize a whole dictionary and encode it as a payload
pub fn encode_dictionary(dict: &Dictionary, policy: PayloadPolicy) -> ExportResult<EncodedPayload> {
    let bytes = serde_json::to_vec(dict)?;
    Ok(encode_bytes(&bytes, policy))
}
