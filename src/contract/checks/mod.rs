pub mod consistency;
pub mod shape;
pub mod transport;

use serde_json::Value;

/// JSON type name for failure messages, matching the wording of the
/// contract ("expected integer, got string").
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.as_i64().is_some() || n.as_u64().is_some() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Integer in the JSON sense: a number without a fractional representation.
pub(crate) fn is_integer(value: &Value) -> bool {
    value.as_i64().is_some() || value.as_u64().is_some()
}
