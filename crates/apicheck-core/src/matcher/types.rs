//! Primitive type checks

use serde_json::Value;

use crate::descriptor::PrimitiveType;

/// Check `value` against a type name such as `"int"` or `"String"`.
///
/// Unknown type names never match.
#[must_use]
pub fn matches_type(value: &Value, type_name: &str) -> bool {
    PrimitiveType::parse(type_name).is_some_and(|ty| matches_primitive(value, ty))
}

/// Check `value` against an already parsed primitive type.
#[must_use]
pub fn matches_primitive(value: &Value, ty: PrimitiveType) -> bool {
    match ty {
        PrimitiveType::String => value.is_string(),
        PrimitiveType::Number => value.is_number(),
        PrimitiveType::Int => is_integral(value),
        PrimitiveType::Boolean => value.is_boolean(),
    }
}

/// Integers, plus floats with a zero fractional part (`21.0`).
fn is_integral(value: &Value) -> bool {
    let Value::Number(n) = value else {
        return false;
    };
    if n.is_i64() || n.is_u64() {
        return true;
    }
    n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}
