//! `arrayOf` checks

use serde_json::Value;

use super::{matches_structure, matches_type};
use crate::descriptor::ArrayElement;

/// Check that `value` is an array whose every element satisfies `element`.
///
/// An empty array always matches.
#[must_use]
pub fn matches_array(value: &Value, element: &ArrayElement) -> bool {
    let Value::Array(items) = value else {
        return false;
    };
    items.iter().all(|item| match element {
        ArrayElement::Type(name) => matches_type(item, name),
        ArrayElement::Structure(structure) => matches_structure(item, structure),
        ArrayElement::Unrecognized(_) => false,
    })
}
