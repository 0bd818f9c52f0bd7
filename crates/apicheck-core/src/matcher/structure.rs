//! `ofType` checks

use serde_json::Value;

use super::{matches_array, matches_type};
use crate::descriptor::{Descriptor, StructureDescriptor};

/// Check that `value` is an object with at least the keys in `descriptor`,
/// each holding a value of the described shape.
///
/// Extra keys in `value` are allowed. An empty descriptor matches any value.
#[must_use]
pub fn matches_structure(value: &Value, descriptor: &StructureDescriptor) -> bool {
    if descriptor.is_empty() {
        return true;
    }
    let Value::Object(map) = value else {
        return false;
    };
    descriptor.iter().all(|(key, expected)| {
        let Some(actual) = map.get(key) else {
            return false;
        };
        match expected {
            Descriptor::Type(name) => matches_type(actual, name),
            Descriptor::Structure(nested) => matches_structure(actual, nested),
            Descriptor::ArrayOf(array) => matches_array(actual, &array.element),
            Descriptor::Unrecognized(_) => false,
        }
    })
}
