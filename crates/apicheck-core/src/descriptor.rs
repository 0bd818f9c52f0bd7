//! Structure descriptors for `ofType` assertions
//!
//! A descriptor describes the *shape* of a JSON object: which keys must be
//! present and what type each value must have. Literal values are never
//! compared here, see [`crate::matcher::matches_value`] for that.
//!
//! Wire form:
//!
//! ```json
//! {
//!   "name": "string",
//!   "address": { "zip": "int" },
//!   "tags": { "arrayOf": "string" },
//!   "friends": { "arrayOf": { "name": "string" } }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key that marks an object as an [`ArrayDescriptor`] instead of a nested structure.
pub const ARRAY_OF_KEY: &str = "arrayOf";

/// Primitive type names accepted in descriptors (matched case-insensitively).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Number,
    Int,
    Boolean,
}

impl PrimitiveType {
    /// Parse a type name, ignoring case. Unknown names yield `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "int" => Some(Self::Int),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Int => "int",
            Self::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value paired with a key in a [`StructureDescriptor`].
///
/// Unknown shapes (numbers, booleans, literal arrays, null) are kept as
/// [`Descriptor::Unrecognized`] so a malformed expectation fails its own test
/// rather than the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Descriptor {
    /// A primitive type name, kept verbatim (case and unknown names are
    /// resolved at match time).
    Type(String),
    Structure(StructureDescriptor),
    ArrayOf(ArrayDescriptor),
    Unrecognized(Value),
}

/// Required keys of a JSON object and the shape of each value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructureDescriptor(BTreeMap<String, Descriptor>);

impl StructureDescriptor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, descriptor: Descriptor) -> Self {
        self.0.insert(key.into(), descriptor);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Descriptor)> {
        self.0.iter()
    }

    /// Type names anywhere in this descriptor that are not primitive types,
    /// reported with their dotted key path (`friends[].name`).
    #[must_use]
    pub fn unknown_types(&self) -> Vec<(String, String)> {
        let mut found = Vec::new();
        collect_unknown(self, "", &mut found);
        found
    }
}

impl FromIterator<(String, Descriptor)> for StructureDescriptor {
    fn from_iter<I: IntoIterator<Item = (String, Descriptor)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Shape every element of a JSON array must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDescriptor {
    pub element: ArrayElement,
}

/// Element shape of an [`ArrayDescriptor`].
///
/// Arrays of arrays cannot be expressed; a nested `{"arrayOf": ...}` is kept
/// as [`ArrayElement::Unrecognized`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayElement {
    Type(String),
    Structure(StructureDescriptor),
    Unrecognized(Value),
}

impl ArrayDescriptor {
    #[must_use]
    pub fn of_type(name: impl Into<String>) -> Self {
        Self {
            element: ArrayElement::Type(name.into()),
        }
    }

    #[must_use]
    pub fn of_structure(structure: StructureDescriptor) -> Self {
        Self {
            element: ArrayElement::Structure(structure),
        }
    }
}

impl Descriptor {
    #[must_use]
    pub fn of_type(name: impl Into<String>) -> Self {
        Self::Type(name.into())
    }

    #[must_use]
    pub fn array_of(name: impl Into<String>) -> Self {
        Self::ArrayOf(ArrayDescriptor::of_type(name))
    }
}

fn is_array_marker(map: &serde_json::Map<String, Value>) -> bool {
    map.len() == 1 && map.contains_key(ARRAY_OF_KEY)
}

impl From<Value> for Descriptor {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Self::Type(name),
            Value::Object(mut map) if is_array_marker(&map) => {
                let inner = map.remove(ARRAY_OF_KEY).unwrap_or(Value::Null);
                Self::ArrayOf(ArrayDescriptor {
                    element: ArrayElement::from(inner),
                })
            }
            Value::Object(map) => Self::Structure(structure_from_map(map)),
            other => Self::Unrecognized(other),
        }
    }
}

impl From<Value> for ArrayElement {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Self::Type(name),
            Value::Object(map) if !is_array_marker(&map) => {
                Self::Structure(structure_from_map(map))
            }
            other => Self::Unrecognized(other),
        }
    }
}

fn structure_from_map(map: serde_json::Map<String, Value>) -> StructureDescriptor {
    map.into_iter()
        .map(|(k, v)| (k, Descriptor::from(v)))
        .collect()
}

impl From<StructureDescriptor> for Value {
    fn from(structure: StructureDescriptor) -> Self {
        Value::Object(
            structure
                .0
                .into_iter()
                .map(|(k, d)| (k, Value::from(d)))
                .collect(),
        )
    }
}

impl From<Descriptor> for Value {
    fn from(descriptor: Descriptor) -> Self {
        match descriptor {
            Descriptor::Type(name) => Value::String(name),
            Descriptor::Structure(s) => Value::from(s),
            Descriptor::ArrayOf(a) => {
                let inner = match a.element {
                    ArrayElement::Type(name) => Value::String(name),
                    ArrayElement::Structure(s) => Value::from(s),
                    ArrayElement::Unrecognized(v) => v,
                };
                let mut map = serde_json::Map::new();
                map.insert(ARRAY_OF_KEY.to_string(), inner);
                Value::Object(map)
            }
            Descriptor::Unrecognized(v) => v,
        }
    }
}

fn collect_unknown(structure: &StructureDescriptor, prefix: &str, out: &mut Vec<(String, String)>) {
    for (key, descriptor) in structure.iter() {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match descriptor {
            Descriptor::Type(name) if PrimitiveType::parse(name).is_none() => {
                out.push((path, name.clone()));
            }
            Descriptor::Structure(nested) => collect_unknown(nested, &path, out),
            Descriptor::ArrayOf(array) => match &array.element {
                ArrayElement::Type(name) if PrimitiveType::parse(name).is_none() => {
                    out.push((format!("{path}[]"), name.clone()));
                }
                ArrayElement::Structure(nested) => {
                    collect_unknown(nested, &format!("{path}[]"), out);
                }
                ArrayElement::Unrecognized(v) => out.push((format!("{path}[]"), v.to_string())),
                ArrayElement::Type(_) => {}
            },
            Descriptor::Unrecognized(v) => out.push((path, v.to_string())),
            Descriptor::Type(_) => {}
        }
    }
}
