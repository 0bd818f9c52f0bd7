//! JSON Schema for test definition files
//!
//! Editors can point `$schema` at the generated file to validate
//! `*.ac.json` files while writing them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::definition::ApiTest;

/// A test definition file: a top-level array of tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TestFile(pub Vec<ApiTest>);

/// Generate JSON Schema for test definition files.
///
/// # Errors
///
/// Returns error if the schema cannot be serialized.
pub fn generate_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(TestFile);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_generation_produces_valid_json() {
        let schema = generate_schema().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&schema).unwrap();
        assert_eq!(
            parsed.get("title").and_then(|v| v.as_str()),
            Some("TestFile")
        );
        assert_eq!(parsed.get("type").and_then(|v| v.as_str()), Some("array"));
        assert!(schema.contains("ApiTest"));
    }

    #[test]
    fn schema_uses_wire_names() {
        let schema = generate_schema().unwrap();
        for key in ["query-params", "ofType", "code", "cookies"] {
            assert!(schema.contains(key), "schema lacks {key}");
        }
    }

    #[test]
    fn test_file_is_a_plain_array() {
        let file: TestFile = serde_json::from_str(r#"[{"endpoint": "/ping"}]"#).unwrap();
        assert_eq!(file.0.len(), 1);
        assert_eq!(file.0[0].endpoint, "/ping");
    }
}
