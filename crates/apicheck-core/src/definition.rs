//! Test definition types, as written in `*.ac.json` files

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::StructureDescriptor;

/// A single API test: one request and the response it must produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ApiTest {
    /// Free-form label shown in reports
    #[serde(default)]
    pub description: String,
    /// HTTP method (default GET, case-insensitive)
    #[serde(default)]
    pub method: String,
    /// `scheme://host[:port]`; falls back to the config hostname
    #[serde(default)]
    pub hostname: String,
    /// Path starting with `/` (default `/`)
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub request: ApiRequest,
    #[serde(default)]
    pub response: Expectation,
}

impl ApiTest {
    /// Report label: the description, or hostname + endpoint when unset.
    #[must_use]
    pub fn label(&self) -> String {
        if self.description.is_empty() {
            format!("{}{}", self.hostname, self.endpoint)
        } else {
            self.description.clone()
        }
    }
}

/// The request sent for a test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ApiRequest {
    /// Raw body, used when `json` is absent
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, rename = "query-params")]
    pub query_params: BTreeMap<String, String>,
    /// JSON body; takes precedence over `body`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cookies: Vec<Cookie>,
}

/// A cookie sent with the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

/// The response a test expects.
///
/// At most one of `body`, `type_of` and `json` governs body validation, in
/// that order of precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Expectation {
    /// Exact body; empty means not checked
    #[serde(default)]
    pub body: String,
    /// Headers that must be present with exactly these values
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Expected status code (0 until defaulted by the parser)
    #[serde(default, rename = "code")]
    pub status_code: u16,
    /// Literal JSON the body must contain (object keys are a subset match)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
    /// Shape the body must have
    #[serde(default, rename = "ofType", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<BTreeMap<String, Value>>")]
    pub type_of: Option<StructureDescriptor>,
}

impl Expectation {
    #[must_use]
    pub fn status(code: u16) -> Self {
        Self {
            status_code: code,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }

    #[must_use]
    pub fn with_type_of(mut self, descriptor: StructureDescriptor) -> Self {
        self.type_of = Some(descriptor);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_full_test() {
        let raw = r#"{
            "description": "create user",
            "method": "post",
            "hostname": "http://localhost:8080",
            "endpoint": "/users",
            "request": {
                "headers": {"X-Token": "abc"},
                "query-params": {"dry": "true"},
                "json": {"name": "Jack"},
                "cookies": [{"name": "session", "value": "s1"}]
            },
            "response": {
                "code": 201,
                "headers": {"Content-Type": "application/json"},
                "ofType": {"id": "int", "tags": {"arrayOf": "string"}}
            }
        }"#;
        let test: ApiTest = serde_json::from_str(raw).unwrap();

        assert_eq!(test.method, "post");
        assert_eq!(test.request.query_params["dry"], "true");
        assert_eq!(test.request.json, Some(json!({"name": "Jack"})));
        assert_eq!(test.request.cookies[0].name, "session");
        assert_eq!(test.response.status_code, 201);
        assert_eq!(test.response.type_of.as_ref().map(|d| d.len()), Some(2));
        assert!(test.response.json.is_none());
        assert!(test.response.body.is_empty());
    }

    #[test]
    fn missing_fields_default() {
        let test: ApiTest = serde_json::from_str("{}").unwrap();
        assert_eq!(test, ApiTest::default());
        assert_eq!(test.response.status_code, 0);
    }

    #[test]
    fn null_json_is_unset() {
        let e: Expectation = serde_json::from_str(r#"{"code": 200, "json": null}"#).unwrap();
        assert!(e.json.is_none());
    }

    #[test]
    fn label_falls_back_to_url() {
        let mut test = ApiTest {
            hostname: "http://localhost".into(),
            endpoint: "/apps".into(),
            ..ApiTest::default()
        };
        assert_eq!(test.label(), "http://localhost/apps");
        test.description = "list apps".into();
        assert_eq!(test.label(), "list apps");
    }
}
