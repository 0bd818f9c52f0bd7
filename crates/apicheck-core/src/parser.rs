//! Test file parsing and validation
//!
//! Reads `*.ac.json` (or `*.ac.yaml`) files into [`ApiTest`]s and fills in
//! defaults: endpoint `/`, method GET, status 200, hostname from config.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::definition::ApiTest;

pub const DEFAULT_ENDPOINT: &str = "/";
pub const DEFAULT_METHOD: &str = "GET";
pub const DEFAULT_STATUS_CODE: u16 = 200;

const METHODS: &[&str] = &[
    "GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "CONNECT", "OPTIONS", "TRACE",
];

/// A test that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("endpoint must begin with '/', found: {0}")]
    EndpointSlash(String),
    #[error("hostname is a required field")]
    MissingHostname,
    #[error("malformed hostname provided: {0}")]
    MalformedHostname(String),
    #[error("HTTP status code out of range: {0}")]
    StatusCodeRange(u16),
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error parsing file {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },
    #[error("Error parsing file {}: error in test #{index}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        /// 1-based position of the test in its file
        index: usize,
        source: ValidationError,
    },
}

/// Parses test files against a suite [`Config`].
#[derive(Debug, Clone)]
pub struct Parser {
    config: Config,
}

impl Parser {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Parse every file in order and concatenate their tests.
    ///
    /// # Errors
    ///
    /// Stops at the first file that cannot be read, decoded or validated.
    pub fn parse<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<ApiTest>, ParseError> {
        let mut tests = Vec::new();
        for path in paths {
            tests.extend(self.parse_file(path.as_ref())?);
        }
        Ok(tests)
    }

    /// Parse one file holding an array of tests.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or decoded, or if any test in
    /// it is invalid.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<ApiTest>, ParseError> {
        let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tests = decode_tests(path, &content)?;
        tracing::debug!(path = %path.display(), count = tests.len(), "parsed test file");

        tests
            .into_iter()
            .enumerate()
            .map(|(i, test)| {
                self.validate(test).map_err(|source| ParseError::Invalid {
                    path: path.to_path_buf(),
                    index: i + 1,
                    source,
                })
            })
            .collect()
    }

    /// Validate one test and fill in defaults.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self, mut test: ApiTest) -> Result<ApiTest, ValidationError> {
        test.endpoint = validate_endpoint(&test.endpoint)?;
        test.hostname = self.validate_hostname(&test.hostname)?;
        test.response.status_code = validate_status_code(test.response.status_code)?;
        test.method = validate_method(&test.method)?;
        Ok(test)
    }

    /// The config fallback is normalized like a test's own hostname, so a
    /// bad config hostname fails at parse time instead of per request.
    fn validate_hostname(&self, hostname: &str) -> Result<String, ValidationError> {
        if hostname.is_empty() {
            if self.config.hostname.is_empty() {
                return Err(ValidationError::MissingHostname);
            }
            return normalize_hostname(&self.config.hostname);
        }
        normalize_hostname(hostname)
    }

    /// Non-fatal problems: `ofType` entries that can never match.
    #[must_use]
    pub fn lint(tests: &[ApiTest]) -> Vec<String> {
        let mut warnings = Vec::new();
        for (i, test) in tests.iter().enumerate() {
            let Some(descriptor) = &test.response.type_of else {
                continue;
            };
            for (path, name) in descriptor.unknown_types() {
                warnings.push(format!(
                    "test #{} ({}): ofType field '{path}' has unknown type {name}",
                    i + 1,
                    test.label()
                ));
            }
        }
        warnings
    }
}

/// Decode by extension: `.yaml`/`.yml` as YAML, anything else as JSON.
fn decode_tests(path: &Path, content: &str) -> Result<Vec<ApiTest>, ParseError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let decoded = match ext.as_str() {
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| e.to_string()),
        _ => serde_json::from_str(content).map_err(|e| e.to_string()),
    };
    decoded.map_err(|message| ParseError::Decode {
        path: path.to_path_buf(),
        message,
    })
}

fn validate_endpoint(endpoint: &str) -> Result<String, ValidationError> {
    if endpoint.is_empty() {
        return Ok(DEFAULT_ENDPOINT.to_string());
    }
    if !endpoint.starts_with('/') {
        return Err(ValidationError::EndpointSlash(endpoint.to_string()));
    }
    Ok(endpoint.to_string())
}

/// Reduce a URL to `scheme://host[:port]`.
fn normalize_hostname(hostname: &str) -> Result<String, ValidationError> {
    let malformed = || ValidationError::MalformedHostname(hostname.to_string());
    let url = url::Url::parse(hostname).map_err(|_| malformed())?;
    let host = url.host_str().ok_or_else(malformed)?;
    Ok(match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    })
}

fn validate_status_code(code: u16) -> Result<u16, ValidationError> {
    match code {
        0 => Ok(DEFAULT_STATUS_CODE),
        100..=599 => Ok(code),
        _ => Err(ValidationError::StatusCodeRange(code)),
    }
}

fn validate_method(method: &str) -> Result<String, ValidationError> {
    if method.is_empty() {
        return Ok(DEFAULT_METHOD.to_string());
    }
    let upper = method.to_ascii_uppercase();
    if METHODS.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(ValidationError::UnsupportedMethod(upper))
    }
}
