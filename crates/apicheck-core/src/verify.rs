//! Response verification
//!
//! Checks run in a fixed order and stop at the first failure:
//! status code, body (exact body, `ofType` structure, or `json` subset),
//! then headers. No network I/O happens here beyond reading the body the
//! caller hands over.

use std::io::{Cursor, Read};

use serde_json::Value;

use crate::definition::Expectation;
use crate::matcher::{matches_structure, matches_value};

/// A received HTTP response: status, header lookup and a readable body.
pub trait HttpResponse: Read {
    fn status_code(&self) -> u16;

    /// Header value by name. Names are matched case-insensitively.
    fn header(&self, name: &str) -> Option<String>;
}

/// A fully buffered response, for canned data and tests.
#[derive(Debug, Clone)]
pub struct BufferedResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Cursor<Vec<u8>>,
}

impl BufferedResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Cursor::new(body.into()),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl Read for BufferedResponse {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.body.read(buf)
    }
}

impl HttpResponse for BufferedResponse {
    fn status_code(&self) -> u16 {
        self.status
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }
}

/// Why a response did not satisfy its expectation.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("unable to read response body: {0}")]
    Read(#[from] std::io::Error),

    #[error("malformed JSON in response body: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("unexpected status code\n\nExpected:\n{expected}\n\nActual:\n{actual}\n")]
    StatusCode { expected: u16, actual: u16 },

    #[error("mismatching bodies\n\nExpected:\n{expected}\n\nActual:\n{actual}\n")]
    Body { expected: String, actual: String },

    #[error("mismatching JSON structure")]
    Structure,

    #[error("mismatching JSON\n\nExpected:\n{expected}\n\nActual:\n{actual}\n")]
    Json { expected: Value, actual: Value },

    #[error("mismatching {name} header\n\nExpected:\n{expected}\n\nActual:\n{actual}\n")]
    Header {
        name: String,
        expected: String,
        actual: String,
    },
}

impl VerifyError {
    /// `true` for assertion failures, `false` for read and decode errors.
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        !matches!(self, Self::Read(_) | Self::MalformedJson(_))
    }
}

/// Verify `response` against `expectation`.
///
/// The body is read to completion before any assertion runs.
///
/// # Errors
///
/// Returns the first failed check, or [`VerifyError::Read`] if the body could
/// not be read.
pub fn verify<R: HttpResponse>(mut response: R, expectation: &Expectation) -> Result<(), VerifyError> {
    let mut body = Vec::new();
    response.read_to_end(&mut body)?;

    let actual_status = response.status_code();
    if actual_status != expectation.status_code {
        return Err(VerifyError::StatusCode {
            expected: expectation.status_code,
            actual: actual_status,
        });
    }

    verify_body(&body, expectation)?;

    for (name, expected) in &expectation.headers {
        let actual = response.header(name).unwrap_or_default();
        if actual != *expected {
            return Err(VerifyError::Header {
                name: name.clone(),
                expected: expected.clone(),
                actual,
            });
        }
    }

    Ok(())
}

fn verify_body(body: &[u8], expectation: &Expectation) -> Result<(), VerifyError> {
    if !expectation.body.is_empty() {
        if expectation.body.as_bytes() != body {
            return Err(VerifyError::Body {
                expected: expectation.body.clone(),
                actual: String::from_utf8_lossy(body).into_owned(),
            });
        }
        return Ok(());
    }

    if let Some(descriptor) = expectation.type_of.as_ref().filter(|d| !d.is_empty()) {
        let actual = decode(body)?;
        if !matches_structure(&actual, descriptor) {
            return Err(VerifyError::Structure);
        }
        return Ok(());
    }

    if let Some(expected) = &expectation.json {
        let actual = decode(body)?;
        if !matches_value(&actual, expected) {
            return Err(VerifyError::Json {
                expected: expected.clone(),
                actual,
            });
        }
    }

    Ok(())
}

fn decode(body: &[u8]) -> Result<Value, VerifyError> {
    serde_json::from_slice(body).map_err(VerifyError::MalformedJson)
}
