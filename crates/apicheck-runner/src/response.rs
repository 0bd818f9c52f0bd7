//! Live HTTP responses as seen by the verifier

use std::io::Read;

use apicheck_core::HttpResponse;

/// A received `reqwest` response, body still unread.
#[derive(Debug)]
pub struct LiveResponse(reqwest::blocking::Response);

impl LiveResponse {
    #[must_use]
    pub const fn new(response: reqwest::blocking::Response) -> Self {
        Self(response)
    }
}

impl From<reqwest::blocking::Response> for LiveResponse {
    fn from(response: reqwest::blocking::Response) -> Self {
        Self::new(response)
    }
}

impl Read for LiveResponse {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.0.read(buf)
    }
}

impl HttpResponse for LiveResponse {
    fn status_code(&self) -> u16 {
        self.0.status().as_u16()
    }

    /// First value of the header. Non-UTF-8 values read as absent.
    fn header(&self, name: &str) -> Option<String> {
        self.0
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}
