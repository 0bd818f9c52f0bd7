//! Sequential test execution

use std::time::Duration;

use apicheck_core::{ApiTest, Config, Outcome, RunReport, verify};
use reqwest::blocking::Client;

use crate::request::build_request;
use crate::response::LiveResponse;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("invalid timeout: {0} seconds")]
    Timeout(f64),
}

/// Sends each test's request and verifies the response.
#[derive(Debug, Clone)]
pub struct TestRunner {
    client: Client,
}

impl TestRunner {
    /// Build a runner whose requests time out after `config.timeout` seconds.
    ///
    /// # Errors
    ///
    /// Returns error if the timeout is not a positive finite number or the
    /// HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, RunnerError> {
        let timeout = Duration::try_from_secs_f64(config.timeout)
            .ok()
            .filter(|t| !t.is_zero())
            .ok_or(RunnerError::Timeout(config.timeout))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Use an existing client as-is.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Run one test. Transport problems become [`Outcome::Errored`].
    #[must_use]
    pub fn run_test(&self, test: &ApiTest) -> RunReport {
        let label = test.label();
        tracing::debug!(test = %label, method = %test.method, endpoint = %test.endpoint, "running test");

        let outcome = match self.execute(test) {
            Ok(response) => match verify(response, &test.response) {
                Ok(()) => Outcome::Passed,
                Err(e) => Outcome::Failed(e),
            },
            Err(reason) => Outcome::Errored(reason),
        };

        match &outcome {
            Outcome::Passed => tracing::debug!(test = %label, "passed"),
            Outcome::Failed(e) => tracing::debug!(test = %label, error = %e, "failed"),
            Outcome::Errored(e) => tracing::warn!(test = %label, error = %e, "errored"),
        }
        RunReport::new(test.clone(), outcome)
    }

    /// Run tests in order. One test erroring does not stop the rest.
    #[must_use]
    pub fn run_tests(&self, tests: &[ApiTest]) -> Vec<RunReport> {
        tests.iter().map(|t| self.run_test(t)).collect()
    }

    fn execute(&self, test: &ApiTest) -> Result<LiveResponse, String> {
        let request = build_request(&self.client, test).map_err(|e| e.to_string())?;
        let response = self
            .client
            .execute(request)
            .map_err(|e| format!("unable to complete request: {e}"))?;
        Ok(LiveResponse::new(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicheck_core::Expectation;

    #[test]
    fn runner_from_default_config() {
        assert!(TestRunner::new(&Config::default()).is_ok());
    }

    #[test]
    fn bad_timeout_rejected() {
        let config = Config {
            timeout: -1.0,
            ..Config::default()
        };
        assert!(matches!(
            TestRunner::new(&config),
            Err(RunnerError::Timeout(_))
        ));
    }

    #[test]
    fn connection_refused_is_errored() {
        // Bind then drop to get a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let test = ApiTest {
            method: "GET".into(),
            hostname: format!("http://127.0.0.1:{port}"),
            endpoint: "/".into(),
            response: Expectation::status(200),
            ..ApiTest::default()
        };
        let runner = TestRunner::new(&Config::default()).unwrap();
        let reports = runner.run_tests(&[test.clone(), test]);

        assert_eq!(reports.len(), 2);
        for report in &reports {
            assert!(matches!(report.outcome, Outcome::Errored(ref e) if e.contains("unable to complete request")));
        }
    }

    #[test]
    fn invalid_request_is_errored() {
        let test = ApiTest {
            method: "GET".into(),
            hostname: "not a url".into(),
            endpoint: "/".into(),
            ..ApiTest::default()
        };
        let report = TestRunner::new(&Config::default()).unwrap().run_test(&test);
        assert!(matches!(report.outcome, Outcome::Errored(_)));
    }
}
