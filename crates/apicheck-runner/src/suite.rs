//! Suite orchestration
//!
//! discovery -> config -> parse -> setup script -> tests -> cleanup script

use std::path::{Path, PathBuf};

use apicheck_core::config::DEFAULT_CONFIG_FILE;
use apicheck_core::{
    Config, ConfigError, ParseError, Parser, RunReport, Summary, Verdict, find_test_definitions,
};

use crate::runner::{RunnerError, TestRunner};
use crate::script::{ScriptError, run_script};

#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    #[error("unable to find test definition files: {0}")]
    Discovery(#[source] std::io::Error),
    #[error("unable to parse config file: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runner(#[from] RunnerError),
    #[error("unable to run setup script: {0}")]
    Setup(#[source] ScriptError),
    /// Tests ran; their reports are kept so they can still be shown.
    #[error("unable to run cleanup script: {0}")]
    Cleanup(#[source] ScriptError, SuiteOutcome),
}

/// Reports of every test in a suite run, in execution order.
#[derive(Debug)]
pub struct SuiteOutcome {
    pub reports: Vec<RunReport>,
}

impl SuiteOutcome {
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::from_reports(&self.reports)
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.summary().verdict()
    }

    /// Panic listing every failed test, for running a suite under
    /// `cargo test`.
    ///
    /// # Panics
    ///
    /// Panics if any test failed or errored.
    pub fn assert_all_passed(&self) {
        let failures: Vec<String> = self
            .reports
            .iter()
            .filter_map(|r| r.outcome.reason().map(|why| format!("{}: {why}", r.label())))
            .collect();
        assert!(
            failures.is_empty(),
            "{} of {} tests failed:\n{}",
            failures.len(),
            self.reports.len(),
            failures.join("\n")
        );
    }
}

/// A directory of test definitions plus its config file.
#[derive(Debug, Clone)]
pub struct Suite {
    dir: PathBuf,
    config_path: PathBuf,
}

impl Suite {
    /// Suite over `dir`, configured from `.ac.json` in the working directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    #[must_use]
    pub fn with_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Run the whole suite.
    ///
    /// Nothing is sent if discovery, config, parsing or the setup script
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns the first step that failed. Failing tests are not errors;
    /// they are reported in the returned [`SuiteOutcome`].
    pub fn run(&self) -> Result<SuiteOutcome, SuiteError> {
        let files = find_test_definitions(&self.dir).map_err(SuiteError::Discovery)?;
        tracing::info!(dir = %self.dir.display(), files = files.len(), "discovered test files");

        let config = Config::load_or_default(&self.config_path)?;
        let tests = Parser::new(&config).parse(&files)?;
        for warning in Parser::lint(&tests) {
            tracing::warn!("{warning}");
        }
        let runner = TestRunner::new(&config)?;

        run_script(&config.setup_script, config.mute_script_output).map_err(SuiteError::Setup)?;

        tracing::info!(tests = tests.len(), "running tests");
        let outcome = SuiteOutcome {
            reports: runner.run_tests(&tests),
        };

        if let Err(e) = run_script(&config.cleanup_script, config.mute_script_output) {
            return Err(SuiteError::Cleanup(e, outcome));
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicheck_core::{ApiTest, Outcome, VerifyError};

    fn outcome(outcomes: Vec<Outcome>) -> SuiteOutcome {
        SuiteOutcome {
            reports: outcomes
                .into_iter()
                .enumerate()
                .map(|(i, o)| {
                    let test = ApiTest {
                        description: format!("test {i}"),
                        ..ApiTest::default()
                    };
                    RunReport::new(test, o)
                })
                .collect(),
        }
    }

    #[test]
    fn all_passed_does_not_panic() {
        outcome(vec![Outcome::Passed, Outcome::Passed]).assert_all_passed();
    }

    #[test]
    fn assert_lists_every_failure() {
        let o = outcome(vec![
            Outcome::Passed,
            Outcome::Failed(VerifyError::StatusCode {
                expected: 200,
                actual: 404,
            }),
            Outcome::Errored("connection refused".into()),
        ]);
        let panic = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| o.assert_all_passed()))
            .unwrap_err();
        let msg = panic.downcast_ref::<String>().unwrap();
        assert!(msg.contains("2 of 3 tests failed"));
        assert!(msg.contains("test 1: unexpected status code"));
        assert!(msg.contains("test 2: connection refused"));
    }

    #[test]
    fn missing_dir_is_discovery_error() {
        let dir = tempfile::tempdir().unwrap();
        let suite = Suite::new(dir.path().join("absent")).with_config(dir.path().join(".ac.json"));
        assert!(matches!(suite.run(), Err(SuiteError::Discovery(_))));
    }

    #[test]
    fn invalid_test_aborts_before_setup() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("setup-ran");
        let setup = dir.path().join("setup.sh");
        std::fs::write(&setup, format!("touch '{}'\n", marker.display())).unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(
            &config,
            serde_json::json!({"setup-script": setup}).to_string(),
        )
        .unwrap();
        // No hostname anywhere.
        std::fs::write(dir.path().join("bad.ac.json"), r#"[{"endpoint": "/"}]"#).unwrap();

        let err = Suite::new(dir.path()).with_config(&config).run().unwrap_err();
        assert!(matches!(err, SuiteError::Parse(_)));
        assert!(err.to_string().contains("hostname is a required field"));
        assert!(!marker.exists());
    }

    #[test]
    fn failing_setup_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let setup = dir.path().join("setup.sh");
        std::fs::write(&setup, "exit 1\n").unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(
            &config,
            serde_json::json!({"setup-script": setup, "mute-script-output": true}).to_string(),
        )
        .unwrap();

        let err = Suite::new(dir.path()).with_config(&config).run().unwrap_err();
        assert!(matches!(err, SuiteError::Setup(ScriptError::Failed { .. })));
    }

    #[test]
    fn empty_suite_runs_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("cleaned");
        let cleanup = dir.path().join("cleanup.sh");
        std::fs::write(&cleanup, format!("touch '{}'\n", marker.display())).unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(
            &config,
            serde_json::json!({"cleanup-script": cleanup}).to_string(),
        )
        .unwrap();

        let outcome = Suite::new(dir.path()).with_config(&config).run().unwrap();
        assert!(outcome.reports.is_empty());
        assert!(marker.exists());
    }
}
