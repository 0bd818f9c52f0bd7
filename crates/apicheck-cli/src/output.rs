//! Report rendering for the terminal and JSON outputs

use apicheck_core::{Outcome, RunReport, Summary};
use serde_json::json;

/// Renders suite results. Verbose reporters list every test, quiet ones
/// only the tests that did not pass.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    pub verbose: bool,
}

impl Reporter {
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    #[must_use]
    pub fn to_terminal(&self, reports: &[RunReport]) -> String {
        let mut lines = Vec::new();

        for report in reports {
            let tag = match report.outcome {
                Outcome::Passed if !self.verbose => continue,
                Outcome::Passed => "PASS ",
                Outcome::Failed(_) => "FAIL ",
                Outcome::Errored(_) => "ERROR",
            };
            lines.push(format!("{tag} {}", report.label()));
            if let Some(reason) = report.outcome.reason() {
                for line in reason.trim_end().lines() {
                    if line.is_empty() {
                        lines.push(String::new());
                    } else {
                        lines.push(format!("      {line}"));
                    }
                }
            }
        }

        let summary = Summary::from_reports(reports);
        let verdict = summary.verdict();
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("{}: {}", verdict.status, verdict.reason));
        lines.push(format!(
            "  Tests: {} total, {} passed, {} failed, {} errored",
            summary.total, summary.passed, summary.failed, summary.errored
        ));
        lines.join("\n")
    }

    /// Machine-readable report. Always lists every test.
    #[must_use]
    pub fn to_json(&self, reports: &[RunReport]) -> serde_json::Value {
        let summary = Summary::from_reports(reports);
        let tests: Vec<_> = reports
            .iter()
            .map(|r| {
                let status = match r.outcome {
                    Outcome::Passed => "passed",
                    Outcome::Failed(_) => "failed",
                    Outcome::Errored(_) => "errored",
                };
                json!({
                    "test": r.label(),
                    "method": r.test.method,
                    "url": format!("{}{}", r.test.hostname, r.test.endpoint),
                    "status": status,
                    "reason": r.outcome.reason(),
                })
            })
            .collect();

        json!({
            "verdict": summary.verdict(),
            "summary": summary,
            "tests": tests,
        })
    }
}
