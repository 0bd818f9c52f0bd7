//! Per-test outcomes and the suite verdict

use serde::Serialize;

use crate::definition::ApiTest;
use crate::verify::VerifyError;

/// Result of running a single test.
#[derive(Debug)]
pub enum Outcome {
    Passed,
    /// The response did not satisfy the expectation, or its body could not
    /// be read or decoded
    Failed(VerifyError),
    /// No response was received (connection refused, timeout, bad request)
    Errored(String),
}

impl Outcome {
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Failure reason, `None` when passed.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Passed => None,
            Self::Failed(e) => Some(e.to_string()),
            Self::Errored(msg) => Some(msg.clone()),
        }
    }
}

/// A test together with its outcome.
#[derive(Debug)]
pub struct RunReport {
    pub test: ApiTest,
    pub outcome: Outcome,
}

impl RunReport {
    #[must_use]
    pub const fn new(test: ApiTest, outcome: Outcome) -> Self {
        Self { test, outcome }
    }

    #[must_use]
    pub fn label(&self) -> String {
        self.test.label()
    }
}

/// Counts over a set of reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl Summary {
    #[must_use]
    pub fn from_reports(reports: &[RunReport]) -> Self {
        reports.iter().fold(Self::default(), |mut s, r| {
            s.total += 1;
            match r.outcome {
                Outcome::Passed => s.passed += 1,
                Outcome::Failed(_) => s.failed += 1,
                Outcome::Errored(_) => s.errored += 1,
            }
            s
        })
    }

    /// PASS iff no test failed or errored. An empty suite passes.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        let status = if self.passed == self.total {
            VerdictStatus::Pass
        } else {
            VerdictStatus::Fail
        };

        let reason = if self.total == 0 {
            "No tests were run".to_string()
        } else if status == VerdictStatus::Pass {
            "All tests passed".to_string()
        } else {
            let mut parts = Vec::new();
            if self.failed > 0 {
                parts.push(format!("{} failed", self.failed));
            }
            if self.errored > 0 {
                parts.push(format!("{} errored (connection/transport)", self.errored));
            }
            parts.join("; ")
        };

        Verdict {
            status,
            exit_code: status.exit_code(),
            reason,
        }
    }
}

/// Final verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub exit_code: i32,
    pub reason: String,
}

/// Pass or fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerdictStatus {
    Pass,
    Fail,
}

impl VerdictStatus {
    /// 0 on pass, 1 on fail. Tool errors (exit 3) never reach a verdict.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Pass => 0,
            Self::Fail => 1,
        }
    }
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}
