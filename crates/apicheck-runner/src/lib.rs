//! apicheck-runner: HTTP execution and suite orchestration

pub mod request;
pub mod response;
pub mod runner;
pub mod script;
pub mod suite;

pub use request::{RequestError, build_request};
pub use response::LiveResponse;
pub use runner::{RunnerError, TestRunner};
pub use script::{ScriptError, run_script};
pub use suite::{Suite, SuiteError, SuiteOutcome};
