//! apicheck-core: Test definitions and response verification
//!
//! This crate provides the test definition format, the parser and loader
//! that turn `*.ac.json` files into validated tests, and the verifier that
//! decides whether an HTTP response satisfies a test's expectation.

pub mod config;
pub mod definition;
pub mod descriptor;
pub mod loader;
pub mod matcher;
pub mod parser;
pub mod report;
pub mod schema;
pub mod skeleton;
pub mod verify;

pub use config::{Config, ConfigError};
pub use definition::{ApiRequest, ApiTest, Cookie, Expectation};
pub use descriptor::{ArrayDescriptor, ArrayElement, Descriptor, PrimitiveType, StructureDescriptor};
pub use loader::find_test_definitions;
pub use parser::{ParseError, Parser, ValidationError};
pub use report::{Outcome, RunReport, Summary, Verdict, VerdictStatus};
pub use schema::TestFile;
pub use skeleton::{SkeletonError, create_skeleton_file};
pub use verify::{BufferedResponse, HttpResponse, VerifyError, verify};
