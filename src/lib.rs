#![doc(
    issue_tracker_base_url = "https://github.com/storyscript/bugmark/issues/"
)]

//! Marker-driven verification of static-analysis diagnostics.
//!
//! Test cases declare source fixtures whose expected findings are written
//! inline as comments:
//!
//! ```text
//! public class A {
//!   // BUG: Diagnostic contains: c(A, D)
//!   B c(D d) {
//! ```
//!
//! The runner hands every fixture of a case to a [`Harness`], runs it once,
//! and checks the reported diagnostics against the markers in both
//! directions: each marked line must carry a diagnostic containing every
//! listed pattern, and unmarked lines must carry none.
//!
//! ## Modules
//!
//! - [`fixture`] - Fixtures, descriptors and test declarations
//! - [`expander`] - Resource path templates (`testdata/{checker}{method}.java`)
//! - [`marker`] - Parses marker blocks into expectations
//! - [`verify`] - Checks expectations against diagnostics
//! - [`diagnostic`] - Diagnostics and predicates for querying them
//! - [`harness`] - The harness and checker seams
//! - [`runner`] - Runs test cases and suites
//! - [`formatter`] - Rich failure formatting
//! - [`config`] - Suite settings loaded from TOML
//! - [`errors`] - Error types

pub mod config;
pub mod diagnostic;
pub mod errors;
pub mod expander;
pub mod fixture;
pub mod formatter;
pub mod harness;
pub mod loader;
pub mod marker;
pub mod runner;
pub mod verify;

pub use config::SuiteConfig;
pub use diagnostic::{describe, has_item, Diagnostic, Predicate};
pub use errors::{BugmarkError, BugmarkResult};
pub use expander::{PatternExpander, DEFAULT_RESOURCE_PATTERN};
pub use fixture::{
    CheckerIdentity, DescriptorMode, Fixture, FixtureDescriptor, FixtureOrigin, TestCase,
    TestDeclaration,
};
pub use formatter::{format_error, format_failure, format_summary};
pub use harness::{Checker, CheckerError, CheckerHarness, Harness};
pub use loader::load_resource;
pub use marker::{scan, Expectation, Scan, BUG_MARKER};
pub use runner::{run_suite, run_test_case, CaseOutcome, CaseReport, SuiteResult};
pub use verify::{verify, Failure, VerifyFailures, VerifyReport};
