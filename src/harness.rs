//! The seam between the runner and an analysis engine.

use crate::diagnostic::Diagnostic;
use crate::fixture::Fixture;
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Compiles registered fixtures, runs a check over them and exposes what
/// it reported.
pub trait Harness {
    type Error: std::error::Error + Send + Sync + 'static;

    fn add_fixture(&mut self, fixture: Fixture);

    /// Analyze every registered fixture. Called once per test case, after
    /// all fixtures are added.
    fn run(&mut self) -> Result<(), Self::Error>;

    /// Diagnostics from the last run, in the order they were reported.
    fn diagnostics(&self) -> &[Diagnostic];
}

/// Fault raised by a checker or by [`CheckerHarness`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckerError {
    /// Source could not be understood by the checker.
    #[error("{path}:{line}: {message}")]
    Source {
        path: String,
        line: usize,
        message: String,
    },

    /// Two fixtures were registered under one path.
    #[error("duplicate fixture path: {0}")]
    DuplicatePath(String),

    /// The checker failed for a reason unrelated to a specific line.
    #[error("{0}")]
    Internal(String),
}

/// An analysis engine: inspects fixtures and reports diagnostics.
///
/// All fixtures of a test case are passed together so a check can relate
/// declarations across files.
pub trait Checker {
    fn name(&self) -> &str;

    fn check(&self, fixtures: &[Fixture]) -> Result<Vec<Diagnostic>, CheckerError>;
}

impl<C: Checker + ?Sized> Checker for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn check(&self, fixtures: &[Fixture]) -> Result<Vec<Diagnostic>, CheckerError> {
        (**self).check(fixtures)
    }
}

/// [`Harness`] that runs one [`Checker`] over everything registered.
#[derive(Debug)]
pub struct CheckerHarness<C> {
    checker: C,
    fixtures: Vec<Fixture>,
    diagnostics: Vec<Diagnostic>,
}

impl<C: Checker> CheckerHarness<C> {
    pub fn new(checker: C) -> Self {
        Self {
            checker,
            fixtures: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }
}

impl<C: Checker> Harness for CheckerHarness<C> {
    type Error = CheckerError;

    fn add_fixture(&mut self, fixture: Fixture) {
        debug!(path = fixture.path.as_str(), lines = fixture.lines.len(), "registered fixture");
        self.fixtures.push(fixture);
    }

    fn run(&mut self) -> Result<(), CheckerError> {
        let mut seen = HashSet::new();
        for fixture in &self.fixtures {
            if !seen.insert(fixture.path.as_str()) {
                return Err(CheckerError::DuplicatePath(fixture.path.clone()));
            }
        }

        debug!(
            checker = self.checker.name(),
            fixtures = self.fixtures.len(),
            "running checker"
        );
        self.diagnostics = self.checker.check(&self.fixtures)?;
        debug!(diagnostics = self.diagnostics.len(), "checker finished");
        Ok(())
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
