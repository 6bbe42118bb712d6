//! Cross-checks a fixture's markers against collected diagnostics.

use crate::diagnostic::{self, has_item, Diagnostic};
use crate::errors::{BugmarkError, BugmarkResult};
use crate::fixture::Fixture;
use crate::marker::{scan, Expectation};
use std::fmt;
use tracing::trace;

/// A single way in which diagnostics disagree with the markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// No diagnostic on `line` contains `pattern`.
    MissingPattern { line: usize, pattern: String },
    /// No diagnostic on `line` contains `[tag]`.
    MissingTag { line: usize, tag: String },
    /// A diagnostic was reported on a line without a marker.
    Unexpected { line: usize },
}

impl Failure {
    pub fn line(&self) -> usize {
        match self {
            Failure::MissingPattern { line, .. }
            | Failure::MissingTag { line, .. }
            | Failure::Unexpected { line } => *line,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::MissingPattern { line, pattern } => write!(
                f,
                "Did not see an error on line {} containing {}",
                line, pattern
            ),
            Failure::MissingTag { line, tag } => write!(
                f,
                "Did not see an error on line {} containing [{}]",
                line, tag
            ),
            Failure::Unexpected { line } => write!(f, "Saw unexpected error on line {}", line),
        }
    }
}

/// Outcome of verifying one fixture.
///
/// Holds every failure found plus the diagnostics they were checked
/// against, so each failure can be reported with the full dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub source: String,
    /// The fixture's lines, for rendering context around failures.
    pub lines: Vec<String>,
    pub expectations: Vec<Expectation>,
    pub failures: Vec<Failure>,
    pub diagnostics: Vec<Diagnostic>,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Convert into `Err(BugmarkError::Verification)` if anything failed.
    pub fn into_result(self) -> BugmarkResult<VerifyReport> {
        if self.passed() {
            Ok(self)
        } else {
            Err(BugmarkError::Verification(VerifyFailures {
                reports: vec![self],
            }))
        }
    }
}

/// The failing fixture reports of one test case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyFailures {
    pub reports: Vec<VerifyReport>,
}

impl VerifyFailures {
    /// Every failure paired with the path of the fixture it was found in.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Failure)> + '_ {
        self.reports
            .iter()
            .flat_map(|r| r.failures.iter().map(move |f| (r.source.as_str(), f)))
    }
}

impl fmt::Display for VerifyFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, report) in self.reports.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", report)?;
        }
        Ok(())
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dump = diagnostic::describe(&self.diagnostics);
        for (idx, failure) in self.failures.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}. All errors:\n{}", self.source, failure, dump)?;
        }
        Ok(())
    }
}

/// Verify `fixture` against `diagnostics`.
///
/// Every check runs; failures accumulate in the returned report rather than
/// stopping at the first one, and are ordered by line. Only an unterminated
/// marker block is an error.
pub fn verify(
    fixture: &Fixture,
    diagnostics: &[Diagnostic],
    required_tag: Option<&str>,
) -> BugmarkResult<VerifyReport> {
    let scan = scan(fixture)?;
    let source = fixture.path.as_str();
    let mut failures = Vec::new();

    for expectation in &scan.expectations {
        let line = expectation.line;
        for pattern in &expectation.patterns {
            trace!(source, line, pattern = pattern.as_str(), "checking pattern");
            let predicate = diagnostic::on_line_containing(source, line, pattern);
            if !has_item(diagnostics, &predicate) {
                failures.push(Failure::MissingPattern {
                    line,
                    pattern: pattern.clone(),
                });
            }
        }

        if let Some(tag) = required_tag {
            let predicate = diagnostic::on_line_containing(source, line, &format!("[{}]", tag));
            if !has_item(diagnostics, &predicate) {
                failures.push(Failure::MissingTag {
                    line,
                    tag: tag.to_string(),
                });
            }
        }
    }

    for &line in &scan.quiet_lines {
        if has_item(diagnostics, &diagnostic::on_line(source, line)) {
            failures.push(Failure::Unexpected { line });
        }
    }

    failures.sort_by_key(Failure::line);

    Ok(VerifyReport {
        source: source.to_string(),
        lines: fixture.lines.clone(),
        expectations: scan.expectations,
        failures,
        diagnostics: diagnostics.to_vec(),
    })
}
