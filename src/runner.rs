//! Test case runner: resolves fixtures, runs the harness once, verifies.

use crate::config::SuiteConfig;
use crate::errors::{BugmarkError, BugmarkResult};
use crate::fixture::{CheckerIdentity, DescriptorMode, Fixture, TestCase};
use crate::harness::Harness;
use crate::loader::load_resource;
use crate::verify::{verify, VerifyFailures, VerifyReport};
use tracing::{debug, warn};

/// Outcome of a passing test case.
#[derive(Debug, Clone, Default)]
pub struct CaseReport {
    pub method: String,
    /// One report per verified fixture, in registration order.
    pub fixtures: Vec<VerifyReport>,
}

impl CaseReport {
    pub fn expectation_count(&self) -> usize {
        self.fixtures.iter().map(|r| r.expectations.len()).sum()
    }
}

/// A fixture resolved from a declaration, with the tag it is verified with.
struct Resolved {
    fixture: Fixture,
    required_tag: Option<String>,
}

/// The checker every declaration of `case` is for.
fn case_checker(case: &TestCase) -> BugmarkResult<&CheckerIdentity> {
    let first = case.declarations.first().ok_or_else(|| {
        BugmarkError::config(format!("{}: no test declarations", case.method))
    })?;

    for declaration in &case.declarations {
        if declaration.checker != first.checker {
            return Err(BugmarkError::config(format!(
                "{}: declarations name different checkers ({} and {})",
                case.method, first.checker, declaration.checker
            )));
        }
        if declaration.fixtures.is_empty() {
            return Err(BugmarkError::config(format!(
                "{}: declaration for {} has no fixtures",
                case.method, declaration.checker
            )));
        }
    }
    Ok(&first.checker)
}

/// Validate every descriptor, then resolve them all.
///
/// Validation finishes before any resource is read, so a malformed
/// declaration never half-loads.
fn resolve_fixtures(case: &TestCase, config: &SuiteConfig) -> BugmarkResult<Vec<Resolved>> {
    let checker = case_checker(case)?;

    let mut modes = Vec::new();
    for (decl_idx, declaration) in case.declarations.iter().enumerate() {
        for (idx, descriptor) in declaration.fixtures.iter().enumerate() {
            let mode = descriptor.mode().ok_or_else(|| {
                BugmarkError::config(format!(
                    "{}: declaration #{} fixture #{} ({}) must specify both path and lines, or neither",
                    case.method,
                    decl_idx + 1,
                    idx + 1,
                    descriptor.path.as_deref().unwrap_or("no path")
                ))
            })?;
            modes.push((mode, declaration.required_tag.clone()));
        }
    }

    let expander = config.expander();
    let mut resolved = Vec::with_capacity(modes.len());
    for (mode, required_tag) in modes {
        let fixture = match mode {
            DescriptorMode::Inline { path, lines } => Fixture::inline(path, lines.iter().cloned()),
            DescriptorMode::Resource => {
                let relative = expander.expand(checker.as_str(), &case.method);
                debug!(
                    template = expander.template(),
                    resource = relative.as_str(),
                    "expanded resource path"
                );
                load_resource(&config.resource_root, &relative)?
            }
        };
        resolved.push(Resolved {
            fixture,
            required_tag,
        });
    }
    Ok(resolved)
}

/// Run one test case.
///
/// All fixtures are registered before the harness runs, so a checker can
/// see every file of the case at once. Verification failures from all
/// fixtures are collected into a single [`BugmarkError::Verification`].
pub fn run_test_case<H: Harness>(
    harness: &mut H,
    config: &SuiteConfig,
    case: &TestCase,
) -> BugmarkResult<CaseReport> {
    let resolved = resolve_fixtures(case, config)?;
    debug!(method = case.method.as_str(), fixtures = resolved.len(), "resolved fixtures");

    for entry in &resolved {
        harness.add_fixture(entry.fixture.clone());
    }
    harness.run().map_err(BugmarkError::harness)?;

    let diagnostics = harness.diagnostics();
    let mut reports = Vec::with_capacity(resolved.len());
    for entry in &resolved {
        reports.push(verify(
            &entry.fixture,
            diagnostics,
            entry.required_tag.as_deref(),
        )?);
    }

    if reports.iter().any(|r| !r.passed()) {
        let reports: Vec<VerifyReport> = reports.into_iter().filter(|r| !r.passed()).collect();
        return Err(BugmarkError::Verification(VerifyFailures { reports }));
    }

    Ok(CaseReport {
        method: case.method.clone(),
        fixtures: reports,
    })
}

/// Result of one case within a suite.
#[derive(Debug)]
pub struct CaseOutcome {
    pub method: String,
    pub result: BugmarkResult<CaseReport>,
}

/// Tally of a suite run.
#[derive(Debug, Default)]
pub struct SuiteResult {
    pub outcomes: Vec<CaseOutcome>,
}

impl SuiteResult {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Cases whose diagnostics disagreed with their markers.
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, Err(BugmarkError::Verification(_))))
            .count()
    }

    /// Cases that could not be verified at all.
    pub fn errored(&self) -> usize {
        self.total() - self.passed() - self.failed()
    }

    pub fn success(&self) -> bool {
        self.passed() == self.total()
    }

    /// Get the exit code (0 = pass, 1 = any failure).
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }
}

/// Run every case with a fresh harness from `make_harness`.
///
/// The factory receives the checker the case declares; a case without
/// declarations is recorded as a configuration error without building a
/// harness.
pub fn run_suite<H, F>(mut make_harness: F, config: &SuiteConfig, cases: &[TestCase]) -> SuiteResult
where
    H: Harness,
    F: FnMut(&CheckerIdentity) -> H,
{
    let mut result = SuiteResult::default();
    for case in cases {
        let outcome = case_checker(case).and_then(|checker| {
            let mut harness = make_harness(checker);
            run_test_case(&mut harness, config, case)
        });
        if let Err(err) = &outcome {
            warn!(method = case.method.as_str(), "test case failed: {}", err);
        }
        result.outcomes.push(CaseOutcome {
            method: case.method.clone(),
            result: outcome,
        });
    }
    result
}
