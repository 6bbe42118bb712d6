//! Rich rendering of verification failures and suite summaries.

use crate::diagnostic::{describe, Diagnostic};
use crate::errors::BugmarkError;
use crate::runner::SuiteResult;
use crate::verify::{Failure, VerifyReport};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Format one failure with the offending source line and the diagnostics
/// reported on it.
pub fn format_failure(report: &VerifyReport, failure: &Failure) -> String {
    let mut output = String::new();
    let line = failure.line();

    writeln!(output, "\nFAIL: {}:{}", report.source, line).unwrap();
    writeln!(output).unwrap();

    let on_line: Vec<&Diagnostic> = report
        .diagnostics
        .iter()
        .filter(|d| d.source == report.source && d.line == line)
        .collect();

    let gutter = line.to_string().len();
    match line.checked_sub(1).and_then(|idx| report.lines.get(idx)) {
        Some(text) => {
            writeln!(output, "  {} | {}", line, text).unwrap();
            for diagnostic in &on_line {
                let prefix = column_prefix(text, diagnostic.column);
                writeln!(
                    output,
                    "  {} | {}╰ {}",
                    " ".repeat(gutter),
                    " ".repeat(prefix),
                    diagnostic.message.replace('\n', "\\n")
                )
                .unwrap();
            }
        }
        None => {
            writeln!(output, "  {} | <past end of fixture>", line).unwrap();
        }
    }
    writeln!(output).unwrap();

    writeln!(output, "  {}", failure).unwrap();

    if let Some(hint) = generate_hint(report, failure) {
        writeln!(output).unwrap();
        writeln!(output, "  hint: {}", hint).unwrap();
    }

    writeln!(output).unwrap();
    for dump_line in describe(&report.diagnostics).lines() {
        writeln!(output, "  {}", dump_line).unwrap();
    }

    output
}

/// Display width of the text before 1-based `column`.
fn column_prefix(text: &str, column: usize) -> usize {
    let byte_end = text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(text.len(), |(pos, _)| pos);
    UnicodeWidthStr::width(&text[..byte_end])
}

fn generate_hint(report: &VerifyReport, failure: &Failure) -> Option<String> {
    match failure {
        Failure::MissingPattern { line, pattern } => {
            let elsewhere = report
                .diagnostics
                .iter()
                .find(|d| d.source == report.source && d.line != *line && d.message.contains(pattern.as_str()))?;
            Some(format!(
                "a diagnostic containing this was reported on line {}; markers apply to the first line after the marker block",
                elsewhere.line
            ))
        }
        Failure::MissingTag { tag, .. } => Some(format!(
            "diagnostics on marked lines must mention the check as [{}]",
            tag
        )),
        Failure::Unexpected { .. } => Some(
            "add a `// BUG: Diagnostic contains:` marker above this line if the diagnostic is intended"
                .to_string(),
        ),
    }
}

/// Format every failure of an error returned by the runner.
///
/// Errors other than verification failures render as their message.
pub fn format_error(method: &str, err: &BugmarkError) -> String {
    match err {
        BugmarkError::Verification(failures) => {
            let mut output = String::new();
            for report in &failures.reports {
                for failure in &report.failures {
                    output.push_str(&format_failure(report, failure));
                }
            }
            output
        }
        other => format!("\nERROR: {}\n\n  {}\n", method, other),
    }
}

/// Format a one-block summary of a suite run.
pub fn format_summary(result: &SuiteResult) -> String {
    let mut output = String::new();

    let status = if result.success() { "PASS" } else { "FAIL" };

    writeln!(output, "\n{}: {} test cases", status, result.total()).unwrap();
    writeln!(
        output,
        "  {} passed, {} failed, {} errored",
        result.passed(),
        result.failed(),
        result.errored()
    )
    .unwrap();
    for outcome in &result.outcomes {
        if outcome.result.is_err() {
            writeln!(output, "  - {}", outcome.method).unwrap();
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;
    use crate::verify::verify;

    fn fixture() -> Fixture {
        Fixture::inline(
            "A.java",
            vec![
                "class A {",
                "  // BUG: Diagnostic contains: c(A, D)",
                "  B c(D d) {",
                "    return null;",
                "  }",
                "}",
            ],
        )
    }

    #[test]
    fn test_format_missing_pattern() {
        let diagnostics = vec![Diagnostic::new("A.java", 3, 5, "[Ambiguous] c(A,X)")];
        let report = verify(&fixture(), &diagnostics, None).unwrap();
        let output = format_failure(&report, &report.failures[0]);
        insta::assert_snapshot!(output.trim(), @r###"
        FAIL: A.java:3

          3 |   B c(D d) {
            |     ╰ [Ambiguous] c(A,X)

          Did not see an error on line 3 containing c(A, D)

          Diagnostics:
            [A.java:3:5]	[Ambiguous] c(A,X)
        "###);
    }

    #[test]
    fn test_hint_for_misplaced_marker() {
        let diagnostics = vec![Diagnostic::new("A.java", 4, 5, "same as: c(A, D)")];
        let report = verify(&fixture(), &diagnostics, None).unwrap();
        let output = format_failure(&report, &report.failures[0]);
        assert!(output.contains("FAIL: A.java:3"));
        assert!(output.contains("hint: a diagnostic containing this was reported on line 4"));
    }

    #[test]
    fn test_format_unexpected_includes_dump() {
        let diagnostics = vec![
            Diagnostic::new("A.java", 3, 5, "c(A, D)"),
            Diagnostic::new("A.java", 5, 3, "stray"),
        ];
        let report = verify(&fixture(), &diagnostics, None).unwrap();
        assert_eq!(report.failures, vec![Failure::Unexpected { line: 5 }]);

        let output = format_failure(&report, &report.failures[0]);
        assert!(output.contains("  5 |   }"));
        assert!(output.contains("╰ stray"));
        assert!(output.contains("Saw unexpected error on line 5"));
        assert!(output.contains("  Diagnostics:\n    [A.java:3:5]\tc(A, D)\n    [A.java:5:3]\tstray\n"));
    }

    #[test]
    fn test_column_prefix_uses_display_width() {
        assert_eq!(column_prefix("abc", 1), 0);
        assert_eq!(column_prefix("abc", 3), 2);
        assert_eq!(column_prefix("日本x", 3), 4);
        assert_eq!(column_prefix("ab", 10), 2);
    }

    #[test]
    fn test_format_error_for_config() {
        let err = BugmarkError::Config {
            message: "bad".to_string(),
        };
        let output = format_error("positive", &err);
        assert!(output.contains("ERROR: positive"));
        assert!(output.contains("invalid test declaration: bad"));
    }
}
