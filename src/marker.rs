//! Parser for `// BUG: Diagnostic contains:` marker blocks.
//!
//! A marker names text that must appear in a diagnostic reported on the
//! first line after the marker block:
//!
//! ```text
//! // BUG: Diagnostic contains: foo.bar()
//! // bar.baz()
//! callFooBar();
//! ```
//!
//! Here `callFooBar();` must carry diagnostics containing both `foo.bar()`
//! and `bar.baz()`.

use crate::errors::{BugmarkError, BugmarkResult};
use crate::fixture::Fixture;
use serde::{Deserialize, Serialize};

/// Token that opens a marker block.
pub const BUG_MARKER: &str = "// BUG: Diagnostic contains:";

/// Prefix of the lines that continue a marker block.
pub const CONTINUATION: &str = "//";

/// What one marker block requires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expectation {
    pub source: String,
    /// Line the diagnostics must be reported on.
    pub line: usize,
    /// Substrings that must each appear in some diagnostic on `line`.
    pub patterns: Vec<String>,
    /// Line holding the marker token, for error reporting.
    pub marker_line: usize,
}

/// Result of scanning one fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    pub expectations: Vec<Expectation>,
    /// Lines on which no diagnostic may be reported.
    pub quiet_lines: Vec<usize>,
}

/// Scan a fixture for marker blocks.
///
/// Lines are consumed in order; `consumed` is the number read so far. A
/// marker block consumes its continuation lines and the line after them,
/// which becomes the expectation's target. Every other line read marks
/// `consumed + 1` (the line after it) as quiet.
pub fn scan(fixture: &Fixture) -> BugmarkResult<Scan> {
    let lines = &fixture.lines;
    let mut result = Scan::default();
    let mut consumed = 0;

    while consumed < lines.len() {
        let line = &lines[consumed];
        consumed += 1;

        let marker_at = match line.find(BUG_MARKER) {
            Some(pos) => pos,
            None => {
                result.quiet_lines.push(consumed + 1);
                continue;
            }
        };

        let marker_line = consumed;
        let mut patterns = vec![line[marker_at + BUG_MARKER.len()..].trim().to_string()];
        loop {
            let next = lines.get(consumed).ok_or_else(|| BugmarkError::Marker {
                path: fixture.path.clone(),
                line: marker_line,
            })?;
            consumed += 1;

            match next.trim().strip_prefix(CONTINUATION) {
                Some(rest) => patterns.push(rest.trim().to_string()),
                None => break,
            }
        }

        result.expectations.push(Expectation {
            source: fixture.path.clone(),
            line: consumed,
            patterns,
            marker_line,
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(lines: &[&str]) -> Fixture {
        Fixture::inline("A.java", lines.iter().copied())
    }

    #[test]
    fn test_single_marker_targets_next_line() {
        let scan = scan(&fixture(&[
            "class A {",
            "  // BUG: Diagnostic contains: shift",
            "  int x = 1 << 40;",
            "}",
        ]))
        .unwrap();

        assert_eq!(scan.expectations.len(), 1);
        assert_eq!(scan.expectations[0].line, 3);
        assert_eq!(scan.expectations[0].marker_line, 2);
        assert_eq!(scan.expectations[0].patterns, vec!["shift"]);
        assert_eq!(scan.expectations[0].source, "A.java");
    }

    #[test]
    fn test_continuation_lines_add_patterns() {
        let scan = scan(&fixture(&[
            "// BUG: Diagnostic contains: foo.bar()",
            "   //   bar.baz()  ",
            "// baz.foo()",
            "callFooBar();",
        ]))
        .unwrap();

        assert_eq!(scan.expectations[0].line, 4);
        assert_eq!(
            scan.expectations[0].patterns,
            vec!["foo.bar()", "bar.baz()", "baz.foo()"]
        );
    }

    #[test]
    fn test_quiet_lines_are_one_past_the_line_read() {
        let scan = scan(&fixture(&["a", "b", "c"])).unwrap();
        assert!(scan.expectations.is_empty());
        assert_eq!(scan.quiet_lines, vec![2, 3, 4]);
    }

    #[test]
    fn test_target_line_is_not_rescanned() {
        // Lines 1 and 4 are plain; line 3 is the target and is consumed by
        // the block, so it neither marks line 4 quiet nor opens a block.
        let scan = scan(&fixture(&[
            "a",
            "// BUG: Diagnostic contains: x",
            "target // BUG: Diagnostic contains: ignored",
            "d",
        ]))
        .unwrap();

        assert_eq!(scan.expectations.len(), 1);
        assert_eq!(scan.expectations[0].line, 3);
        assert_eq!(scan.quiet_lines, vec![2, 5]);
    }

    #[test]
    fn test_empty_pattern_after_token() {
        let scan = scan(&fixture(&["// BUG: Diagnostic contains:", "x"])).unwrap();
        assert_eq!(scan.expectations[0].patterns, vec![""]);
    }

    #[test]
    fn test_unterminated_block_is_an_error() {
        let err = scan(&fixture(&["a", "// BUG: Diagnostic contains: x", "// y"])).unwrap_err();
        match err {
            BugmarkError::Marker { path, line } => {
                assert_eq!(path, "A.java");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_fixture() {
        assert_eq!(scan(&fixture(&[])).unwrap(), Scan::default());
    }
}
