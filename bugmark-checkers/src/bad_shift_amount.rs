//! Flags 32-bit shifts by a distance outside `0..=31`.

use crate::java::{column_of, strip_line_comment};
use bugmark::{Checker, CheckerError, Diagnostic, Fixture};
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

pub const NAME: &str = "BadShiftAmount";

/// Java masks an `int` shift distance to its low five bits, so shifting
/// by 32 or more (or by a negative amount) almost never does what was
/// meant.
///
/// The left operand counts as `int` when it is an integer literal without
/// an `L` suffix, or an identifier declared `int` or `Integer` anywhere in
/// the same fixture.
#[derive(Debug)]
pub struct BadShiftAmount {
    shift_regex: Regex,
    int_decl_regex: Regex,
}

impl BadShiftAmount {
    pub fn new() -> Self {
        let shift_regex = Regex::new(r"(\w+)\s*(<<|>>>|>>)\s*(-?\d+)\b")
            .expect("Invalid shift regex");
        let int_decl_regex =
            Regex::new(r"\b(?:int|Integer)\s+(\w+)").expect("Invalid int declaration regex");

        Self {
            shift_regex,
            int_decl_regex,
        }
    }

    fn int_names<'a>(&self, lines: &'a [String]) -> HashSet<&'a str> {
        lines
            .iter()
            .flat_map(|line| self.int_decl_regex.captures_iter(strip_line_comment(line)))
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    fn is_int_operand(operand: &str, int_names: &HashSet<&str>) -> bool {
        if operand.starts_with(|c: char| c.is_ascii_digit()) {
            !operand.ends_with(|c| c == 'L' || c == 'l')
        } else {
            int_names.contains(operand)
        }
    }

    fn check_fixture(&self, fixture: &Fixture) -> Result<Vec<Diagnostic>, CheckerError> {
        let int_names = self.int_names(&fixture.lines);
        let mut diagnostics = Vec::new();

        for (idx, line) in fixture.lines.iter().enumerate() {
            let code = strip_line_comment(line);
            for caps in self.shift_regex.captures_iter(code) {
                let (operand, operator, amount) = match (caps.get(1), caps.get(2), caps.get(3)) {
                    (Some(a), Some(b), Some(c)) => (a.as_str(), b, c.as_str()),
                    _ => continue,
                };
                if !Self::is_int_operand(operand, &int_names) {
                    continue;
                }

                let amount: i64 = amount.parse().map_err(|_| CheckerError::Source {
                    path: fixture.path.clone(),
                    line: idx + 1,
                    message: format!("shift distance out of range: {}", amount),
                })?;
                if (0..=31).contains(&amount) {
                    continue;
                }

                diagnostics.push(Diagnostic::new(
                    fixture.path.as_str(),
                    idx + 1,
                    column_of(line, operator.start()),
                    format!(
                        "[{}] A 32-bit value is shifted by {} bits; shift distance is masked to {}",
                        NAME,
                        amount,
                        amount.rem_euclid(32)
                    ),
                ));
            }
        }
        Ok(diagnostics)
    }
}

impl Default for BadShiftAmount {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for BadShiftAmount {
    fn name(&self) -> &str {
        NAME
    }

    fn check(&self, fixtures: &[Fixture]) -> Result<Vec<Diagnostic>, CheckerError> {
        let mut diagnostics = Vec::new();
        for fixture in fixtures {
            let found = self.check_fixture(fixture)?;
            debug!(path = fixture.path.as_str(), found = found.len(), "checked fixture");
            diagnostics.extend(found);
        }
        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> Vec<Diagnostic> {
        BadShiftAmount::new()
            .check(&[Fixture::inline("A.java", lines.iter().copied())])
            .unwrap()
    }

    #[test]
    fn test_literal_shift_by_40() {
        let diagnostics = run(&["long r = 1 << 40;"]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 1);
        assert_eq!(diagnostics[0].column, 12);
        assert_eq!(
            diagnostics[0].message,
            "[BadShiftAmount] A 32-bit value is shifted by 40 bits; shift distance is masked to 8"
        );
    }

    #[test]
    fn test_negative_distance_masks_to_31() {
        let diagnostics = run(&["int x = 0;", "x = x >>> -1;"]);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("shifted by -1 bits"));
        assert!(diagnostics[0].message.ends_with("masked to 31"));
    }

    #[test]
    fn test_long_operands_ignored() {
        assert!(run(&["long y = 0L;", "y = y << 40;", "y = 1L << 40;"]).is_empty());
    }

    #[test]
    fn test_in_range_and_comments_ignored() {
        assert!(run(&["int x = 0;", "x = x >> 31;", "x = x << 0; // 1 << 40"]).is_empty());
    }
}
