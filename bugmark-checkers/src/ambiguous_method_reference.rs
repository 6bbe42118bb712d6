//! Flags overloads whose method references resolve to the same shape.
//!
//! `A::c` can name both an instance method `c(D)` of `A` and a static
//! method `c(A, D)`; either fits a `BiFunction<A, D, _>`, so callers passing
//! the reference get whichever overload the compiler picks.

use crate::java::{brace_depths, column_of, param_type, split_params, strip_line_comment};
use bugmark::{Checker, CheckerError, Diagnostic, Fixture};
use regex::Regex;
use tracing::{debug, trace};

pub const NAME: &str = "AmbiguousMethodReference";

const NOT_A_RETURN_TYPE: &[&str] = &["return", "new", "throw", "else", "case"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Method {
    name: String,
    params: Vec<String>,
    is_static: bool,
    /// 1-based.
    line: usize,
    column: usize,
    suppressed: bool,
}

impl Method {
    /// Parameter types of the reference `Type::name`.
    fn shape(&self, owner: &str) -> Vec<String> {
        let mut shape = Vec::with_capacity(self.params.len() + 1);
        if !self.is_static {
            shape.push(owner.to_string());
        }
        shape.extend(self.params.iter().cloned());
        shape
    }

    fn signature(&self) -> String {
        format!("{}({})", self.name, self.params.join(", "))
    }
}

#[derive(Debug)]
pub struct AmbiguousMethodReference {
    type_regex: Regex,
    method_regex: Regex,
}

impl AmbiguousMethodReference {
    pub fn new() -> Self {
        let type_regex = Regex::new(r"\b(?:class|interface|enum|record)\s+(\w+)")
            .expect("Invalid type declaration regex");
        let method_regex = Regex::new(
            r"^\s*(?P<mods>(?:(?:public|protected|private|static|final|abstract|synchronized|default|native|strictfp)\s+)*)(?:<[^()]*>\s+)?(?P<ret>[\w.?]+(?:<[^()]*>)?(?:\[\])*)\s+(?P<name>\w+)\s*\((?P<params>[^)]*)\)",
        )
        .expect("Invalid method declaration regex");

        Self {
            type_regex,
            method_regex,
        }
    }

    fn is_suppression(line: &str) -> bool {
        let line = line.trim();
        line.starts_with("@SuppressWarnings") && line.contains(NAME)
    }

    /// Whether an annotation directly above `idx` suppresses this check.
    /// Comment lines between the annotations and the method are skipped.
    fn suppressed_at_method(lines: &[String], idx: usize) -> bool {
        lines[..idx]
            .iter()
            .rev()
            .map(|l| l.trim())
            .take_while(|l| l.starts_with('@') || l.starts_with("//"))
            .any(Self::is_suppression)
    }

    /// Index and name of the first top-level type declaration.
    fn top_level_type<'a>(&self, lines: &'a [String], depths: &[usize]) -> Option<(usize, &'a str)> {
        lines.iter().enumerate().find_map(|(idx, line)| {
            if depths[idx] != 0 {
                return None;
            }
            self.type_regex
                .captures(strip_line_comment(line))
                .and_then(|caps| caps.get(1))
                .map(|m| (idx, m.as_str()))
        })
    }

    fn methods(&self, lines: &[String], depths: &[usize]) -> Vec<Method> {
        let mut methods = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            if depths[idx] != 1 {
                continue;
            }
            let code = strip_line_comment(line);
            let caps = match self.method_regex.captures(code) {
                Some(caps) => caps,
                None => continue,
            };
            let (mods, ret, name, params) = match (
                caps.name("mods"),
                caps.name("ret"),
                caps.name("name"),
                caps.name("params"),
            ) {
                (Some(m), Some(r), Some(n), Some(p)) => (m, r, n, p),
                _ => continue,
            };
            if NOT_A_RETURN_TYPE.contains(&ret.as_str()) {
                continue;
            }

            let method = Method {
                name: name.as_str().to_string(),
                params: split_params(params.as_str())
                    .into_iter()
                    .map(param_type)
                    .collect(),
                is_static: mods.as_str().split_whitespace().any(|m| m == "static"),
                line: idx + 1,
                column: column_of(line, name.start()),
                suppressed: Self::suppressed_at_method(lines, idx),
            };
            trace!(signature = method.signature().as_str(), line = method.line, "found method");
            methods.push(method);
        }
        methods
    }

    fn check_fixture(&self, fixture: &Fixture) -> Vec<Diagnostic> {
        let lines = &fixture.lines;
        let depths = brace_depths(lines);

        let (type_idx, owner) = match self.top_level_type(lines, &depths) {
            Some(found) => found,
            None => return Vec::new(),
        };
        if lines[..=type_idx].iter().any(|l| Self::is_suppression(l)) {
            debug!(path = fixture.path.as_str(), "suppressed at type");
            return Vec::new();
        }

        let methods = self.methods(lines, &depths);

        // Groups in first-declaration order.
        let mut groups: Vec<((&str, Vec<String>), Vec<&Method>)> = Vec::new();
        for method in &methods {
            let key = (method.name.as_str(), method.shape(owner));
            match groups.iter().position(|(k, _)| *k == key) {
                Some(pos) => groups[pos].1.push(method),
                None => groups.push((key, vec![method])),
            }
        }

        let mut diagnostics = Vec::new();
        for (_, members) in groups.iter().filter(|(_, m)| m.len() > 1) {
            let reported = match members.iter().find(|m| !m.suppressed) {
                Some(reported) => reported,
                None => continue,
            };
            let others: Vec<String> = members
                .iter()
                .filter(|m| m.line != reported.line)
                .map(|m| m.signature())
                .collect();
            diagnostics.push(Diagnostic::new(
                fixture.path.as_str(),
                reported.line,
                reported.column,
                format!(
                    "[{}] This method's reference is ambiguous, its name and functional interface type are the same as: {}",
                    NAME,
                    others.join(", ")
                ),
            ));
        }
        diagnostics
    }
}

impl Default for AmbiguousMethodReference {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for AmbiguousMethodReference {
    fn name(&self) -> &str {
        NAME
    }

    fn check(&self, fixtures: &[Fixture]) -> Result<Vec<Diagnostic>, CheckerError> {
        let mut diagnostics = Vec::new();
        for fixture in fixtures {
            let found = self.check_fixture(fixture);
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
        AmbiguousMethodReference::new()
            .check(&[Fixture::inline("A.java", lines.iter().copied())])
            .unwrap()
    }

    #[test]
    fn test_instance_and_static_overload() {
        let diagnostics = run(&[
            "public class A {",
            "  interface D {}",
            "  B c(D d) {",
            "    return null;",
            "  }",
            "  static B c(A a, D d) {",
            "    return null;",
            "  }",
            "}",
        ]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!((diagnostics[0].line, diagnostics[0].column), (3, 5));
        assert!(diagnostics[0]
            .message
            .starts_with("[AmbiguousMethodReference] This method's reference is ambiguous"));
        assert!(diagnostics[0].message.ends_with("same as: c(A, D)"));
    }

    #[test]
    fn test_method_suppression_reports_next_member() {
        let diagnostics = run(&[
            "public class A {",
            "  @SuppressWarnings(\"AmbiguousMethodReference\")",
            "  B c(D d) { return null; }",
            "  // unrelated",
            "  static B c(A a, D d) { return null; }",
            "}",
        ]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 5);
        assert!(diagnostics[0].message.ends_with("same as: c(D)"));
    }

    #[test]
    fn test_nested_and_statement_lines_ignored() {
        let diagnostics = run(&[
            "public class A {",
            "  interface I {",
            "    void c(A a);",
            "  }",
            "  void c() {",
            "    return foo(x);",
            "  }",
            "  static void c(A a) {}",
            "}",
        ]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 5);
        assert!(diagnostics[0].message.ends_with("same as: c(A)"));
    }

    #[test]
    fn test_generic_static_factory_not_ambiguous() {
        assert!(run(&[
            "public interface B<T> {",
            "  static <T> B<T> f() { return null; }",
            "}",
        ])
        .is_empty());
    }

    #[test]
    fn test_method_regex_skips_keywords() {
        let checker = AmbiguousMethodReference::new();
        let lines: Vec<String> = vec!["class A {", "  return foo(x);", "}"]
            .into_iter()
            .map(String::from)
            .collect();
        let depths = brace_depths(&lines);
        assert!(checker.methods(&lines, &depths).is_empty());
    }
}
