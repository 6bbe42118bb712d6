//! Diagnostics produced by an analysis run, and predicates for querying them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A finding reported by a checker at a source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Virtual path of the fixture the finding is in.
    pub source: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        source: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            line,
            column,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.source, self.line, self.column, self.message
        )
    }
}

/// Render every diagnostic on its own line as `[source:line:column]\tmessage`.
///
/// Newlines inside messages are escaped so each diagnostic stays on one line.
pub fn describe(diagnostics: &[Diagnostic]) -> String {
    let mut output = String::from("Diagnostics:\n");
    for diagnostic in diagnostics {
        output.push_str(&format!(
            "  [{}:{}:{}]\t{}\n",
            diagnostic.source,
            diagnostic.line,
            diagnostic.column,
            diagnostic.message.replace('\n', "\\n")
        ));
    }
    output
}

/// A boolean test over a diagnostic plus a description for failure reports.
pub struct Predicate {
    description: String,
    test: Box<dyn Fn(&Diagnostic) -> bool>,
}

impl Predicate {
    pub fn new(
        description: impl Into<String>,
        test: impl Fn(&Diagnostic) -> bool + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            test: Box::new(test),
        }
    }

    pub fn matches(&self, diagnostic: &Diagnostic) -> bool {
        (self.test)(diagnostic)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn and(self, other: Predicate) -> Predicate {
        let description = format!("({} and {})", self.description, other.description);
        Predicate::new(description, move |d| self.matches(d) && other.matches(d))
    }

    pub fn or(self, other: Predicate) -> Predicate {
        let description = format!("({} or {})", self.description, other.description);
        Predicate::new(description, move |d| self.matches(d) || other.matches(d))
    }

    pub fn not(self) -> Predicate {
        let description = format!("not {}", self.description);
        Predicate::new(description, move |d| !self.matches(d))
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("description", &self.description)
            .finish()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// A diagnostic in `source` on `line`.
pub fn on_line(source: &str, line: usize) -> Predicate {
    let source = source.to_string();
    Predicate::new(format!("a diagnostic on line {}", line), move |d| {
        d.source == source && d.line == line
    })
}

/// A diagnostic in `source` on `line` whose message contains `text`.
pub fn on_line_containing(source: &str, line: usize, text: &str) -> Predicate {
    let source = source.to_string();
    let text = text.to_string();
    Predicate::new(
        format!("a diagnostic on line {} that contains {:?}", line, text),
        move |d| d.source == source && d.line == line && d.message.contains(&text),
    )
}

/// A diagnostic at exactly `line:column`, in any source.
pub fn at_line_and_column(line: usize, column: usize) -> Predicate {
    Predicate::new(
        format!("a diagnostic on line:column {}:{}", line, column),
        move |d| d.line == line && d.column == column,
    )
}

/// A diagnostic whose message contains `text`.
pub fn message_contains(text: &str) -> Predicate {
    let text = text.to_string();
    Predicate::new(
        format!("a diagnostic with message containing {:?}", text),
        move |d| d.message.contains(&text),
    )
}

/// A diagnostic whose message satisfies an arbitrary test.
pub fn message_matching(
    description: impl Into<String>,
    test: impl Fn(&str) -> bool + 'static,
) -> Predicate {
    Predicate::new(
        format!("a diagnostic with message {}", description.into()),
        move |d| test(&d.message),
    )
}

/// A diagnostic on `line` suggesting that the line be removed.
pub fn suggests_removal_of_line(source: &str, line: usize) -> Predicate {
    on_line(source, line).and(message_contains("remove this line"))
}

/// Whether any diagnostic satisfies `predicate`.
pub fn has_item(diagnostics: &[Diagnostic], predicate: &Predicate) -> bool {
    diagnostics.iter().any(|d| predicate.matches(d))
}
