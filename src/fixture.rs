//! Fixtures and the declarations that describe them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a fixture's content came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FixtureOrigin {
    /// Lines written directly in the test declaration.
    Inline,
    /// Content loaded from a resource resolved by name.
    Resource,
}

/// One unit of source input handed to the harness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fixture {
    /// Virtual path; diagnostics refer to the fixture by this path.
    pub path: String,
    /// Source lines, without line terminators.
    pub lines: Vec<String>,
    pub origin: FixtureOrigin,
}

impl Fixture {
    pub fn inline<I, S>(path: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            lines: lines.into_iter().map(Into::into).collect(),
            origin: FixtureOrigin::Inline,
        }
    }

    /// Build a resource fixture from file content, splitting it into lines.
    pub fn from_resource(path: impl Into<String>, content: &str) -> Self {
        Self {
            path: path.into(),
            lines: content.lines().map(str::to_string).collect(),
            origin: FixtureOrigin::Resource,
        }
    }

    /// Line `number` (1-based), if it exists.
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }
}

/// Name of the checker under test.
///
/// Selects the analysis engine and fills the `{checker}` placeholder of a
/// resource template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CheckerIdentity(String);

impl CheckerIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CheckerIdentity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// How to obtain one fixture.
///
/// Either both `path` and `lines` are given (inline), or neither is and the
/// content is loaded by resource convention. Anything else is rejected when
/// the test case runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixtureDescriptor {
    pub path: Option<String>,
    pub lines: Vec<String>,
}

impl FixtureDescriptor {
    pub fn inline<I, S>(path: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: Some(path.into()),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Load the fixture from the resource named by the suite's template.
    pub fn resource() -> Self {
        Self::default()
    }

    fn has_path(&self) -> bool {
        self.path.as_deref().map_or(false, |p| !p.is_empty())
    }

    /// Classify the descriptor, or `None` if it supplies only one of
    /// path and lines.
    pub fn mode(&self) -> Option<DescriptorMode<'_>> {
        match (self.has_path(), self.lines.is_empty()) {
            (true, false) => Some(DescriptorMode::Inline {
                path: self.path.as_deref().unwrap_or_default(),
                lines: &self.lines,
            }),
            (false, true) => Some(DescriptorMode::Resource),
            _ => None,
        }
    }
}

/// A validated [`FixtureDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorMode<'a> {
    Inline { path: &'a str, lines: &'a [String] },
    Resource,
}

/// Fixtures compiled together for one checker, plus an optional tag every
/// expected diagnostic must carry as `[tag]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestDeclaration {
    pub checker: CheckerIdentity,
    pub fixtures: Vec<FixtureDescriptor>,
    pub required_tag: Option<String>,
}

impl TestDeclaration {
    pub fn new(checker: impl Into<CheckerIdentity>) -> Self {
        Self {
            checker: checker.into(),
            fixtures: Vec::new(),
            required_tag: None,
        }
    }

    pub fn fixture(mut self, descriptor: FixtureDescriptor) -> Self {
        self.fixtures.push(descriptor);
        self
    }

    pub fn inline<I, S>(self, path: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fixture(FixtureDescriptor::inline(path, lines))
    }

    pub fn resource(self) -> Self {
        self.fixture(FixtureDescriptor::resource())
    }

    pub fn require_tag(mut self, tag: impl Into<String>) -> Self {
        self.required_tag = Some(tag.into());
        self
    }

    /// Require the checker's own name as the tag.
    pub fn require_checker_tag(self) -> Self {
        let tag = self.checker.as_str().to_string();
        self.require_tag(tag)
    }
}

/// A named test: the unit the runner executes with one harness run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCase {
    /// Test identity; fills `{method}` in resource templates.
    pub method: String,
    pub declarations: Vec<TestDeclaration>,
}

impl TestCase {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            declarations: Vec::new(),
        }
    }

    pub fn declare(mut self, declaration: TestDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_modes() {
        let inline = FixtureDescriptor::inline("A.java", vec!["class A {}"]);
        assert!(matches!(
            inline.mode(),
            Some(DescriptorMode::Inline { path: "A.java", .. })
        ));
        assert_eq!(FixtureDescriptor::resource().mode(), Some(DescriptorMode::Resource));
    }

    #[test]
    fn test_descriptor_rejects_half_specified() {
        let path_only = FixtureDescriptor {
            path: Some("A.java".to_string()),
            lines: Vec::new(),
        };
        assert_eq!(path_only.mode(), None);

        let lines_only = FixtureDescriptor {
            path: None,
            lines: vec!["class A {}".to_string()],
        };
        assert_eq!(lines_only.mode(), None);

        let empty_path = FixtureDescriptor {
            path: Some(String::new()),
            lines: vec!["class A {}".to_string()],
        };
        assert_eq!(empty_path.mode(), None);
    }

    #[test]
    fn test_fixture_from_resource_splits_lines() {
        let fixture = Fixture::from_resource("testdata/A.java", "class A {\r\n}\n");
        assert_eq!(fixture.lines, vec!["class A {", "}"]);
        assert_eq!(fixture.origin, FixtureOrigin::Resource);
        assert_eq!(fixture.line(2), Some("}"));
        assert_eq!(fixture.line(0), None);
        assert_eq!(fixture.line(3), None);
    }

    #[test]
    fn test_declaration_builder() {
        let declaration = TestDeclaration::new("BadShiftAmount")
            .inline("A.java", vec!["class A {}"])
            .resource()
            .require_checker_tag();
        assert_eq!(declaration.fixtures.len(), 2);
        assert_eq!(declaration.required_tag.as_deref(), Some("BadShiftAmount"));
    }
}
