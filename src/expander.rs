//! Resource path templates.

/// Template used when a suite does not configure its own.
pub const DEFAULT_RESOURCE_PATTERN: &str = "testdata/{checker}{method}.java";

const CHECKER_PLACEHOLDER: &str = "{checker}";
const METHOD_PLACEHOLDER: &str = "{method}";
const TEST_PREFIX: &str = "test";

/// Expands a `{checker}` / `{method}` template into a resource path.
///
/// Substitution is literal; the template is responsible for producing a
/// valid path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternExpander {
    template: String,
}

impl PatternExpander {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the template for a checker and a test method.
    ///
    /// A leading `test` is stripped from `method_name` first, so
    /// `testPositiveCases` renders as `PositiveCases`.
    pub fn expand(&self, checker_name: &str, method_name: &str) -> String {
        let method_name = method_name.strip_prefix(TEST_PREFIX).unwrap_or(method_name);
        // Placeholders are only searched for in the template, never in
        // substituted values.
        let mut output = String::with_capacity(self.template.len() + checker_name.len());
        let mut rest = self.template.as_str();
        loop {
            let checker_at = rest.find(CHECKER_PLACEHOLDER);
            let method_at = rest.find(METHOD_PLACEHOLDER);
            let (pos, placeholder, value) = match (checker_at, method_at) {
                (Some(c), Some(m)) if m < c => (m, METHOD_PLACEHOLDER, method_name),
                (Some(c), _) => (c, CHECKER_PLACEHOLDER, checker_name),
                (None, Some(m)) => (m, METHOD_PLACEHOLDER, method_name),
                (None, None) => break,
            };
            output.push_str(&rest[..pos]);
            output.push_str(value);
            rest = &rest[pos + placeholder.len()..];
        }
        output.push_str(rest);
        output
    }
}

impl Default for PatternExpander {
    fn default() -> Self {
        Self::new(DEFAULT_RESOURCE_PATTERN)
    }
}
