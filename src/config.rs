//! Suite configuration.

use crate::errors::BugmarkError;
use crate::expander::{PatternExpander, DEFAULT_RESOURCE_PATTERN};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings shared by every test case in a suite.
///
/// Usually loaded from a `bugmark.toml`:
///
/// ```toml
/// resource_pattern = "testdata/{checker}{method}.java"
/// resource_root = "tests"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Template resolving resource fixtures; see [`PatternExpander`].
    pub resource_pattern: String,
    /// Directory expanded resource paths are relative to.
    pub resource_root: PathBuf,
}

impl SuiteConfig {
    pub fn new(resource_root: impl Into<PathBuf>) -> Self {
        Self {
            resource_root: resource_root.into(),
            ..Self::default()
        }
    }

    pub fn with_resource_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.resource_pattern = pattern.into();
        self
    }

    /// Load from a TOML file. A missing file yields the defaults.
    ///
    /// A relative `resource_root` is resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, BugmarkError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| BugmarkError::Settings {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut config: SuiteConfig =
            toml::from_str(&content).map_err(|e| BugmarkError::Settings {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        if config.resource_root.is_relative() {
            if let Some(dir) = path.parent() {
                config.resource_root = dir.join(&config.resource_root);
            }
        }
        Ok(config)
    }

    pub fn expander(&self) -> PatternExpander {
        PatternExpander::new(self.resource_pattern.as_str())
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            resource_pattern: DEFAULT_RESOURCE_PATTERN.to_string(),
            resource_root: PathBuf::from("."),
        }
    }
}
