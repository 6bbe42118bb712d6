//! Error types for declaration, loading, harness and verification failures.

use crate::verify::VerifyFailures;
use thiserror::Error;

/// Errors that end a test case.
///
/// Every variant is a hard failure; nothing here is ever downgraded to a
/// warning.
#[derive(Debug, Error)]
pub enum BugmarkError {
    /// A test declaration is malformed (e.g. a path without lines).
    #[error("invalid test declaration: {message}")]
    Config { message: String },

    /// A resource fixture could not be read.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// A marker block ran to the end of the fixture without a target line.
    #[error("{path}:{line}: marker block has no line after it")]
    Marker { path: String, line: usize },

    /// The analysis run itself failed.
    #[error("harness failed: {source}")]
    Harness {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Diagnostics did not match the markers.
    #[error("{0}")]
    Verification(VerifyFailures),

    /// The suite configuration file could not be read or parsed.
    #[error("failed to read settings {path}: {message}")]
    Settings { path: String, message: String },
}

impl BugmarkError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        BugmarkError::Config {
            message: message.into(),
        }
    }

    pub(crate) fn harness<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        BugmarkError::Harness {
            source: Box::new(source),
        }
    }
}

/// Result type for bugmark operations.
pub type BugmarkResult<T> = Result<T, BugmarkError>;
