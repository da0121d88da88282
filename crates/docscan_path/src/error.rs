//! Path error types.

use thiserror::Error;

/// Errors that can occur while compiling search paths.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The expression is not a valid search path.
    #[error("Malformed path '{expression}': {message}")]
    Malformed { expression: String, message: String },
}

impl PathError {
    /// Creates a new malformed path error.
    pub fn malformed(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            expression: expression.into(),
            message: message.into(),
        }
    }
}
