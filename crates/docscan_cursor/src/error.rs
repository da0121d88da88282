//! Cursor error types.

use docscan_element::ValueType;
use thiserror::Error;

/// Errors that can occur while moving a cursor or reading its current value.
#[derive(Debug, Error)]
pub enum CursorError {
    /// The input is not a well-formed document.
    #[error("Malformed document: {message}")]
    Malformed {
        /// Error message.
        message: String,
        /// Byte offset where the error occurred.
        offset: Option<usize>,
    },

    /// A symbol token has no known text.
    #[error("Symbol ${sid} has no known text")]
    UnresolvableSymbol { sid: usize },

    /// The current value is not of the requested type.
    #[error("Expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },

    /// The current value does not fit the requested representation.
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// The operation is not valid at the cursor's current position.
    #[error("Invalid cursor state: {0}")]
    InvalidState(String),

    /// The underlying reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CursorError {
    /// Creates a new malformed document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
            offset: None,
        }
    }

    /// Creates a new malformed document error with offset.
    pub fn malformed_at(message: impl Into<String>, offset: usize) -> Self {
        Self::Malformed {
            message: message.into(),
            offset: Some(offset),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(expected: ValueType, found: ValueType) -> Self {
        Self::TypeMismatch { expected, found }
    }

    /// Creates a new out of range error.
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::OutOfRange(message.into())
    }

    /// Creates a new invalid state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}
