//! Scan error types.

use docscan_cursor::CursorError;
use docscan_path::PathError;
use thiserror::Error;

/// Errors that can occur while scanning or materializing a document.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The cursor or the document builder hit a structural violation.
    #[error("Malformed document: {0}")]
    MalformedDocument(CursorError),

    /// The cursor returned a short chunk without signalling end of object.
    #[error("Incomplete large object read: requested {requested} bytes, read {read}")]
    IncompleteLargeObjectRead { requested: usize, read: usize },

    /// A symbol had to be delivered as text but its text is unknown.
    #[error("Unresolvable symbol token ${sid}")]
    UnresolvableSymbolToken { sid: usize },

    /// The task does not support the requested access pattern.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A decimal does not fit the native decimal representation.
    #[error("Decimal {0} cannot be represented natively")]
    UnrepresentableDecimal(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Search path error.
    #[error(transparent)]
    Path(#[from] PathError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation(operation.into())
    }
}

impl From<CursorError> for ScanError {
    fn from(error: CursorError) -> Self {
        match error {
            CursorError::UnresolvableSymbol { sid } => Self::UnresolvableSymbolToken { sid },
            CursorError::Io(e) => Self::Io(e),
            other => Self::MalformedDocument(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolvable_symbol_is_not_malformed() {
        let err = ScanError::from(CursorError::UnresolvableSymbol { sid: 4 });
        assert!(matches!(err, ScanError::UnresolvableSymbolToken { sid: 4 }));
    }

    #[test]
    fn test_cursor_failures_become_malformed_document() {
        let err = ScanError::from(CursorError::malformed_at("unexpected end", 3));
        assert!(matches!(
            err,
            ScanError::MalformedDocument(CursorError::Malformed { offset: Some(3), .. })
        ));
    }

    #[test]
    fn test_error_display() {
        let err = ScanError::IncompleteLargeObjectRead {
            requested: 1024,
            read: 10,
        };
        assert_eq!(
            err.to_string(),
            "Incomplete large object read: requested 1024 bytes, read 10"
        );
    }
}
