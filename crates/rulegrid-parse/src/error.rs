//! Error types for the parsing layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps tokenizer and lopdf failures and converts them to the core
//! [`Error`].

use rulegrid_core::Error;
use thiserror::Error;

/// Error type for content stream and document backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while tokenizing a content stream.
    #[error("content stream error: {0}")]
    Interpreter(String),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] Error),
}

impl From<BackendError> for Error {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => Error::ParseError(msg),
            BackendError::Io(e) => Error::IoError(e.to_string()),
            BackendError::Interpreter(msg) => Error::InterpreterError(msg),
            BackendError::Core(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_parse() {
        let err = BackendError::Parse("invalid xref table".to_string());
        assert_eq!(err.to_string(), "PDF parse error: invalid xref table");
    }

    #[test]
    fn backend_error_io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BackendError = io_err.into();
        assert!(matches!(err, BackendError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn backend_error_to_core_interpreter() {
        let core: Error = BackendError::Interpreter("unterminated array".to_string()).into();
        assert_eq!(
            core,
            Error::InterpreterError("unterminated array".to_string())
        );
    }

    #[test]
    fn backend_error_core_passthrough() {
        let original = Error::PageOutOfRange {
            index: 4,
            page_count: 2,
        };
        let backend: BackendError = original.clone().into();
        assert_eq!(backend.to_string(), original.to_string());
        let core: Error = backend.into();
        assert_eq!(core, original);
    }
}
