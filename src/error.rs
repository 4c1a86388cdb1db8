//! Error types for the guidex library.

use std::io;
use thiserror::Error;

/// Result type alias for guidex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction.
///
/// Per-record ambiguity is never an error: field extractors that fail to
/// match leave the field empty. The variants here cover the collaborator
/// boundaries only (reading a page dump, writing output).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The page dump is missing, truncated, or not valid JSON.
    #[error("Invalid page dump: {0}")]
    Source(String),

    /// Error during rendering (CSV, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Source(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Source("unexpected end of input".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid page dump: unexpected end of input"
        );

        let err = Error::Render("bad row".to_string());
        assert_eq!(err.to_string(), "Rendering error: bad row");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Source(_)));
    }
}
