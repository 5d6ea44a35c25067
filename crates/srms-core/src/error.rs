//! Error types for the SRMS core library
//!
//! Header mismatches and ragged rows are not errors: they are reported as
//! data by the validator and absorbed by the parser. The variants here cover
//! the few conditions that abort an import preview.

use thiserror::Error;

/// Main error type for SRMS core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The CSV text had no content at all
    #[error("CSV input is empty: no header line found")]
    EmptyInput,

    /// The uploaded file does not carry the accepted extension
    #[error("Unsupported file type for '{file_name}': expected a .{expected} file")]
    UnsupportedFileType { file_name: String, expected: String },

    /// The uploaded file exceeds the size limit
    #[error("File '{file_name}' is {size} bytes, limit is {limit} bytes")]
    FileTooLarge {
        file_name: String,
        size: u64,
        limit: u64,
    },

    /// A bulk-operation status could not be fetched
    #[error("Status fetch failed for operation '{operation_id}': {message}")]
    Status {
        operation_id: String,
        message: String,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl Error {
    /// Build a status fetch error for the given operation
    pub fn status(operation_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Status {
            operation_id: operation_id.into(),
            message: message.into(),
        }
    }

    /// Whether the error rejects the file before it is parsed
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFileType { .. } | Self::FileTooLarge { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::FileTooLarge {
            file_name: "marks.csv".to_string(),
            size: 20,
            limit: 10,
        };
        assert_eq!(
            err.to_string(),
            "File 'marks.csv' is 20 bytes, limit is 10 bytes"
        );
        assert!(err.is_rejection());
        assert!(!Error::EmptyInput.is_rejection());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("gone"));
    }
}
