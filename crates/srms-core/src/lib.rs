//! SRMS Core - bulk-import CSV handling for the Student Result Management System
//!
//! This crate turns the text of an uploaded CSV file into a header list and
//! keyed rows, checks the headers against what the chosen bulk operation
//! requires, and builds a bounded preview for display before an import is
//! committed.
//!
//! # Main Components
//!
//! - **CSV parsing**: naive line/comma splitting into [`ParsedCsv`]
//! - **Header validation**: missing and unexpected headers per [`OperationType`]
//! - **Preview**: first rows plus truncation info
//! - **Upload checks**: extension and size admission
//! - **Progress**: bulk-operation status model and poller
//!
//! # Example
//!
//! ```
//! use srms_core::{inspect, HeaderRequirements, OperationType, DEFAULT_PREVIEW_LIMIT};
//!
//! let text = "roll_no,subject_code\nCS01,MA101\n";
//! let report = inspect(
//!     text,
//!     &OperationType::ImportMarks,
//!     &HeaderRequirements::default(),
//!     DEFAULT_PREVIEW_LIMIT,
//! )
//! .unwrap();
//! assert!(!report.validation.valid);
//! assert_eq!(report.preview.total_rows, 1);
//! ```

pub mod csv;
pub mod error;
pub mod operation;
pub mod pipeline;
pub mod preview;
pub mod progress;
pub mod upload;
pub mod validation;

// Re-export main types for convenience
pub use csv::{parse, ParsedCsv, Row};
pub use error::{Error, Result};
pub use operation::{HeaderRequirements, OperationType, MARKS_HEADERS, STUDENT_HEADERS};
pub use pipeline::{inspect, ImportPreview};
pub use preview::{preview, PreviewPayload, DEFAULT_PREVIEW_LIMIT};
pub use progress::{track, BulkOperationStatus, OperationState, StatusSource, POLL_INTERVAL};
pub use upload::{format_file_size, UploadPolicy, DEFAULT_MAX_BYTES};
pub use validation::{validate, ValidationResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_inspect_rejects_empty_text() {
        let result = inspect("", &OperationType::ImportStudents, &HeaderRequirements::default(), 5);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }
}
