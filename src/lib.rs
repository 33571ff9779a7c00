//! # Enterprise Bookmarks Manager
//!
//! Converts SharePoint "Enterprise Bookmark" exports between their two
//! flat-file representations: a delimited CSV format and an Excel workbook.
//!
//! The interesting part of the crate is the validation engine: every column
//! of a bookmark row has type-specific parsing and normalization, records
//! carry cross-field invariants (scheduled bookmarks need a start date, end
//! dates may not lie in the past), and the collection layer enforces
//! keyword-namespace disjointness and title/state uniqueness across a whole
//! batch.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ebm::convert::{excel_to_csv, ConvertOptions};
//! use ebm::lookup::Lookups;
//!
//! let lookups = Lookups::default();
//! let report = excel_to_csv("bookmarks.xlsx".as_ref(), &lookups, &ConvertOptions::default())?;
//! println!("wrote {:?}", report.outputs);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

// Module declarations
pub mod codec;
pub mod convert;
pub mod io;
pub mod lookup;
pub mod models;

// Re-exports for convenience
pub use codec::{DateLocale, DateValue};
pub use convert::{ConvertOptions, ConvertReport, FailurePolicy};
pub use lookup::Lookups;
pub use models::{Bookmark, BookmarkInput, BookmarkShelf, FieldId, Reason, State, ValidationError};

/// Error type for conversion operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Validation` | A bookmark record or shelf insert fails a validation rule |
/// | `InvalidInput` | Header mismatch, unsupported file format, empty workbook |
/// | `OperationFailed` | Filesystem, CSV, or workbook I/O errors |
/// | `NotFound` | A shelf lookup for an unknown key |
#[derive(Debug, ThisError)]
pub enum Error {
    /// A record or collection validation rule failed.
    ///
    /// Carries the structured [`ValidationError`] naming the offending
    /// field and record title (or keyword, for collection rules).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - The CSV header row does not match the expected column labels
    /// - The input file has an unsupported extension
    /// - A workbook contains no worksheets
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An I/O operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A shelf key was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Wraps a lower-level error as an [`Error::OperationFailed`].
    #[must_use]
    pub fn operation(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::operation("save_workbook", "disk full");
        assert_eq!(err.to_string(), "operation 'save_workbook' failed: disk full");

        let err = Error::NotFound("abc".to_string());
        assert_eq!(err.to_string(), "not found: abc");
    }
}
