//! Workbook-to-CSV and CSV-to-workbook conversion drivers.
//!
//! The XLSX-to-CSV direction runs every row through full validation and
//! the batch through the shelf's collection rules; the reverse direction
//! only checks the header, treating the rows as already validated by the
//! service that exported them.

use crate::codec::DateLocale;
use crate::io::{self, RotatingCsvWriter};
use crate::models::{column_labels, Bookmark, BookmarkInput, BookmarkShelf, ValidationError};
use crate::{Error, Lookups, Result};
use std::path::{Path, PathBuf};

/// Maximum number of bookmark rows the service accepts per upload file.
pub const DEFAULT_ROW_LIMIT: usize = 3000;

/// What to do when a row fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the conversion at the first invalid row.
    #[default]
    FailFast,
    /// Validate every row, report all failures, write nothing.
    CollectAll,
}

/// Tunables for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Data rows per output file before rotating to the next one.
    pub row_limit: usize,
    /// Locale driving the date display formats in workbook output.
    pub locale: DateLocale,
    /// Whether invalid rows abort immediately or are collected.
    pub failure_policy: FailurePolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            row_limit: DEFAULT_ROW_LIMIT,
            locale: DateLocale::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ConvertOptions {
    /// Sets the per-file row limit.
    #[must_use]
    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// Sets the date display locale.
    #[must_use]
    pub fn with_locale(mut self, locale: DateLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Sets the failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }
}

/// A validation failure tied to its source row.
#[derive(Debug)]
pub struct RowError {
    /// One-based row number in the input file (the header is row 1).
    pub row: usize,
    /// What went wrong.
    pub error: ValidationError,
}

/// Outcome of a conversion run.
#[derive(Debug, Default)]
pub struct ConvertReport {
    /// Paths written, in order.
    pub outputs: Vec<PathBuf>,
    /// Data rows read from the input (blank rows excluded).
    pub rows_read: usize,
    /// Rows that passed validation and made it into the output.
    pub imported: usize,
    /// Per-row failures (only populated under [`FailurePolicy::CollectAll`]).
    pub errors: Vec<RowError>,
}

impl ConvertReport {
    /// Returns true if any row failed validation.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Converts a service-exported workbook into upload-ready CSV files.
///
/// Every data row is validated as a [`Bookmark`] and inserted into a
/// [`BookmarkShelf`], enforcing the batch-wide uniqueness rules. Output is
/// split across numbered files when the batch exceeds the row limit. If any
/// row fails under [`FailurePolicy::CollectAll`], the report carries the
/// failures and no files are written.
///
/// # Errors
///
/// Returns the first row's [`ValidationError`] under
/// [`FailurePolicy::FailFast`], and [`Error::OperationFailed`] on I/O
/// failures.
pub fn excel_to_csv(
    input: &Path,
    lookups: &Lookups,
    options: &ConvertOptions,
) -> Result<ConvertReport> {
    let rows = io::xlsx::read_rows(input)?;
    let mut report = ConvertReport::default();
    let mut shelf = BookmarkShelf::new();

    // Row 1 is the header; the service export always carries one.
    for (index, row) in rows.iter().enumerate().skip(1) {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        report.rows_read += 1;
        let row_number = index + 1;

        let input_record = BookmarkInput::from_row(row);
        let outcome =
            Bookmark::new(&input_record, lookups).and_then(|bookmark| shelf.add(bookmark));
        if let Err(error) = outcome {
            match options.failure_policy {
                FailurePolicy::FailFast => return Err(error.into()),
                FailurePolicy::CollectAll => {
                    tracing::warn!(row = row_number, %error, "row failed validation");
                    report.errors.push(RowError {
                        row: row_number,
                        error,
                    });
                },
            }
        }
    }

    if report.has_errors() {
        return Ok(report);
    }

    let labels = column_labels();
    let stem = input.with_extension("");
    let mut writer = RotatingCsvWriter::new(&stem, &labels, options.row_limit, shelf.len());
    for (_, bookmark) in shelf.iter() {
        writer.write(&bookmark.to_row())?;
        report.imported += 1;
    }
    report.outputs = writer.finish()?;

    tracing::debug!(
        imported = report.imported,
        files = report.outputs.len(),
        "conversion finished"
    );
    Ok(report)
}

/// Converts an upload-ready CSV file back into a workbook.
///
/// The header row must match the expected column labels exactly; the data
/// rows themselves are copied through without entity validation. Date
/// columns become native date-time cells with the locale's display format.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for a missing or mismatched header and
/// [`Error::OperationFailed`] on I/O failures.
pub fn csv_to_excel(input: &Path, options: &ConvertOptions) -> Result<ConvertReport> {
    let rows = io::csv::read_rows(input)?;

    let labels = column_labels();
    let header_matches = rows
        .first()
        .is_some_and(|header| header.iter().map(String::as_str).eq(labels.iter().copied()));
    if !header_matches {
        return Err(Error::InvalidInput(format!(
            "{} does not carry the expected column header",
            input.display()
        )));
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output = io::save_filename(&input.with_extension("xlsx"));
    io::xlsx::write_rows(&output, &stem, &rows, options.locale)?;

    let rows_read = rows.len() - 1;
    tracing::debug!(path = %output.display(), rows = rows_read, "workbook written");
    Ok(ConvertReport {
        outputs: vec![output],
        rows_read,
        imported: rows_read,
        errors: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert_eq!(options.row_limit, DEFAULT_ROW_LIMIT);
        assert_eq!(options.failure_policy, FailurePolicy::FailFast);
        assert_eq!(options.locale, DateLocale::Us);
    }

    #[test]
    fn test_option_builders() {
        let options = ConvertOptions::default()
            .with_row_limit(5)
            .with_locale(DateLocale::German)
            .with_failure_policy(FailurePolicy::CollectAll);
        assert_eq!(options.row_limit, 5);
        assert_eq!(options.locale, DateLocale::German);
        assert_eq!(options.failure_policy, FailurePolicy::CollectAll);
    }

    #[test]
    fn test_csv_to_excel_rejects_missing_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.csv");
        std::fs::write(&path, "not,a,header\n").unwrap();
        let err = csv_to_excel(&path, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
