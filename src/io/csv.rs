//! CSV row reading and rotating output writing.
//!
//! The delimited format carries a UTF-8 BOM on the first header cell (the
//! consumer is Excel) and splits large batches across sequentially numbered
//! files at a fixed row threshold.

use super::paths::save_filename;
use crate::{Error, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Reads all rows of a CSV file as plain text cells.
///
/// The first row is returned like any other (header validation is the
/// driver's concern); a leading UTF-8 BOM is stripped.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] on I/O or CSV parse errors.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::operation("open_csv", e))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::operation("read_csv", e))?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }

    if let Some(first_cell) = rows.first_mut().and_then(|row| row.first_mut()) {
        if let Some(stripped) = first_cell.strip_prefix('\u{feff}') {
            *first_cell = stripped.to_string();
        }
    }
    Ok(rows)
}

/// Writes bookmark rows across one or more CSV files.
///
/// Each file starts with the header row (BOM-prefixed first label). When
/// the batch exceeds the row limit, output rotates to sequentially numbered
/// files (`stem_1.csv`, `stem_2.csv`, ...); otherwise a single `stem.csv`
/// is written. File N+1 is only opened once file N is complete. Names are
/// resolved through [`save_filename`], so existing files are never
/// clobbered.
pub struct RotatingCsvWriter {
    stem: PathBuf,
    labels: Vec<String>,
    limit: usize,
    total: usize,
    rows_in_file: usize,
    files_opened: usize,
    writer: Option<csv::Writer<File>>,
    outputs: Vec<PathBuf>,
}

impl RotatingCsvWriter {
    /// Creates a writer for a batch of `total` rows.
    ///
    /// `stem` is the output path without extension; `limit` is the maximum
    /// number of data rows per file.
    #[must_use]
    pub fn new(stem: &Path, labels: &[&str], limit: usize, total: usize) -> Self {
        Self {
            stem: stem.to_path_buf(),
            labels: labels.iter().map(|&l| l.to_string()).collect(),
            limit: limit.max(1),
            total,
            rows_in_file: 0,
            files_opened: 0,
            writer: None,
            outputs: Vec::new(),
        }
    }

    /// Writes one data row, rotating to a new file when the limit is hit.
    ///
    /// Embedded line breaks are stripped from cells, matching the source
    /// format's one-line-per-record expectation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] on I/O errors.
    pub fn write(&mut self, cells: &[String]) -> Result<()> {
        if self.writer.is_none() || self.rows_in_file == self.limit {
            self.open_next()?;
        }
        let cleaned: Vec<String> = cells
            .iter()
            .map(|cell| cell.replace(['\n', '\r'], ""))
            .collect();
        self.current()?
            .write_record(&cleaned)
            .map_err(|e| Error::operation("write_csv", e))?;
        self.rows_in_file += 1;
        Ok(())
    }

    /// Finishes the batch and returns the written paths.
    ///
    /// An empty batch still produces a single header-only file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] on I/O errors.
    pub fn finish(mut self) -> Result<Vec<PathBuf>> {
        if self.writer.is_none() {
            self.open_next()?;
        }
        self.flush_current()?;
        Ok(self.outputs)
    }

    fn open_next(&mut self) -> Result<()> {
        self.flush_current()?;
        self.files_opened += 1;

        let filename = if self.total > self.limit {
            format!(
                "{}_{}.csv",
                self.stem.file_name().map(|s| s.to_string_lossy()).unwrap_or_default(),
                self.files_opened
            )
        } else {
            format!(
                "{}.csv",
                self.stem.file_name().map(|s| s.to_string_lossy()).unwrap_or_default()
            )
        };
        let path = save_filename(&self.stem.with_file_name(filename));

        let file = File::create(&path).map_err(|e| Error::operation("create_csv", e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        // Excel expects the BOM glued to the first header label.
        let mut header = self.labels.clone();
        if let Some(first) = header.first_mut() {
            *first = format!("\u{feff}{first}");
        }
        writer
            .write_record(&header)
            .map_err(|e| Error::operation("write_csv_header", e))?;

        tracing::debug!(path = %path.display(), "opened output file");
        self.outputs.push(path);
        self.writer = Some(writer);
        self.rows_in_file = 0;
        Ok(())
    }

    fn flush_current(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| Error::operation("flush_csv", e))?;
        }
        Ok(())
    }

    fn current(&mut self) -> Result<&mut csv::Writer<File>> {
        self.writer
            .as_mut()
            .ok_or_else(|| Error::operation("write_csv", "no open output file"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::column_labels;

    fn row(i: usize) -> Vec<String> {
        vec![format!("cell {i}"), "second".to_string()]
    }

    #[test]
    fn test_single_file_below_limit() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("bookmarks");
        let mut writer = RotatingCsvWriter::new(&stem, &["A", "B"], 10, 3);
        for i in 0..3 {
            writer.write(&row(i)).unwrap();
        }
        let outputs = writer.finish().unwrap();
        assert_eq!(outputs, vec![dir.path().join("bookmarks.csv")]);

        let rows = read_rows(&outputs[0]).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec!["A", "B"]);
        assert_eq!(rows[1][0], "cell 0");
    }

    #[test]
    fn test_rotation_above_limit() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("bookmarks");
        let mut writer = RotatingCsvWriter::new(&stem, &["A", "B"], 3, 7);
        for i in 0..7 {
            writer.write(&row(i)).unwrap();
        }
        let outputs = writer.finish().unwrap();
        assert_eq!(
            outputs,
            vec![
                dir.path().join("bookmarks_1.csv"),
                dir.path().join("bookmarks_2.csv"),
                dir.path().join("bookmarks_3.csv"),
            ]
        );
        assert_eq!(read_rows(&outputs[0]).unwrap().len(), 4);
        assert_eq!(read_rows(&outputs[1]).unwrap().len(), 4);
        assert_eq!(read_rows(&outputs[2]).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_batch_writes_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("bookmarks");
        let labels = column_labels();
        let writer = RotatingCsvWriter::new(&stem, &labels, 3000, 0);
        let outputs = writer.finish().unwrap();
        assert_eq!(outputs.len(), 1);
        let rows = read_rows(&outputs[0]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], labels.to_vec());
    }

    #[test]
    fn test_bom_is_written_and_stripped_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("bookmarks");
        let mut writer = RotatingCsvWriter::new(&stem, &["A"], 10, 1);
        writer.write(&["x".to_string()]).unwrap();
        let outputs = writer.finish().unwrap();

        let raw = std::fs::read(&outputs[0]).unwrap();
        assert_eq!(&raw[..3], [0xef, 0xbb, 0xbf]);
        let rows = read_rows(&outputs[0]).unwrap();
        assert_eq!(rows[0][0], "A");
    }

    #[test]
    fn test_line_breaks_are_stripped_from_cells() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("bookmarks");
        let mut writer = RotatingCsvWriter::new(&stem, &["A"], 10, 1);
        writer.write(&["line\r\nbreak".to_string()]).unwrap();
        let outputs = writer.finish().unwrap();
        let rows = read_rows(&outputs[0]).unwrap();
        assert_eq!(rows[1][0], "linebreak");
    }
}
