//! End-to-end conversion tests over real files on disk.
//!
//! Each test builds an input workbook or CSV in a temp directory, runs the
//! conversion driver, and inspects the files it wrote.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use ebm::convert::{csv_to_excel, excel_to_csv, ConvertOptions, FailurePolicy};
use ebm::io::{csv, xlsx};
use ebm::models::column_labels;
use ebm::{Error, Lookups};
use std::path::{Path, PathBuf};

fn labels_row() -> Vec<String> {
    column_labels().iter().map(|&l| l.to_string()).collect()
}

/// A minimal valid data row; keywords are made unique per title so batches
/// never trip the keyword disjointness rules.
fn data_row(title: &str) -> Vec<String> {
    let mut row = vec![String::new(); 18];
    row[0] = title.to_string();
    row[1] = "http://test-rr.de".to_string();
    row[2] = format!("kw {}", title.to_lowercase());
    row
}

fn write_workbook(dir: &Path, rows: &[Vec<String>]) -> PathBuf {
    let path = dir.join("bookmarks.xlsx");
    xlsx::write_rows(&path, "bookmarks", rows, ebm::DateLocale::Us).unwrap();
    path
}

#[test]
fn test_excel_to_csv_writes_one_file_for_a_small_batch() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = vec![labels_row()];
    rows.push(data_row("First"));
    rows.push(data_row("Second"));
    let input = write_workbook(dir.path(), &rows);

    let report = excel_to_csv(&input, &Lookups::default(), &ConvertOptions::default()).unwrap();

    assert_eq!(report.rows_read, 2);
    assert_eq!(report.imported, 2);
    assert!(!report.has_errors());
    assert_eq!(report.outputs, vec![dir.path().join("bookmarks.csv")]);

    let written = csv::read_rows(&report.outputs[0]).unwrap();
    assert_eq!(written.len(), 3);
    assert_eq!(written[0], labels_row());
    assert_eq!(written[1][0], "First");
    assert_eq!(written[1][1], "http://test-rr.de");
}

#[test]
fn test_excel_to_csv_splits_large_batches_into_numbered_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = vec![labels_row()];
    for i in 0..7 {
        rows.push(data_row(&format!("Test {i}")));
    }
    let input = write_workbook(dir.path(), &rows);

    let options = ConvertOptions::default().with_row_limit(3);
    let report = excel_to_csv(&input, &Lookups::default(), &options).unwrap();

    assert_eq!(report.imported, 7);
    assert_eq!(
        report.outputs,
        vec![
            dir.path().join("bookmarks_1.csv"),
            dir.path().join("bookmarks_2.csv"),
            dir.path().join("bookmarks_3.csv"),
        ]
    );
    // 3 + 3 + 1 data rows, each file with its own header.
    assert_eq!(csv::read_rows(&report.outputs[0]).unwrap().len(), 4);
    assert_eq!(csv::read_rows(&report.outputs[1]).unwrap().len(), 4);
    assert_eq!(csv::read_rows(&report.outputs[2]).unwrap().len(), 2);
}

#[test]
fn test_excel_to_csv_skips_blank_rows() {
    let dir = tempfile::tempdir().unwrap();
    let rows = vec![
        labels_row(),
        vec![String::new(); 18],
        data_row("Only"),
        vec![String::new(); 18],
    ];
    let input = write_workbook(dir.path(), &rows);

    let report = excel_to_csv(&input, &Lookups::default(), &ConvertOptions::default()).unwrap();
    assert_eq!(report.rows_read, 1);
    assert_eq!(report.imported, 1);
}

#[test]
fn test_excel_to_csv_fails_fast_on_the_first_invalid_row() {
    let dir = tempfile::tempdir().unwrap();
    let mut bad = data_row("Broken");
    bad[1] = "not a url".to_string();
    let rows = vec![labels_row(), data_row("Fine"), bad];
    let input = write_workbook(dir.path(), &rows);

    let err = excel_to_csv(&input, &Lookups::default(), &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(!dir.path().join("bookmarks.csv").exists());
}

#[test]
fn test_excel_to_csv_collects_all_failures_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut bad_url = data_row("Broken url");
    bad_url[1] = "not a url".to_string();
    let mut bad_country = data_row("Broken country");
    bad_country[10] = "atlantis".to_string();
    let rows = vec![labels_row(), bad_url, data_row("Fine"), bad_country];
    let input = write_workbook(dir.path(), &rows);

    let options = ConvertOptions::default().with_failure_policy(FailurePolicy::CollectAll);
    let report = excel_to_csv(&input, &Lookups::default(), &options).unwrap();

    assert_eq!(report.rows_read, 3);
    let failed_rows: Vec<usize> = report.errors.iter().map(|e| e.row).collect();
    assert_eq!(failed_rows, vec![2, 4]);
    assert!(report.outputs.is_empty());
    assert!(!dir.path().join("bookmarks.csv").exists());
}

#[test]
fn test_excel_to_csv_enforces_batch_rules_across_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = data_row("First");
    first[6] = "reserved word".to_string();
    let mut second = data_row("Second");
    second[2] = "reserved word".to_string();
    let rows = vec![labels_row(), first, second];
    let input = write_workbook(dir.path(), &rows);

    let err = excel_to_csv(&input, &Lookups::default(), &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn test_csv_to_excel_requires_the_exact_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.csv");
    std::fs::write(&path, "Title,Url\nTest,http://test-rr.de/\n").unwrap();

    let err = csv_to_excel(&path, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_csv_to_excel_writes_a_workbook_next_to_the_input() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer =
        ebm::io::RotatingCsvWriter::new(&dir.path().join("bookmarks"), &column_labels(), 3000, 1);
    let mut row = data_row("Test");
    row[8] = "2031-02-20T09:30:00+00".to_string();
    writer.write(&row).unwrap();
    let input = writer.finish().unwrap().remove(0);

    let report = csv_to_excel(&input, &ConvertOptions::default()).unwrap();
    assert_eq!(report.outputs, vec![dir.path().join("bookmarks.xlsx")]);
    assert_eq!(report.imported, 1);

    let rows = xlsx::read_rows(&report.outputs[0]).unwrap();
    assert_eq!(rows[0], labels_row());
    assert_eq!(rows[1][0], "Test");
    // The start date went in as a native date-time cell.
    assert_eq!(rows[1][8], "2031-02-20T09:30:00+00");
}

#[test]
fn test_full_roundtrip_preserves_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut row = data_row("Roundtrip");
    row[4] = "published".to_string();
    row[10] = "de".to_string();
    let input = write_workbook(dir.path(), &[labels_row(), row]);

    let first = excel_to_csv(&input, &Lookups::default(), &ConvertOptions::default()).unwrap();
    let second = csv_to_excel(&first.outputs[0], &ConvertOptions::default()).unwrap();

    // The source workbook still exists, so the new one gets a counter.
    assert_eq!(second.outputs, vec![dir.path().join("bookmarks_(1).xlsx")]);
    let rows = xlsx::read_rows(&second.outputs[0]).unwrap();
    assert_eq!(rows[1][0], "Roundtrip");
    assert_eq!(rows[1][4], "published");
    assert_eq!(rows[1][10], "de");
}
