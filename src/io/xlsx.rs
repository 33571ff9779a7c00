//! XLSX workbook reading and writing.
//!
//! Reading yields every cell as text, with native date-time cells
//! canonicalized to the ISO textual shape the codec accepts. Writing
//! reproduces the source tool's styling: bold header row, locale-aware
//! number formats on the date columns, auto-filter over the used range.

use crate::codec::{self, DateLocale, DateValue};
use crate::{Error, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Zero-based indices of the date-valued columns (Start Date, End Date,
/// Last Modified).
pub const DATE_COLUMNS: [usize; 3] = [8, 9, 15];

/// Reads all rows of the first worksheet as plain text cells.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for a workbook without worksheets and
/// [`Error::OperationFailed`] on I/O or workbook parse errors.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e| Error::operation("open_workbook", e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::InvalidInput("workbook has no worksheets".to_string()))?
        .map_err(|e| Error::operation("read_worksheet", e))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Excel stores integral numbers as floats; drop the ".0".
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        },
        Data::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|naive| naive.format("%Y-%m-%dT%H:%M:%S+00").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Writes rows (header first) into a new single-sheet workbook.
///
/// The header row is bold. Cells in the date columns are written as native
/// date-times with the locale-selected display format when their text
/// parses as a date, and as literal text otherwise. The used range gets an
/// auto-filter.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] on workbook construction or save
/// errors.
#[allow(clippy::cast_possible_truncation)]
pub fn write_rows(
    path: &Path,
    sheet_name: &str,
    rows: &[Vec<String>],
    locale: DateLocale,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| Error::operation("name_worksheet", e))?;

    let bold = Format::new().set_bold();
    let mut max_cols = 0usize;

    for (r, row) in rows.iter().enumerate() {
        max_cols = max_cols.max(row.len());
        for (c, cell) in row.iter().enumerate() {
            let (row_idx, col_idx) = (r as u32, c as u16);
            if r == 0 {
                worksheet
                    .write_with_format(row_idx, col_idx, cell, &bold)
                    .map_err(|e| Error::operation("write_header_cell", e))?;
            } else if DATE_COLUMNS.contains(&c) {
                write_date_cell(worksheet, row_idx, col_idx, cell, locale)?;
            } else {
                worksheet
                    .write(row_idx, col_idx, cell)
                    .map_err(|e| Error::operation("write_cell", e))?;
            }
        }
    }

    if !rows.is_empty() && max_cols > 0 {
        worksheet
            .autofilter(0, 0, (rows.len() - 1) as u32, (max_cols - 1) as u16)
            .map_err(|e| Error::operation("set_autofilter", e))?;
    }

    workbook
        .save(path)
        .map_err(|e| Error::operation("save_workbook", e))?;
    Ok(())
}

fn write_date_cell(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    cell: &str,
    locale: DateLocale,
) -> Result<()> {
    match codec::parse_date_time(cell) {
        DateValue::Timestamp(ts) => {
            let format = codec::display_number_format(cell, locale)
                .map_or_else(Format::new, |f| Format::new().set_num_format(f));
            let naive = ts.naive_utc();
            worksheet
                .write_datetime_with_format(row, col, &naive, &format)
                .map_err(|e| Error::operation("write_date_cell", e))?;
        },
        DateValue::Raw(raw) => {
            if !raw.is_empty() {
                worksheet
                    .write(row, col, raw)
                    .map_err(|e| Error::operation("write_cell", e))?;
            }
        },
    }
    Ok(())
}
