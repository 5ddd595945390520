//! Streaming `.xlsx` output.
//!
//! Rows are appended page by page while the export runs; nothing reaches disk
//! until [`SheetWriter::finish`], so a failed export never leaves a partial
//! file behind.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use shopex_core::ColumnSelection;

use crate::error::ExportError;
use crate::rows::{CellValue, ExportRow};

pub const SHEET_NAME: &str = "Products";

/// Data rows available below the header.
const MAX_DATA_ROWS: u32 = 1_048_575;

/// Result of a saved export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: u32,
}

pub struct SheetWriter {
    path: PathBuf,
    columns: ColumnSelection,
    worksheet: Worksheet,
    rows: u32,
    max_rows: u32,
}

impl SheetWriter {
    /// Prepares a sheet for `path` with a bold, frozen header row.
    ///
    /// `.xlsx` is appended when `path` has a different extension or none.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingOutputDir`] if the parent directory does
    /// not exist, or [`ExportError::Xlsx`] if the header cannot be written.
    pub fn create(path: &Path, columns: ColumnSelection) -> Result<Self, ExportError> {
        let path = with_xlsx_extension(path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(ExportError::MissingOutputDir(parent.to_path_buf()));
            }
        }

        let mut worksheet = Worksheet::new();
        worksheet.set_name(SHEET_NAME)?;
        let bold = Format::new().set_bold();
        for (col, column) in (0u16..).zip(columns.columns()) {
            worksheet.write_string_with_format(0, col, column.header(), &bold)?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        Ok(Self {
            path,
            columns,
            worksheet,
            rows: 0,
            max_rows: MAX_DATA_ROWS,
        })
    }

    /// Lowers the data-row cap below the sheet maximum.
    #[must_use]
    pub fn with_max_rows(mut self, max_rows: u32) -> Self {
        self.max_rows = max_rows.min(MAX_DATA_ROWS);
        self
    }

    /// Data rows written so far.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Writes `rows` below the rows already written.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::RowLimit`] when the sheet is full, or
    /// [`ExportError::Xlsx`] on a write failure.
    pub fn append(&mut self, rows: &[ExportRow]) -> Result<(), ExportError> {
        for row in rows {
            if self.rows >= self.max_rows {
                return Err(ExportError::RowLimit {
                    max_rows: self.max_rows,
                });
            }
            let sheet_row = self.rows + 1;
            for (col, column) in (0u16..).zip(self.columns.columns()) {
                match row.cell(*column) {
                    CellValue::Text(s) => {
                        self.worksheet.write_string(sheet_row, col, s)?;
                    }
                    CellValue::Number(n) => {
                        self.worksheet.write_number(sheet_row, col, n)?;
                    }
                    CellValue::Bool(b) => {
                        self.worksheet.write_boolean(sheet_row, col, b)?;
                    }
                    CellValue::Empty => {}
                }
            }
            self.rows += 1;
        }
        Ok(())
    }

    /// Autofits the columns and saves the workbook.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NoData`] (and writes nothing) when no data rows
    /// were appended, or [`ExportError::Xlsx`] if saving fails.
    pub fn finish(self) -> Result<ExportSummary, ExportError> {
        if self.rows == 0 {
            return Err(ExportError::NoData);
        }

        let mut worksheet = self.worksheet;
        worksheet.autofit();

        let mut workbook = Workbook::new();
        workbook.push_worksheet(worksheet);
        workbook.save(&self.path)?;

        tracing::info!(path = %self.path.display(), rows = self.rows, "spreadsheet saved");
        Ok(ExportSummary {
            path: self.path,
            rows: self.rows,
        })
    }
}

fn with_xlsx_extension(path: &Path) -> PathBuf {
    let has_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    if has_xlsx {
        path.to_path_buf()
    } else {
        let mut raw = path.as_os_str().to_owned();
        raw.push(".xlsx");
        PathBuf::from(raw)
    }
}
