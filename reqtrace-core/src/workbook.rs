//! Tabular source: ordered sheets of string cells
//!
//! Spreadsheet files are read once into memory with `calamine`; the rest of
//! the crate only sees [`Workbook`] and [`Sheet`], which tests build directly.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

use crate::error::ExtractError;

/// One worksheet. The first row is the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub title: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(title: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            title: title.into(),
            rows,
        }
    }

    /// Builds a sheet from string slices, handy for tests and fixtures
    pub fn from_rows(title: impl Into<String>, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        Self::new(title, rows)
    }

    pub fn headers(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rows after the header row
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// Sheets in workbook order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Reads every sheet of an .xlsx, .xlsm, .xls or .ods file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let mut reader = open_workbook_auto(path).map_err(|source| ExtractError::WorkbookOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let mut sheets = Vec::new();
        for title in reader.sheet_names() {
            let range = reader
                .worksheet_range(&title)
                .map_err(|source| ExtractError::SheetRead {
                    sheet: title.clone(),
                    source,
                })?;

            let rows: Vec<Vec<String>> = range
                .rows()
                .map(|row| row.iter().map(cell_to_string).collect())
                .collect();

            log::debug!("Read sheet '{}' ({} rows)", title, rows.len());
            sheets.push(Sheet::new(title, rows));
        }

        Ok(Self { sheets })
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
