//! Column lookup for a single sheet
//!
//! Sheets in a requirements workbook do not share a column layout, so every
//! sheet gets its own header-name to index mapping before rows are read.

use std::collections::HashMap;

/// Mapping from header text to zero-based column index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    indices: HashMap<String, usize>,
}

impl ColumnMap {
    /// Builds the mapping from a header row. Empty header cells are left out
    /// and a repeated header name resolves to its last occurrence.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut indices = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            let name = header.as_ref();
            if name.is_empty() {
                continue;
            }
            indices.insert(name.to_string(), index);
        }
        Self { indices }
    }

    /// Returns the index of the named column, if the sheet has it
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Returns the cell of `row` under the named column.
    ///
    /// `None` when the column is absent or the row is shorter than the header.
    pub fn cell<'a, S: AsRef<str>>(&self, row: &'a [S], name: &str) -> Option<&'a str> {
        self.index_of(name)
            .and_then(|index| row.get(index))
            .map(|cell| cell.as_ref())
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
