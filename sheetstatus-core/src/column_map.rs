//! Column lookup by title
//!
//! The store identifies columns by id, but sheets are read by their
//! human-readable column titles.

use crate::store::{Cell, Row, Sheet};
use std::collections::HashMap;

/// Column title → column id for a single sheet
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: HashMap<String, u64>,
}

impl ColumnMap {
    /// Build the map for a sheet. Duplicate titles keep the last column.
    pub fn from_sheet(sheet: &Sheet) -> Self {
        let mut columns = HashMap::with_capacity(sheet.columns.len());
        for column in &sheet.columns {
            columns.insert(column.title.clone(), column.id);
        }
        Self { columns }
    }

    pub fn column_id(&self, title: &str) -> Option<u64> {
        self.columns.get(title).copied()
    }

    /// Get a row's cell by column title; `None` when the title is unknown
    /// or the row has no cell in that column
    pub fn cell<'r>(&self, row: &'r Row, title: &str) -> Option<&'r Cell> {
        self.column_id(title).and_then(|id| row.get_cell(id))
    }

    /// Get the cell at a column title and 1-based row number
    pub fn cell_at<'s>(&self, sheet: &'s Sheet, title: &str, row_number: u32) -> Option<&'s Cell> {
        sheet
            .row_by_number(row_number)
            .and_then(|row| self.cell(row, title))
    }
}
