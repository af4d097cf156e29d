//! Sheet store data structures
//!
//! These mirror the JSON shapes of the remote sheet store so that API
//! responses and offline snapshots deserialize into the same types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workspace summary returned by a workspace listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRef {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Sheet summary as listed inside a workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRef {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// A workspace with its sheets populated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sheets: Vec<SheetRef>,
}

impl Workspace {
    /// Get the ids of all sheets in this workspace, in listing order
    pub fn sheet_ids(&self) -> Vec<u64> {
        self.sheets.iter().map(|s| s.id).collect()
    }
}

/// A fully hydrated sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<u64>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_owner(mut self, owner_id: u64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn with_column(mut self, id: u64, title: impl Into<String>) -> Self {
        self.columns.push(Column {
            id,
            title: title.into(),
        });
        self
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Get the row carrying the given 1-based row number
    pub fn row_by_number(&self, row_number: u32) -> Option<&Row> {
        self.rows.iter().find(|r| r.row_number == row_number)
    }
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: u64,
    #[serde(default)]
    pub title: String,
}

/// A sheet row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub id: u64,
    /// 1-based position of the row in the sheet
    #[serde(default)]
    pub row_number: u32,
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(row_number: u32) -> Self {
        Self {
            id: 0,
            row_number,
            cells: Vec::new(),
        }
    }

    /// Add a cell whose display value is the same text as its value
    pub fn with_text(self, column_id: u64, text: impl Into<String>) -> Self {
        let text = text.into();
        self.with_cell(Cell {
            column_id,
            value: Some(CellValue::Text(text.clone())),
            display_value: Some(text),
        })
    }

    pub fn with_cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    /// Get the cell for a column, if the row has one
    pub fn get_cell(&self, column_id: u64) -> Option<&Cell> {
        self.cells.iter().find(|c| c.column_id == column_id)
    }
}

/// A single cell with its raw value and rendered display form
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(default)]
    pub column_id: u64,
    #[serde(default)]
    pub value: Option<CellValue>,
    #[serde(default)]
    pub display_value: Option<String>,
}

impl Cell {
    pub fn new(column_id: u64, value: Option<CellValue>, display_value: Option<&str>) -> Self {
        Self {
            column_id,
            value,
            display_value: display_value.map(str::to_string),
        }
    }
}

/// Cell value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Get the text if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Boolean(b) => write!(f, "{}", b),
            // Whole numbers render without a fractional part ("6373", not "6373.0")
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// A user account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// "First Last", as shown for a sheet owner
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A cell to be written to a sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDraft {
    pub column_id: u64,
    pub value: CellValue,
    pub strict: bool,
}

/// A new row to be appended to a sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDraft {
    pub to_bottom: bool,
    pub cells: Vec<CellDraft>,
}
