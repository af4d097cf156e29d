//! Reference (master status) sheet lookups keyed by ticket number

use crate::column_map::ColumnMap;
use crate::normalize::{normalize_cell, normalize_tap_number};
use crate::record::{Category, ProjectIdentity, ProjectName};
use crate::store::Sheet;
use crate::tap_number::contains_digit;

pub const TICKET_COLUMN: &str = "ERAT#";
pub const PRIORITY_COLUMN: &str = "Priority";
pub const PROJECT_NAME_COLUMN: &str = "Project Name (link to status)";
pub const PROJECT_MANAGER_COLUMN: &str = "NEBS PM";

/// The master sheet listing every NEBS project, with its column map
#[derive(Debug, Clone)]
pub struct ReferenceSheet {
    sheet: Sheet,
    columns: ColumnMap,
}

impl ReferenceSheet {
    pub fn new(sheet: Sheet) -> Self {
        let columns = ColumnMap::from_sheet(&sheet);
        Self { sheet, columns }
    }

    /// Find the first row whose normalized `ERAT#` equals `ticket` and read
    /// the project identity from it.
    ///
    /// Returns `None` when the ticket has no digit, or when no row matches.
    pub fn resolve(&self, ticket: &str, category: Category) -> Option<ProjectIdentity> {
        if !contains_digit(ticket) {
            return None;
        }

        let row = self.sheet.rows.iter().find(|row| {
            let value = self
                .columns
                .cell(row, TICKET_COLUMN)
                .and_then(|cell| cell.value.as_ref());
            normalize_tap_number(value).as_deref() == Some(ticket)
        })?;

        Some(ProjectIdentity {
            // Display values: priority renders a number, the PM an email
            priority: normalize_cell(self.columns.cell(row, PRIORITY_COLUMN)),
            ticket: ticket.to_string(),
            category,
            project_name: ProjectName::Cell(self.columns.cell(row, PROJECT_NAME_COLUMN).cloned()),
            project_manager: normalize_cell(self.columns.cell(row, PROJECT_MANAGER_COLUMN)),
        })
    }
}
