//! Status figures read from a single project sheet

use crate::column_map::ColumnMap;
use crate::normalize::{display_date, normalize_cell, parse_date};
use crate::record::{Category, ProjectIdentity, ProjectName, SheetStatus};
use crate::store::{Sheet, SheetStore, StoreError};
use chrono::NaiveDateTime;

pub const START_COLUMN: &str = "Start";
pub const FINISH_COLUMN: &str = "Finish";
/// SG sheets keep their code name and id in this column (rows 1 and 2)
pub const SG_IDENTITY_COLUMN: &str = "Standard Section";

/// Which end of a sheet's date range to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestDate {
    /// First test date (minimum)
    Earliest,
    /// Last test date (maximum)
    Latest,
}

impl TestDate {
    fn reduce(self, samples: &[NaiveDateTime]) -> Option<NaiveDateTime> {
        match self {
            TestDate::Earliest => samples.iter().min().copied(),
            TestDate::Latest => samples.iter().max().copied(),
        }
    }

    /// Pick this end of already collected samples as `MM/DD/YYYY`; empty
    /// when there are none
    pub fn select(self, samples: &[NaiveDateTime]) -> String {
        self.reduce(samples)
            .map(|date| display_date(&date))
            .unwrap_or_default()
    }
}

/// Completion display value at `column` / `row_number`.
///
/// `"0%"` when the cell exists without a value, empty when the row or the
/// cell is missing.
pub fn completion(sheet: &Sheet, columns: &ColumnMap, column: &str, row_number: u32) -> String {
    match columns.cell_at(sheet, column, row_number) {
        Some(cell) => cell
            .display_value
            .clone()
            .unwrap_or_else(|| "0%".to_string()),
        None => String::new(),
    }
}

/// Collect every parseable date from the Start column, then the Finish
/// column. Blank and unparseable values are skipped.
pub fn date_samples(sheet: &Sheet, columns: &ColumnMap) -> Vec<NaiveDateTime> {
    let mut samples = column_dates(sheet, columns, START_COLUMN);
    samples.extend(column_dates(sheet, columns, FINISH_COLUMN));
    samples
}

fn column_dates(sheet: &Sheet, columns: &ColumnMap, column: &str) -> Vec<NaiveDateTime> {
    sheet
        .rows
        .iter()
        .filter_map(|row| columns.cell(row, column))
        .filter_map(|cell| cell.value.as_ref())
        .filter_map(|value| value.as_text())
        .filter_map(parse_date)
        .collect()
}

/// First or last test date as `MM/DD/YYYY`; empty when the sheet has no dates
pub fn test_date(sheet: &Sheet, columns: &ColumnMap, which: TestDate) -> String {
    which.select(&date_samples(sheet, columns))
}

/// Completion plus first and last test dates for a project sheet
pub fn sheet_status(sheet: &Sheet, category: Category) -> SheetStatus {
    let columns = ColumnMap::from_sheet(sheet);
    let (completion_column, completion_row) = category.completion_cell();
    let samples = date_samples(sheet, &columns);

    SheetStatus {
        completion: completion(sheet, &columns, completion_column, completion_row),
        start_date: TestDate::Earliest.select(&samples),
        last_test_date: TestDate::Latest.select(&samples),
    }
}

/// Identity of an SG project read from its own sheet: `"<code name> <id>"`
/// from the identity column, and the sheet owner's name as manager
pub fn sg_identity(store: &dyn SheetStore, sheet: &Sheet) -> Result<ProjectIdentity, StoreError> {
    let columns = ColumnMap::from_sheet(sheet);

    let owner = match sheet.owner_id {
        Some(owner_id) => store.get_user(owner_id)?.display_name(),
        None => String::new(),
    };

    let code_name = normalize_cell(columns.cell_at(sheet, SG_IDENTITY_COLUMN, 1));
    let project_id = normalize_cell(columns.cell_at(sheet, SG_IDENTITY_COLUMN, 2));

    Ok(ProjectIdentity {
        priority: String::new(),
        ticket: String::new(),
        category: Category::Sg,
        project_name: ProjectName::Text(format!("{} {}", code_name, project_id)),
        project_manager: owner,
    })
}
