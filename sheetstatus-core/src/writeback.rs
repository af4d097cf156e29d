//! Publishing report rows back to a sheet
//!
//! Not part of the report run itself; used only when publishing is asked for.

use crate::column_map::ColumnMap;
use crate::record::CanonicalRecord;
use crate::store::{CellDraft, CellValue, RowDraft, SheetStore};
use anyhow::{Context, Result};
use tracing::info;

/// Target sheet column titles, in record field order
pub const PUBLISH_COLUMNS: [&str; 8] = [
    "Priority",
    "ERAT",
    "NEBS/SG",
    "Project Name",
    "Completion",
    "Project Manager",
    "Start Date",
    "Last Test Date",
];

/// Build a strict cell for a column
pub fn build_cell(column_id: u64, value: impl Into<String>) -> CellDraft {
    CellDraft {
        column_id,
        value: CellValue::Text(value.into()),
        strict: true,
    }
}

/// Build a row holding one record, placed at the bottom of the sheet
pub fn build_row(columns: &ColumnMap, record: &CanonicalRecord) -> Result<RowDraft> {
    let cells = PUBLISH_COLUMNS
        .iter()
        .zip(record.fields())
        .map(|(title, value)| {
            let column_id = columns
                .column_id(title)
                .with_context(|| format!("Target sheet has no '{}' column", title))?;
            Ok(build_cell(column_id, value))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RowDraft {
        to_bottom: true,
        cells,
    })
}

/// Append every record as a new row of the sheet `sheet_id`
pub fn publish(store: &dyn SheetStore, sheet_id: u64, records: &[CanonicalRecord]) -> Result<usize> {
    let sheet = store
        .get_sheet(sheet_id)
        .with_context(|| format!("Failed to load publish target sheet {}", sheet_id))?;
    let columns = ColumnMap::from_sheet(&sheet);

    let rows = records
        .iter()
        .map(|record| build_row(&columns, record))
        .collect::<Result<Vec<_>>>()?;

    if !rows.is_empty() {
        store
            .add_rows(sheet_id, &rows)
            .with_context(|| format!("Failed to add rows to sheet {}", sheet_id))?;
    }

    info!(sheet_id, rows = rows.len(), "published report rows");
    Ok(rows.len())
}
