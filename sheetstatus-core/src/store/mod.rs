//! Remote sheet store access
//!
//! The pipeline only talks to the store through [`SheetStore`], so the HTTP
//! client and the in-memory snapshot store are interchangeable.

use thiserror::Error;

pub mod memory;
pub mod model;
#[cfg(feature = "smartsheet-api")]
pub mod smartsheet;

pub use memory::MemoryStore;
pub use model::{
    Cell, CellDraft, CellValue, Column, Row, RowDraft, Sheet, SheetRef, User, Workspace,
    WorkspaceRef,
};
#[cfg(feature = "smartsheet-api")]
pub use smartsheet::SmartsheetClient;

/// Errors raised while talking to a sheet store
#[derive(Debug, Error)]
pub enum StoreError {
    #[cfg(feature = "smartsheet-api")]
    #[error("request to sheet store failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sheet store returned HTTP {status} (error code {code:?}): {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Read (and rarely write) access to workspaces, sheets and users
pub trait SheetStore {
    fn list_workspaces(&self) -> Result<Vec<WorkspaceRef>, StoreError>;

    /// Fetch a workspace with all of its sheets listed
    fn get_workspace(&self, workspace_id: u64) -> Result<Workspace, StoreError>;

    /// Fetch a sheet with columns, rows and owner populated
    fn get_sheet(&self, sheet_id: u64) -> Result<Sheet, StoreError>;

    fn get_user(&self, user_id: u64) -> Result<User, StoreError>;

    /// Append rows to the bottom of a sheet
    fn add_rows(&self, sheet_id: u64, rows: &[RowDraft]) -> Result<(), StoreError>;
}
