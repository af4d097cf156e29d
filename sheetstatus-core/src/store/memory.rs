//! In-memory sheet store, loadable from a JSON snapshot

use super::model::{RowDraft, Sheet, User, Workspace, WorkspaceRef};
use super::{SheetStore, StoreError};
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Snapshot file layout: the store's entities in their API shapes
#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    workspaces: Vec<Workspace>,
    #[serde(default)]
    sheets: Vec<Sheet>,
    #[serde(default)]
    users: Vec<User>,
}

/// Sheet store backed by in-memory maps
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Workspaces in insertion order (listing order matters for the report)
    workspaces: Vec<Workspace>,
    sheets: HashMap<u64, Sheet>,
    users: HashMap<u64, User>,
    added_rows: RefCell<Vec<(u64, RowDraft)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a snapshot JSON file
    pub fn from_snapshot_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        Self::from_snapshot_str(&content)
    }

    /// Load a store from snapshot JSON text
    pub fn from_snapshot_str(json: &str) -> Result<Self, StoreError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let mut store = Self::new();
        for workspace in snapshot.workspaces {
            store.insert_workspace(workspace);
        }
        for sheet in snapshot.sheets {
            store.insert_sheet(sheet);
        }
        for user in snapshot.users {
            store.insert_user(user);
        }
        Ok(store)
    }

    pub fn insert_workspace(&mut self, workspace: Workspace) {
        self.workspaces.retain(|w| w.id != workspace.id);
        self.workspaces.push(workspace);
    }

    pub fn insert_sheet(&mut self, sheet: Sheet) {
        self.sheets.insert(sheet.id, sheet);
    }

    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Rows appended through [`SheetStore::add_rows`], with their target sheet id
    pub fn added_rows(&self) -> Vec<(u64, RowDraft)> {
        self.added_rows.borrow().clone()
    }
}

impl SheetStore for MemoryStore {
    fn list_workspaces(&self) -> Result<Vec<WorkspaceRef>, StoreError> {
        Ok(self
            .workspaces
            .iter()
            .map(|w| WorkspaceRef {
                id: w.id,
                name: w.name.clone(),
            })
            .collect())
    }

    fn get_workspace(&self, workspace_id: u64) -> Result<Workspace, StoreError> {
        self.workspaces
            .iter()
            .find(|w| w.id == workspace_id)
            .cloned()
            .ok_or(StoreError::NotFound {
                kind: "workspace",
                id: workspace_id,
            })
    }

    fn get_sheet(&self, sheet_id: u64) -> Result<Sheet, StoreError> {
        self.sheets.get(&sheet_id).cloned().ok_or(StoreError::NotFound {
            kind: "sheet",
            id: sheet_id,
        })
    }

    fn get_user(&self, user_id: u64) -> Result<User, StoreError> {
        self.users.get(&user_id).cloned().ok_or(StoreError::NotFound {
            kind: "user",
            id: user_id,
        })
    }

    fn add_rows(&self, sheet_id: u64, rows: &[RowDraft]) -> Result<(), StoreError> {
        if !self.sheets.contains_key(&sheet_id) {
            return Err(StoreError::NotFound {
                kind: "sheet",
                id: sheet_id,
            });
        }
        self.added_rows
            .borrow_mut()
            .extend(rows.iter().cloned().map(|row| (sheet_id, row)));
        Ok(())
    }
}
