//! Workspace walk: one canonical record per qualifying project sheet

use crate::extract::{sg_identity, sheet_status};
use crate::record::{CanonicalRecord, Category, ProjectIdentity};
use crate::reference::ReferenceSheet;
use crate::store::{Sheet, SheetStore, StoreError};
use crate::tap_number::TapNumber;
use tracing::debug;

/// Where a sheet's project identity comes from
#[derive(Debug, Clone, Copy)]
pub enum IdentitySource<'a> {
    /// Look the sheet's ticket up in the master reference sheet
    Reference(&'a ReferenceSheet),
    /// Read the identity from the sheet itself
    SameSheet,
}

/// Walks workspaces and builds records for one category
pub struct WorkspaceAggregator<'a> {
    store: &'a dyn SheetStore,
    category: Category,
    source: IdentitySource<'a>,
}

impl<'a> WorkspaceAggregator<'a> {
    /// NEBS projects, resolved against the master reference sheet
    pub fn nebs(store: &'a dyn SheetStore, reference: &'a ReferenceSheet) -> Self {
        Self {
            store,
            category: Category::Nebs,
            source: IdentitySource::Reference(reference),
        }
    }

    /// SG projects, resolved from their own sheets
    pub fn sg(store: &'a dyn SheetStore) -> Self {
        Self {
            store,
            category: Category::Sg,
            source: IdentitySource::SameSheet,
        }
    }

    /// Visit every sheet of every workspace, in order, and collect records.
    ///
    /// Store failures abort the walk; no partial result is returned.
    pub fn collect(&self, workspace_ids: &[u64]) -> Result<Vec<CanonicalRecord>, StoreError> {
        let mut records = Vec::new();

        for &workspace_id in workspace_ids {
            let workspace = self.store.get_workspace(workspace_id)?;
            debug!(
                workspace_id,
                workspace_name = %workspace.name,
                sheets = workspace.sheets.len(),
                "visiting workspace"
            );

            for sheet_id in workspace.sheet_ids() {
                let sheet = self.store.get_sheet(sheet_id)?;
                if let Some(record) = self.process_sheet(&sheet)? {
                    records.push(record);
                }
            }
        }

        Ok(records)
    }

    /// Build the record for one sheet, or `None` when the sheet is not a
    /// project sheet or its ticket is unknown to the reference sheet
    pub fn process_sheet(&self, sheet: &Sheet) -> Result<Option<CanonicalRecord>, StoreError> {
        debug!(sheet_id = sheet.id, sheet_name = %sheet.name, "processing sheet");

        let Some(identity) = self.identity(sheet)? else {
            return Ok(None);
        };

        let record = CanonicalRecord::assemble(identity, sheet_status(sheet, self.category));
        debug!(?record, "assembled record");
        Ok(Some(record))
    }

    fn identity(&self, sheet: &Sheet) -> Result<Option<ProjectIdentity>, StoreError> {
        match self.source {
            IdentitySource::Reference(reference) => {
                let ticket = TapNumber::parse(&sheet.name);
                if !ticket.has_digit() {
                    debug!(sheet_name = %sheet.name, "skipping sheet without a ticket number");
                    return Ok(None);
                }

                let identity = reference.resolve(ticket.as_str(), self.category);
                if identity.is_none() {
                    debug!(ticket = %ticket, "ticket not found in reference sheet, dropping");
                }
                Ok(identity)
            }
            IdentitySource::SameSheet => sg_identity(self.store, sheet).map(Some),
        }
    }
}
