//! sheetstatus-core: project status reporting over a remote sheet store
//!
//! Walks NEBS and SG workspaces, normalizes every project sheet into a
//! canonical record and exports the sorted result as an XLSX report.

pub mod aggregate;
pub mod column_map;
pub mod config;
pub mod extract;
pub mod normalize;
pub mod record;
pub mod reference;
pub mod report;
pub mod store;
pub mod tap_number;
pub mod writeback;
pub mod writer;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use aggregate::WorkspaceAggregator;
pub use config::ReportConfig;
pub use record::{CanonicalRecord, Category, REPORT_HEADER};
pub use reference::ReferenceSheet;
pub use report::Report;
pub use store::{MemoryStore, SheetStore, StoreError};
pub use tap_number::{TapNumber, erat_number};

/// Outcome of inspecting a single sheet
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub sheet_id: u64,
    pub sheet_name: String,
    pub category: Category,
    pub tap_number: String,
    /// Light eRAT number, NEBS only
    pub erat_number: Option<String>,
    /// `None` when the sheet would be skipped by a full run
    pub record: Option<CanonicalRecord>,
}

/// Main reporting interface
pub struct StatusReporter<'a> {
    store: &'a dyn SheetStore,
    config: ReportConfig,
}

impl<'a> StatusReporter<'a> {
    pub fn new(store: &'a dyn SheetStore, config: ReportConfig) -> Self {
        Self { store, config }
    }

    /// Load the NEBS master sheet
    pub fn load_reference(&self) -> Result<ReferenceSheet> {
        let sheet_id = self
            .config
            .nebs
            .reference_sheet_id
            .context("No NEBS reference sheet configured")?;
        let sheet = self
            .store
            .get_sheet(sheet_id)
            .with_context(|| format!("Failed to load reference sheet {}", sheet_id))?;
        Ok(ReferenceSheet::new(sheet))
    }

    /// Collect, finalize and return the report for a category
    pub fn build_report(&self, category: Category) -> Result<Report> {
        self.config.validate_for(category)?;
        let workspace_ids = self.config.workspace_ids(category);
        info!(category = %category, workspaces = workspace_ids.len(), "starting report run");
        if workspace_ids.is_empty() {
            warn!(category = %category, "no workspaces configured, report will be empty");
        }

        let records = match category {
            Category::Nebs => {
                let reference = self.load_reference()?;
                WorkspaceAggregator::nebs(self.store, &reference).collect(workspace_ids)
            }
            Category::Sg => WorkspaceAggregator::sg(self.store).collect(workspace_ids),
        }
        .with_context(|| format!("{} report run failed", category))?;

        Ok(Report::new(category, records).finalize())
    }

    /// Build the report for a category and export it under `output_dir`
    /// (the configured directory when `None`). Returns the report and the
    /// written file path.
    pub fn run(&self, category: Category, output_dir: Option<&Path>) -> Result<(Report, PathBuf)> {
        let report = self.build_report(category)?;
        let output_dir = output_dir.unwrap_or(&self.config.output_dir);
        let path = writer::export_report(&report, output_dir)?;
        Ok((report, path))
    }

    /// Build the record for a single sheet, the way a full run would
    pub fn inspect_sheet(&self, sheet_id: u64, category: Category) -> Result<Inspection> {
        let sheet = self
            .store
            .get_sheet(sheet_id)
            .with_context(|| format!("Failed to load sheet {}", sheet_id))?;

        let record = match category {
            Category::Nebs => {
                let reference = self.load_reference()?;
                WorkspaceAggregator::nebs(self.store, &reference).process_sheet(&sheet)?
            }
            Category::Sg => WorkspaceAggregator::sg(self.store).process_sheet(&sheet)?,
        };

        let record = record.map(|r| {
            let mut report = Report::new(category, vec![r]).finalize();
            report.records.remove(0)
        });

        Ok(Inspection {
            sheet_id: sheet.id,
            erat_number: (category == Category::Nebs).then(|| erat_number(&sheet.name)),
            tap_number: TapNumber::parse(&sheet.name).to_string(),
            sheet_name: sheet.name,
            category,
            record,
        })
    }

    /// Write a report's records back to the configured publish sheet
    pub fn publish(&self, report: &Report) -> Result<usize> {
        let sheet_id = self
            .config
            .publish
            .sheet_id
            .context("No [publish] sheet_id configured")?;
        writeback::publish(self.store, sheet_id, &report.records)
    }
}
