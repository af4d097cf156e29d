// ! Writer module for exporting reports

mod xlsx_writer;

pub use xlsx_writer::{SHEET_NAME, build_xlsx};

use crate::report::Report;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Report file name: `<CATEGORY>_<YYYYMMDD_HHMMSS>.xlsx`
pub fn report_file_name(prefix: &str, timestamp: &NaiveDateTime) -> String {
    format!("{}_{}.xlsx", prefix, timestamp.format("%Y%m%d_%H%M%S"))
}

/// Write a report to an XLSX file at `path`.
///
/// The archive is assembled in memory first, so a failed export leaves no
/// partial file behind.
pub fn write_report<P: AsRef<Path>>(report: &Report, path: P) -> Result<()> {
    let path = path.as_ref();
    let rows: Vec<Vec<String>> = report.rows().into_iter().map(Vec::from).collect();
    let bytes = build_xlsx(&report.header(), &rows)?;

    fs::write(path, bytes)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}

/// Export a report into `output_dir` under a timestamped name, creating the
/// directory when needed. Returns the written path.
pub fn export_report<P: AsRef<Path>>(report: &Report, output_dir: P) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let name = report_file_name(report.category.as_str(), &Local::now().naive_local());
    let path = output_dir.join(name);
    write_report(report, &path)?;

    info!(path = %path.display(), records = report.len(), "report exported");
    Ok(path)
}
