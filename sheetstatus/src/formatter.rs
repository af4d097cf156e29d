//! Output formatters for reports, inspections and workspace listings

use anyhow::Result;
use colored::*;
use serde::Serialize;
use sheetstatus_core::store::WorkspaceRef;
use sheetstatus_core::{CanonicalRecord, Inspection, Report};
use std::path::Path;

/// Print a report as a colored table followed by a summary
pub fn print_report_human(report: &Report, path: &Path, published: Option<usize>) {
    println!("{}", format!("{} report", report.category).bold());
    println!();

    if report.is_empty() {
        println!("{}", "No project sheets found".yellow().bold());
    } else {
        print_table(&report.header(), &report.rows());
    }

    println!();
    println!("{}", "Summary:".bold().underline());
    println!("  {} {}", "Records:".bold(), report.len());
    println!("  {} {}", "Written:".green().bold(), path.display());
    if let Some(count) = published {
        println!("  {} {} rows", "Published:".blue().bold(), count);
    }
}

fn print_table(header: &[&str; 8], rows: &[[String; 8]]) {
    let mut widths = header.map(|h| h.chars().count());
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let header_line = header
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{:<w$}", h, w = w))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header_line.bold());

    for row in rows {
        let line = row
            .iter()
            .zip(widths)
            .map(|(value, w)| format!("{:<w$}", value, w = w))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line);
    }
}

/// Print a report in JSON format
pub fn print_report_json(report: &Report, path: &Path, published: Option<usize>) -> Result<()> {
    let output = serde_json::json!({
        "category": report.category,
        "file": path.display().to_string(),
        "records": report.records,
        "summary": {
            "total": report.len(),
            "published": published,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print the outcome of a single-sheet inspection
pub fn print_inspection_human(inspection: &Inspection) {
    println!(
        "{} {} {}",
        "Sheet:".bold(),
        inspection.sheet_name.cyan().bold(),
        format!("({})", inspection.sheet_id).bright_black()
    );
    println!("  {} {}", "Category:".bold(), inspection.category);
    println!("  {} {}", "Ticket:".bold(), inspection.tap_number.yellow());
    if let Some(erat) = &inspection.erat_number {
        println!("  {} {}", "eRAT:".bold(), erat);
    }

    match &inspection.record {
        Some(record) => print_record(record),
        None => println!(
            "  {}",
            "Skipped: not a project sheet or unknown to the reference sheet".yellow()
        ),
    }
}

fn print_record(record: &CanonicalRecord) {
    let header = sheetstatus_core::REPORT_HEADER;
    let width = header.iter().map(|h| h.len()).max().unwrap_or(0);
    for (title, value) in header.iter().zip(record.fields()) {
        println!("  {:<w$}  {}", title.bright_black(), value, w = width);
    }
}

/// Print workspaces as `id  name` lines
pub fn print_workspaces_human(workspaces: &[WorkspaceRef]) {
    if workspaces.is_empty() {
        println!("{}", "No workspaces found".yellow().bold());
        return;
    }

    for workspace in workspaces {
        println!("{:>18}  {}", workspace.id.to_string().cyan(), workspace.name);
    }
    println!();
    println!("  {} {}", "Workspaces:".bold(), workspaces.len());
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
