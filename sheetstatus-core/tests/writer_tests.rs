use calamine::{Reader, Xlsx, open_workbook};
use sheetstatus_core::record::{CanonicalRecord, Category, ProjectName, REPORT_HEADER};
use sheetstatus_core::writer::{SHEET_NAME, export_report, write_report};
use sheetstatus_core::Report;
use std::path::Path;

fn record(ticket: &str, name: &str, completion: &str) -> CanonicalRecord {
    CanonicalRecord {
        priority: "1".into(),
        ticket: ticket.into(),
        category: Category::Nebs,
        project_name: ProjectName::Text(name.into()),
        completion: completion.into(),
        project_manager: "pm@example.com".into(),
        start_date: "01/01/2023".into(),
        last_test_date: "06/01/2023".into(),
    }
}

// Read every row of the report sheet back as strings
fn read_rows(path: &Path) -> anyhow::Result<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook.worksheet_range(SHEET_NAME)?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect())
}

#[test]
fn test_write_report_roundtrip() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("report.xlsx");

    let report = Report::new(
        Category::Nebs,
        vec![
            record("6373", "Tomahawk", "88%"),
            record("232", "Firepower 7010 & Co", ""),
        ],
    );
    write_report(&report, &path)?;

    let rows = read_rows(&path)?;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], REPORT_HEADER.map(String::from).to_vec());
    assert_eq!(
        rows[1],
        vec!["1", "6373", "NEBS", "Tomahawk", "88%", "pm@example.com", "01/01/2023", "06/01/2023"]
    );
    // Special characters survive, empty values read back as empty cells
    assert_eq!(rows[2][3], "Firepower 7010 & Co");
    assert_eq!(rows[2][4], "");

    Ok(())
}

#[test]
fn test_empty_report_has_header_only() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("empty.xlsx");

    write_report(&Report::new(Category::Sg, Vec::new()), &path)?;

    let rows = read_rows(&path)?;
    assert_eq!(rows, vec![REPORT_HEADER.map(String::from).to_vec()]);

    Ok(())
}

#[test]
fn test_export_creates_output_dir() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let output_dir = temp_dir.path().join("Results").join("nested");

    let report = Report::new(Category::Sg, vec![record("", "Coronado SG2", "50%")]);
    let path = export_report(&report, &output_dir)?;

    assert!(path.starts_with(&output_dir));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .expect("file name");
    assert!(name.starts_with("SG_"), "unexpected name {}", name);
    assert!(name.ends_with(".xlsx"));
    // SG_YYYYMMDD_HHMMSS.xlsx
    assert_eq!(name.len(), "SG_20230914_080503.xlsx".len());

    assert_eq!(read_rows(&path)?.len(), 2);
    Ok(())
}
