//! Canonical report records

use crate::normalize::cell_value_text;
use crate::store::Cell;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Report column header, in record field order
pub const REPORT_HEADER: [&str; 8] = [
    "Priority",
    "ERAT/TARGA",
    "NEBS/SG",
    "Project Name",
    "Completion",
    "Project Manager",
    "Start Date",
    "Last Test Date",
];

/// Project category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "NEBS")]
    Nebs,
    #[serde(rename = "SG")]
    Sg,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Nebs => "NEBS",
            Category::Sg => "SG",
        }
    }

    /// Column and row number holding a project sheet's completion value
    pub fn completion_cell(&self) -> (&'static str, u32) {
        match self {
            Category::Nebs => ("Standard Section No.", 2),
            Category::Sg => ("Standard Section", 4),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NEBS" => Ok(Category::Nebs),
            "SG" => Ok(Category::Sg),
            other => anyhow::bail!("Unknown category '{}' (expected NEBS or SG)", other),
        }
    }
}

/// Project name as first captured: either the reference sheet's name cell,
/// or text assembled from the project sheet itself
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectName {
    Cell(Option<Cell>),
    Text(String),
}

impl ProjectName {
    /// Replace a captured cell with its value text
    pub fn resolve(&mut self) {
        if let ProjectName::Cell(cell) = self {
            let text = cell_value_text(cell.as_ref());
            *self = ProjectName::Text(text);
        }
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectName::Cell(cell) => f.write_str(&cell_value_text(cell.as_ref())),
            ProjectName::Text(text) => f.write_str(text),
        }
    }
}

impl Serialize for ProjectName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Who and what a project is: the part of a record that comes from either
/// the reference sheet (NEBS) or the project sheet itself (SG)
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectIdentity {
    pub priority: String,
    pub ticket: String,
    pub category: Category,
    pub project_name: ProjectName,
    pub project_manager: String,
}

/// Status figures computed from the project sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetStatus {
    pub completion: String,
    pub start_date: String,
    pub last_test_date: String,
}

/// One report row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub priority: String,
    pub ticket: String,
    pub category: Category,
    pub project_name: ProjectName,
    pub completion: String,
    pub project_manager: String,
    pub start_date: String,
    pub last_test_date: String,
}

impl CanonicalRecord {
    /// Merge a project identity with the sheet's status figures
    pub fn assemble(identity: ProjectIdentity, status: SheetStatus) -> Self {
        Self {
            priority: identity.priority,
            ticket: identity.ticket,
            category: identity.category,
            project_name: identity.project_name,
            completion: status.completion,
            project_manager: identity.project_manager,
            start_date: status.start_date,
            last_test_date: status.last_test_date,
        }
    }

    /// Field values in [`REPORT_HEADER`] order
    pub fn fields(&self) -> [String; 8] {
        [
            self.priority.clone(),
            self.ticket.clone(),
            self.category.to_string(),
            self.project_name.to_string(),
            self.completion.clone(),
            self.project_manager.clone(),
            self.start_date.clone(),
            self.last_test_date.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CellValue;

    #[test]
    fn test_category_parsing() {
        assert_eq!("nebs".parse::<Category>().unwrap(), Category::Nebs);
        assert_eq!("SG".parse::<Category>().unwrap(), Category::Sg);
        assert!("iot".parse::<Category>().is_err());
        assert_eq!(Category::Nebs.completion_cell(), ("Standard Section No.", 2));
        assert_eq!(Category::Sg.completion_cell(), ("Standard Section", 4));
    }

    #[test]
    fn test_assemble_field_order() {
        let identity = ProjectIdentity {
            priority: "1".into(),
            ticket: "6373".into(),
            category: Category::Nebs,
            project_name: ProjectName::Cell(Some(Cell::new(
                3,
                Some(CellValue::from("Tomahawk")),
                Some("Tomahawk"),
            ))),
            project_manager: "pm@example.com".into(),
        };
        let status = SheetStatus {
            completion: "88%".into(),
            start_date: "01/01/2023".into(),
            last_test_date: "06/01/2023".into(),
        };

        let record = CanonicalRecord::assemble(identity, status);
        assert_eq!(
            record.fields(),
            [
                "1",
                "6373",
                "NEBS",
                "Tomahawk",
                "88%",
                "pm@example.com",
                "01/01/2023",
                "06/01/2023"
            ]
            .map(String::from)
        );
    }

    #[test]
    fn test_project_name_resolve() {
        let mut name = ProjectName::Cell(Some(Cell::new(1, Some(CellValue::from("Coronado")), None)));
        name.resolve();
        assert_eq!(name, ProjectName::Text("Coronado".into()));

        let mut missing = ProjectName::Cell(None);
        missing.resolve();
        assert_eq!(missing, ProjectName::Text(String::new()));
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = CanonicalRecord {
            priority: String::new(),
            ticket: String::new(),
            category: Category::Sg,
            project_name: ProjectName::Text("Coronado SG2".into()),
            completion: "0%".into(),
            project_manager: "Grace Hopper".into(),
            start_date: String::new(),
            last_test_date: String::new(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "SG");
        assert_eq!(json["project_name"], "Coronado SG2");
    }
}
