//! Report assembly: final transforms and ordering before export

use crate::record::{CanonicalRecord, Category, REPORT_HEADER};

/// Records collected for one category, ready for export
#[derive(Debug, Clone)]
pub struct Report {
    pub category: Category,
    pub records: Vec<CanonicalRecord>,
}

impl Report {
    pub fn new(category: Category, records: Vec<CanonicalRecord>) -> Self {
        Self { category, records }
    }

    /// Apply the category's final transforms.
    ///
    /// NEBS: resolve project name cells to their values, then sort by
    /// category and ticket. Tickets compare as text, so "100" sorts before
    /// "20". SG records are left as collected.
    pub fn finalize(mut self) -> Self {
        if self.category == Category::Nebs {
            for record in &mut self.records {
                record.project_name.resolve();
            }
            self.records
                .sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.ticket.cmp(&b.ticket)));
        }
        self
    }

    pub fn header(&self) -> [&'static str; 8] {
        REPORT_HEADER
    }

    /// Rows in header order
    pub fn rows(&self) -> Vec<[String; 8]> {
        self.records.iter().map(CanonicalRecord::fields).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ProjectName;
    use crate::store::{Cell, CellValue};

    fn record(ticket: &str, category: Category, name: ProjectName) -> CanonicalRecord {
        CanonicalRecord {
            priority: String::new(),
            ticket: ticket.to_string(),
            category,
            project_name: name,
            completion: "0%".into(),
            project_manager: String::new(),
            start_date: String::new(),
            last_test_date: String::new(),
        }
    }

    fn name_cell(text: &str) -> ProjectName {
        ProjectName::Cell(Some(Cell::new(1, Some(CellValue::from(text)), Some(text))))
    }

    #[test]
    fn test_nebs_sorts_tickets_as_text() {
        let report = Report::new(
            Category::Nebs,
            vec![
                record("20", Category::Nebs, name_cell("Twenty")),
                record("100", Category::Nebs, name_cell("Hundred")),
                record("3", Category::Nebs, name_cell("Three")),
            ],
        )
        .finalize();

        let tickets: Vec<_> = report.records.iter().map(|r| r.ticket.as_str()).collect();
        assert_eq!(tickets, vec!["100", "20", "3"]);
    }

    #[test]
    fn test_nebs_resolves_project_names() {
        let report = Report::new(
            Category::Nebs,
            vec![record("6373", Category::Nebs, name_cell("Tomahawk"))],
        )
        .finalize();
        assert_eq!(
            report.records[0].project_name,
            ProjectName::Text("Tomahawk".into())
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_tickets() {
        let report = Report::new(
            Category::Nebs,
            vec![
                record("7", Category::Nebs, name_cell("First")),
                record("7", Category::Nebs, name_cell("Second")),
            ],
        )
        .finalize();
        assert_eq!(report.records[0].project_name.to_string(), "First");
        assert_eq!(report.records[1].project_name.to_string(), "Second");
    }

    #[test]
    fn test_sg_keeps_collection_order() {
        let report = Report::new(
            Category::Sg,
            vec![
                record("", Category::Sg, ProjectName::Text("Zeta 1".into())),
                record("", Category::Sg, ProjectName::Text("Alpha 2".into())),
            ],
        )
        .finalize();
        assert_eq!(report.rows()[0][3], "Zeta 1");
        assert_eq!(report.rows()[1][3], "Alpha 2");
    }

    #[test]
    fn test_empty_report() {
        let report = Report::new(Category::Sg, Vec::new()).finalize();
        assert!(report.is_empty());
        assert_eq!(report.header()[0], "Priority");
    }
}
