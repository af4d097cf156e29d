//! Cell value normalization: dates, ticket strings and display values

use crate::store::{Cell, CellValue};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";
/// Report display format for dates
pub const DISPLAY_DATE_FORMAT: &str = "%m/%d/%Y";

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}:\d{2})?$").expect("valid date pattern")
    })
}

/// Parse `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD` into a date-time.
/// Plain dates land at midnight. Unpadded fields and short years are rejected.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    let caps = date_pattern().captures(value)?;
    if caps.get(1).is_some() {
        NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).ok()
    } else {
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}

/// Rewrite a `YYYY-MM-DD` string as `MM/DD/YYYY`; anything else is returned
/// unchanged, including full `YYYY-MM-DDTHH:MM:SS` timestamps.
pub fn normalize_date(value: &str) -> String {
    let plain = date_pattern()
        .captures(value)
        .is_some_and(|caps| caps.get(1).is_none());
    if !plain {
        return value.to_string();
    }
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(_) => value.to_string(),
    }
}

/// Format a date-time for the report
pub fn display_date(value: &NaiveDateTime) -> String {
    value.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Strip a `Targa-` prefix from a ticket value, keeping its digit run.
///
/// Numbers are stringified first, so a numeric `6373` compares equal to the
/// text `"6373"`. Values without the prefix come back unchanged.
pub fn normalize_tap_number(value: Option<&CellValue>) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"^Targa-(\d+)").expect("valid Targa value pattern"));

    let text = value?.to_string();
    match re.captures(&text) {
        Some(caps) => Some(caps[1].to_string()),
        None => Some(text),
    }
}

/// Display form of a cell; empty when the cell or its display value is absent
pub fn normalize_cell(cell: Option<&Cell>) -> String {
    cell.and_then(|c| c.display_value.clone()).unwrap_or_default()
}

/// Raw value of a cell as text; empty when absent
pub fn cell_value_text(cell: Option<&Cell>) -> String {
    cell.and_then(|c| c.value.as_ref())
        .map(|v| v.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2023-09-14"), "09/14/2023");
        assert_eq!(normalize_date("2023-09-14T10:00:00"), "2023-09-14T10:00:00");
        assert_eq!(normalize_date("n/a"), "n/a");
        assert_eq!(normalize_date(""), "");
        // Only the zero-padded four-digit-year shape is reformatted
        assert_eq!(normalize_date("2023-9-4"), "2023-9-4");
        assert_eq!(normalize_date("23-09-14"), "23-09-14");
        assert_eq!(normalize_date(" 2023-09-14"), " 2023-09-14");
    }

    #[test]
    fn test_parse_date() {
        let plain = parse_date("2023-09-14").unwrap();
        assert_eq!((plain.year(), plain.month(), plain.day()), (2023, 9, 14));
        assert_eq!(plain.hour(), 0);

        let stamped = parse_date("2023-09-14T10:00:00").unwrap();
        assert_eq!(stamped.date(), NaiveDate::from_ymd_opt(2023, 9, 14).unwrap());
        assert_eq!(stamped.hour(), 10);

        assert!(parse_date("n/a").is_none());
        assert!(parse_date("5 days").is_none());
        assert!(parse_date("2023-13-40").is_none());
        assert!(parse_date("").is_none());
        assert!(parse_date("2023-9-4").is_none());
        assert!(parse_date("23-09-14").is_none());
        assert!(parse_date("2023-09-14T10:00").is_none());
    }

    #[test]
    fn test_display_date() {
        let value = parse_date("2023-01-05").unwrap();
        assert_eq!(display_date(&value), "01/05/2023");
    }

    #[test]
    fn test_normalize_tap_number() {
        let targa = CellValue::from("Targa-123");
        assert_eq!(normalize_tap_number(Some(&targa)).as_deref(), Some("123"));

        let numeric = CellValue::Number(6373.0);
        assert_eq!(normalize_tap_number(Some(&numeric)).as_deref(), Some("6373"));

        let text = CellValue::from("6373");
        assert_eq!(normalize_tap_number(Some(&text)).as_deref(), Some("6373"));

        // Case-sensitive prefix
        let lower = CellValue::from("targa-123");
        assert_eq!(normalize_tap_number(Some(&lower)).as_deref(), Some("targa-123"));

        assert_eq!(normalize_tap_number(None), None);
    }

    #[test]
    fn test_normalize_cell() {
        let cell = Cell::new(1, Some(CellValue::Number(0.88)), Some("88%"));
        assert_eq!(normalize_cell(Some(&cell)), "88%");
        assert_eq!(normalize_cell(Some(&Cell::new(1, None, None))), "");
        assert_eq!(normalize_cell(None), "");

        assert_eq!(cell_value_text(Some(&cell)), "0.88");
        assert_eq!(cell_value_text(None), "");
    }
}
