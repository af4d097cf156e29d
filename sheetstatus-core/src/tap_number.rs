//! Ticket (TAP) number extraction from sheet names
//!
//! Project sheets are named after the ticket they track, in one of two
//! formats:
//! - eRAT: `e1234: Project name` (optionally `e6257a NCS-F: ...`)
//! - Targa: `T-0232: Project name`

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn erat_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^e(\d+)\D*:").expect("valid eRAT pattern"))
}

fn targa_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^T-(\d+):").expect("valid Targa pattern"))
}

fn erat_prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^e(\d+):").expect("valid eRAT prefix pattern"))
}

/// Result of parsing a sheet name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapNumber {
    /// Digit run of an `eNNNN:` name
    Erat(String),
    /// Digit run of a `T-NNNN:` name, leading zeros stripped
    Targa(String),
    /// No recognized prefix; holds the name unchanged
    Unrecognized(String),
}

impl TapNumber {
    /// Parse a sheet name, trying the eRAT format first and Targa second
    pub fn parse(sheet_name: &str) -> Self {
        if let Some(caps) = erat_pattern().captures(sheet_name) {
            return TapNumber::Erat(caps[1].to_string());
        }
        if let Some(caps) = targa_pattern().captures(sheet_name) {
            return TapNumber::Targa(caps[1].trim_start_matches('0').to_string());
        }
        TapNumber::Unrecognized(sheet_name.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            TapNumber::Erat(s) | TapNumber::Targa(s) | TapNumber::Unrecognized(s) => s,
        }
    }

    /// Whether the value can identify a project at all.
    ///
    /// Unrecognized names still count when they contain a digit; they are
    /// then matched against the reference sheet verbatim.
    pub fn has_digit(&self) -> bool {
        contains_digit(self.as_str())
    }
}

impl fmt::Display for TapNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Light eRAT extractor: the four characters following `e` in an `eNNNN:`
/// prefix. Shorter digit runs keep the trailing colon (`e12:` gives `12:`).
/// Names without the prefix are returned unchanged.
pub fn erat_number(sheet_name: &str) -> String {
    match erat_prefix_pattern().find(sheet_name) {
        Some(m) => m.as_str().chars().skip(1).take(4).collect(),
        None => sheet_name.to_string(),
    }
}

pub(crate) fn contains_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erat_names() {
        assert_eq!(
            TapNumber::parse("e6373: Tomahawk Test"),
            TapNumber::Erat("6373".to_string())
        );
        assert_eq!(TapNumber::parse("e6257a NCS-F: Chassis").as_str(), "6257");
        // Leading zeros are kept for eRAT
        assert_eq!(TapNumber::parse("e0042: Small").as_str(), "0042");
    }

    #[test]
    fn test_targa_names() {
        assert_eq!(
            TapNumber::parse("T-0232: Firepower"),
            TapNumber::Targa("232".to_string())
        );
        assert_eq!(TapNumber::parse("T-1500: Switch").as_str(), "1500");
        // All zeros strip down to nothing, which no longer identifies a project
        let zeros = TapNumber::parse("T-000: Placeholder");
        assert_eq!(zeros.as_str(), "");
        assert!(!zeros.has_digit());
    }

    #[test]
    fn test_unrecognized_names() {
        let parsed = TapNumber::parse("Status Template");
        assert_eq!(parsed, TapNumber::Unrecognized("Status Template".to_string()));
        assert!(!parsed.has_digit());

        // Prefixes must sit at the start of the name
        assert!(matches!(
            TapNumber::parse("Copy of e6373: Tomahawk"),
            TapNumber::Unrecognized(_)
        ));
        assert!(matches!(TapNumber::parse("E6373: Upper"), TapNumber::Unrecognized(_)));
        assert!(matches!(TapNumber::parse("t-0232: lower"), TapNumber::Unrecognized(_)));

        // Unrecognized but numeric names are still candidates
        assert!(TapNumber::parse("Lab 2 schedule").has_digit());
        assert_eq!(TapNumber::parse("").as_str(), "");
    }

    #[test]
    fn test_erat_wins_over_targa() {
        assert!(matches!(TapNumber::parse("e12: T-34: both"), TapNumber::Erat(_)));
    }

    #[test]
    fn test_light_erat_number() {
        assert_eq!(erat_number("e6373: Tomahawk"), "6373");
        assert_eq!(erat_number("e12: Short"), "12:");
        assert_eq!(erat_number("e123456: Long"), "1234");
        // The light variant does not accept text between digits and colon
        assert_eq!(erat_number("e6257a NCS-F: Chassis"), "e6257a NCS-F: Chassis");
        assert_eq!(erat_number("T-0232: Firepower"), "T-0232: Firepower");
    }
}
