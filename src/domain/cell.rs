//! Loosely-typed table cells and permissive coercions.
//!
//! Exported trade tables arrive as a grid of untyped values. [`Cell`] keeps
//! the distinction between text, numbers, and genuinely empty cells explicit
//! so that coercion is always a documented conversion with a fallback, never
//! an implicit cast.

use chrono::{NaiveDate, NaiveDateTime};

/// A single untyped cell from a raw export.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

/// Rows x columns of untyped cells, no assumed header. Transient: consumed
/// by the table locator.
pub type RawTable = Vec<Vec<Cell>>;

impl Cell {
    /// Render the cell as text for header matching and opaque identifiers.
    ///
    /// Numbers render without a forced decimal point so a ticket column read
    /// as numeric still compares equal to its text form.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Cell::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Normalize a column label for matching: trim, lowercase, strip spaces.
///
/// `" Open Time "` and `"OPENTIME"` both normalize to `"opentime"`.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "")
}

/// Date/time layouts observed across MT5 and spreadsheet exports.
/// Seconds are optional; date-only values resolve to midnight.
const DATETIME_FORMATS: &[&str] = &[
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y.%m.%d", "%Y-%m-%d", "%Y/%m/%d"];

/// Permissive timestamp coercion. Returns `None` when the cell cannot be
/// read as a date/time; the caller decides what a missing timestamp means.
pub fn parse_timestamp(cell: &Cell) -> Option<NaiveDateTime> {
    let Cell::Text(raw) = cell else {
        return None;
    };
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(ts);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Permissive numeric coercion. Accepts plain floats, thousands separators
/// (`1,234.56` and `1 234.56`) and decimal commas (`12,34`). Returns `None`
/// when nothing numeric can be read.
pub fn parse_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) => Some(*n),
        Cell::Empty => None,
        Cell::Text(raw) => {
            let value = raw.trim();
            if value.is_empty() {
                return None;
            }
            if let Ok(n) = value.parse::<f64>() {
                return Some(n);
            }

            let compact: String = value.chars().filter(|c| *c != ' ').collect();
            if let Ok(n) = compact.parse::<f64>() {
                return Some(n);
            }
            if compact.contains(',') {
                let cleaned = if compact.contains('.') {
                    // 1,234.56 — comma is a thousands separator
                    compact.replace(',', "")
                } else {
                    // 12,34 — comma is the decimal separator
                    compact.replace(',', ".")
                };
                return cleaned.parse::<f64>().ok();
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn normalize_label_strips_case_and_spaces() {
        assert_eq!(normalize_label(" Open Time "), "opentime");
        assert_eq!(normalize_label("CLOSE TIME"), "closetime");
        assert_eq!(normalize_label("Ticket"), "ticket");
        assert_eq!(normalize_label("profit"), "profit");
    }

    #[test]
    fn as_text_renders_integral_numbers_without_fraction() {
        assert_eq!(Cell::Number(123456.0).as_text(), "123456");
        assert_eq!(Cell::Number(1.5).as_text(), "1.5");
        assert_eq!(Cell::Empty.as_text(), "");
    }

    #[test]
    fn parse_timestamp_mt5_dot_format() {
        let ts = parse_timestamp(&text("2024.01.15 10:30:45")).unwrap();
        assert_eq!(ts.to_string(), "2024-01-15 10:30:45");
    }

    #[test]
    fn parse_timestamp_without_seconds() {
        let ts = parse_timestamp(&text("2024.01.15 10:30")).unwrap();
        assert_eq!(ts.to_string(), "2024-01-15 10:30:00");
    }

    #[test]
    fn parse_timestamp_iso_and_slash_layouts() {
        assert!(parse_timestamp(&text("2024-01-15 10:30:45")).is_some());
        assert!(parse_timestamp(&text("2024-01-15T10:30:45")).is_some());
        assert!(parse_timestamp(&text("2024/01/15 10:30:45")).is_some());
    }

    #[test]
    fn parse_timestamp_date_only_is_midnight() {
        let ts = parse_timestamp(&text("2024-01-15")).unwrap();
        assert_eq!(ts.to_string(), "2024-01-15 00:00:00");
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp(&text("not a date")).is_none());
        assert!(parse_timestamp(&text("")).is_none());
        assert!(parse_timestamp(&Cell::Empty).is_none());
        assert!(parse_timestamp(&Cell::Number(45678.0)).is_none());
    }

    #[test]
    fn parse_number_plain_and_typed() {
        assert_eq!(parse_number(&text("1.25")), Some(1.25));
        assert_eq!(parse_number(&text(" -3 ")), Some(-3.0));
        assert_eq!(parse_number(&Cell::Number(0.5)), Some(0.5));
    }

    #[test]
    fn parse_number_thousands_separators() {
        assert_eq!(parse_number(&text("1,234.56")), Some(1234.56));
        assert_eq!(parse_number(&text("1 234.56")), Some(1234.56));
    }

    #[test]
    fn parse_number_decimal_comma() {
        assert_eq!(parse_number(&text("12,34")), Some(12.34));
    }

    #[test]
    fn parse_number_rejects_garbage() {
        assert!(parse_number(&text("abc")).is_none());
        assert!(parse_number(&text("")).is_none());
        assert!(parse_number(&Cell::Empty).is_none());
    }
}
