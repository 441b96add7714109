//! Parsing of typed answers.
//!
//! Numbers are not validated by the menu loop: a non-numeric ID, GPA or
//! salary comes back as `Error::InvalidInput`, which ends the session. A
//! malformed date is an ordinary recoverable error.

use studentdb_core::parse_date;
use time::Date;

use crate::common::{Error, RecordId, Result};

/// `None` for blank text, otherwise the text as typed.
pub fn optional_text(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

pub fn parse_id(text: &str) -> Result<RecordId> {
    text.trim().parse().map_err(|_| Error::InvalidInput {
        field: "ID",
        reason: format!("'{}' is not a whole number", text),
    })
}

/// A finite number; `nan` and `inf` are rejected like any other non-number.
pub fn parse_number(field: &'static str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| Error::InvalidInput {
            field,
            reason: format!("'{}' is not a number", text),
        })
}

/// Blank means "not supplied".
pub fn parse_optional_number(field: &'static str, text: &str) -> Result<Option<f64>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_number(field, text).map(Some)
}

/// Blank means "not supplied".
pub fn parse_optional_date(text: &str) -> Result<Option<Date>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_date(text).map(Some).map_err(|_| Error::InvalidDate {
        value: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(" 42 ").unwrap(), 42);
        let err = parse_id("abc").unwrap_err();
        assert!(matches!(err, Error::InvalidInput { field: "ID", .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_optional_number() {
        assert_eq!(parse_optional_number("GPA", "").unwrap(), None);
        assert_eq!(parse_optional_number("GPA", "3.25").unwrap(), Some(3.25));
        assert!(matches!(
            parse_optional_number("GPA", "three"),
            Err(Error::InvalidInput { field: "GPA", .. })
        ));
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        for text in ["nan", "NaN", "inf", "-inf", "infinity"] {
            let err = parse_optional_number("GPA", text).unwrap_err();
            assert!(matches!(err, Error::InvalidInput { field: "GPA", .. }), "{text}");
        }
        assert_eq!(parse_number("salary", "-0.5").unwrap(), -0.5);
    }

    #[test]
    fn test_optional_date() {
        assert_eq!(parse_optional_date("  ").unwrap(), None);
        assert!(parse_optional_date("2024-02-29").unwrap().is_some());

        let err = parse_optional_date("2023-02-29").unwrap_err();
        assert!(matches!(err, Error::InvalidDate { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("   ".to_string()), None);
        assert_eq!(optional_text("CS".to_string()).as_deref(), Some("CS"));
    }
}
