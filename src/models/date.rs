//! Wire date handling.
//!
//! The backend serializes dates either as `YYYY-MM-DD`, as an ISO timestamp,
//! or as epoch milliseconds depending on the column type. Tables show a short
//! date (`Jan 5, 2023`) and forms edit the ISO form (`2023-01-05`).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};

/// Format used by date inputs and sent back to the backend.
pub const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Short date shown in table cells.
pub const DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// A date as received from the backend.
///
/// Values that do not parse are kept verbatim and rendered as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum WireDate {
    Date(NaiveDate),
    Raw(String),
}

impl WireDate {
    /// Interpret a textual wire date.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, INPUT_FORMAT) {
            return Self::Date(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Date(dt.date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return Self::Date(dt.date());
        }
        Self::Raw(text.to_string())
    }

    /// Interpret epoch milliseconds (UTC).
    pub fn from_millis(millis: i64) -> Self {
        match DateTime::from_timestamp_millis(millis) {
            Some(dt) => Self::Date(dt.date_naive()),
            None => Self::Raw(millis.to_string()),
        }
    }

    /// The calendar date, if the wire value was understood.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Raw(_) => None,
        }
    }

    /// Table cell text.
    pub fn display(&self) -> String {
        match self {
            Self::Date(date) => display_date(*date),
            Self::Raw(raw) => raw.clone(),
        }
    }

    /// Form input text.
    pub fn input_value(&self) -> String {
        match self {
            Self::Date(date) => date.format(INPUT_FORMAT).to_string(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for WireDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Millis(i64),
            Text(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Millis(millis) => Self::from_millis(millis),
            Repr::Text(text) => Self::parse(&text),
        })
    }
}

/// Render a date for a table cell.
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Cell text for an optional wire date.
pub fn display_opt(date: &Option<WireDate>) -> String {
    date.as_ref().map(WireDate::display).unwrap_or_default()
}

/// Parse date input flexibly, accepting multiple separators.
pub fn parse_input_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for fmt in &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Some(date);
        }
    }
    None
}

/// Render a wire time of day (`08:59:12.123456`) as `08:59:12`.
pub fn display_time(time: &str) -> String {
    match NaiveTime::parse_from_str(time.trim(), "%H:%M:%S%.f") {
        Ok(t) => t.format("%H:%M:%S").to_string(),
        Err(_) => time.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date() {
        let date = WireDate::parse("2023-01-05");
        assert_eq!(date.display(), "Jan 5, 2023");
        assert_eq!(date.input_value(), "2023-01-05");
    }

    #[test]
    fn test_rfc3339_timestamp() {
        let date = WireDate::parse("2023-01-05T00:00:00.000+00:00");
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2023, 1, 5));
    }

    #[test]
    fn test_local_datetime() {
        let date = WireDate::parse("2024-11-30T17:45:00");
        assert_eq!(date.input_value(), "2024-11-30");
    }

    #[test]
    fn test_epoch_millis() {
        let date: WireDate = serde_json::from_str("1672876800000").unwrap();
        assert_eq!(date.input_value(), "2023-01-05");
    }

    #[test]
    fn test_unknown_kept_verbatim() {
        let date: WireDate = serde_json::from_str("\"next tuesday\"").unwrap();
        assert_eq!(date, WireDate::Raw("next tuesday".to_string()));
        assert_eq!(date.display(), "next tuesday");
        assert_eq!(date.input_value(), "next tuesday");
    }

    #[test]
    fn test_parse_input_date_separators() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 9);
        assert_eq!(parse_input_date("2025-03-09"), expected);
        assert_eq!(parse_input_date("2025/03/09"), expected);
        assert_eq!(parse_input_date(" 2025.03.09 "), expected);
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("09-03-2025"), None);
    }

    #[test]
    fn test_display_time() {
        assert_eq!(display_time("08:59:12.123456"), "08:59:12");
        assert_eq!(display_time("17:00:00"), "17:00:00");
        assert_eq!(display_time("late"), "late");
    }
}
