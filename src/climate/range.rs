//! Caller-supplied date ranges for temperature aggregates

use chrono::NaiveDate;

use super::errors::{ClimateError, ClimateResult};
use super::window::{format_date, DATE_FORMAT};

/// Parse a `start`/`end` path parameter.
///
/// Only strict `YYYY-MM-DD` is accepted: the value must format back to
/// exactly the same text. Anything else is the caller's mistake and
/// surfaces as a 400.
pub fn parse_request_date(raw: &str) -> ClimateResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .filter(|date| format_date(*date) == raw)
        .ok_or_else(|| ClimateError::InvalidDate(raw.to_string()))
}

/// Inclusive date range, open-ended when `end` is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Every date from `start` onwards
    pub fn from(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// Dates between `start` and `end`, both inclusive
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Build a range from raw path parameters
    pub fn parse(start: &str, end: Option<&str>) -> ClimateResult<Self> {
        let start = parse_request_date(start)?;
        match end {
            Some(end) => Ok(Self::between(start, parse_request_date(end)?)),
            None => Ok(Self::from(start)),
        }
    }

    /// Lower bound as bound into `date >= ?`
    pub fn start_key(&self) -> String {
        format_date(self.start)
    }

    /// Upper bound as bound into `date <= ?`
    pub fn end_key(&self) -> Option<String> {
        self.end.map(format_date)
    }

    /// A reversed range matches nothing
    pub fn is_empty(&self) -> bool {
        matches!(self.end, Some(end) if end < self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_open_range() {
        let range = DateRange::parse("2017-08-23", None).unwrap();
        assert_eq!(range.start_key(), "2017-08-23");
        assert_eq!(range.end_key(), None);
        assert!(!range.is_empty());
    }

    #[test]
    fn test_parse_closed_range() {
        let range = DateRange::parse("2017-08-24", Some("2017-08-25")).unwrap();
        assert_eq!(range.start_key(), "2017-08-24");
        assert_eq!(range.end_key().as_deref(), Some("2017-08-25"));
    }

    #[test]
    fn test_reversed_range_is_empty_not_invalid() {
        let range = DateRange::parse("2017-08-25", Some("2017-08-01")).unwrap();
        assert!(range.is_empty());
    }

    #[test]
    fn test_rejects_malformed_dates() {
        for raw in [
            "2017-8-23",
            "2017-02-30",
            "20170823",
            "latest",
            "2017-08-23T00:00",
            " 2017-8-23",
            "2017-08- 3",
            "-001-01-01",
            "+2017-08-23",
        ] {
            let err = DateRange::parse(raw, None).unwrap_err();
            assert!(matches!(err, ClimateError::InvalidDate(ref d) if d == raw), "{raw}");
        }
    }

    #[test]
    fn test_rejects_malformed_end() {
        let err = DateRange::parse("2017-08-23", Some("soon")).unwrap_err();
        assert!(matches!(err, ClimateError::InvalidDate(ref d) if d == "soon"));
    }
}
