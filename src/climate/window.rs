//! Rolling observation window
//!
//! The window is anchored on the most recent measurement date in the
//! store, not on the wall clock. It spans the 365 days leading up to and
//! including that date.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::errors::{ClimateError, ClimateResult};

/// Date format used for storage, path parameters and response keys
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the rolling window in days
pub const WINDOW_DAYS: i64 = 365;

/// Format a date the way the store and the API keys expect
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a date read back from the store.
///
/// Plain `YYYY-MM-DD` is the norm; a trailing time of day is tolerated
/// and discarded.
pub fn parse_stored_date(raw: &str) -> ClimateResult<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date())
        })
        .map_err(|_| ClimateError::MalformedStoredDate(raw.to_string()))
}

/// The last-365-days window relative to the latest observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingWindow {
    latest: NaiveDate,
    start: NaiveDate,
}

impl RollingWindow {
    /// Window ending at `latest`
    pub fn ending_at(latest: NaiveDate) -> ClimateResult<Self> {
        let start = latest
            .checked_sub_signed(Duration::days(WINDOW_DAYS))
            .ok_or_else(|| ClimateError::MalformedStoredDate(format_date(latest)))?;

        Ok(Self { latest, start })
    }

    /// Window anchored on a raw `MAX(date)` result.
    ///
    /// `None` means the measurement table is empty.
    pub fn from_latest(latest: Option<&str>) -> ClimateResult<Self> {
        let raw = latest.ok_or(ClimateError::EmptyDataset)?;
        Self::ending_at(parse_stored_date(raw)?)
    }

    /// Most recent observation date
    pub fn latest(&self) -> NaiveDate {
        self.latest
    }

    /// Inclusive lower bound
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Lower bound as bound into `date >= ?`
    pub fn start_key(&self) -> String {
        format_date(self.start)
    }

    /// Whether a stored date string falls inside the window
    pub fn contains(&self, date: &str) -> bool {
        date >= self.start_key().as_str()
    }
}
