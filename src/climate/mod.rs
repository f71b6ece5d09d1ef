//! # Climate Query Module
//!
//! Read-only queries over the weather-observation dataset.
//!
//! # Components
//!
//! - `window` - rolling 365-day window anchored on the latest measurement
//! - `range` - caller-supplied date ranges for temperature aggregates
//! - `store` - pooled, read-only SQLite access
//! - `models` - JSON response shapes

mod errors;
mod models;
mod range;
mod store;
mod window;

pub use errors::{ClimateError, ClimateResult, ErrorResponse};
pub use models::{
    collapse_by_date, DatasetSummary, DatedValues, TemperatureEntry, TemperatureStats,
};
pub use range::{parse_request_date, DateRange};
pub use store::{ClimateStore, StationSelector, StoreOptions, REFERENCE_ACTIVE_STATION};
pub use window::{format_date, parse_stored_date, RollingWindow, DATE_FORMAT, WINDOW_DAYS};
