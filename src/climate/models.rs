//! Response shapes for the climate API

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// Observation values keyed by date.
///
/// A key-unique container: when several rows share a date the last one
/// in query order wins. Keys serialize in ascending date order.
pub type DatedValues = BTreeMap<String, Option<f64>>;

/// Fold `(date, value)` rows into a [`DatedValues`] mapping
pub fn collapse_by_date<I>(rows: I) -> DatedValues
where
    I: IntoIterator<Item = (String, Option<f64>)>,
{
    rows.into_iter().collect()
}

/// Min/avg/max of temperature observations over a date range.
///
/// All three are `None` when no row matched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

/// One single-key object in the temperature summary list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TemperatureEntry {
    #[serde(rename = "Minimum Temperature")]
    Minimum(Option<f64>),
    #[serde(rename = "Average Temperature")]
    Average(Option<f64>),
    #[serde(rename = "Maximum Temperature")]
    Maximum(Option<f64>),
}

impl TemperatureStats {
    /// Stats of an empty result set
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }

    /// Entries in response order: min, avg, max
    pub fn entries(&self) -> [TemperatureEntry; 3] {
        [
            TemperatureEntry::Minimum(self.min),
            TemperatureEntry::Average(self.avg),
            TemperatureEntry::Maximum(self.max),
        ]
    }
}

impl Serialize for TemperatureStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries().serialize(serializer)
    }
}

/// Overview of the dataset printed by `surfsup summary`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub latest_date: String,
    pub window_start: String,
    pub station_count: i64,
    pub active_station: String,
}
