//! # Climate Store
//!
//! Read-only access to the `station` and `measurement` tables.
//!
//! The store owns a small SQLite pool. Every operation acquires one
//! connection for exactly one query; the pooled guard drops at the end of
//! the call and the connection goes back to the pool whether the query
//! succeeded or not.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::errors::{ClimateError, ClimateResult};
use super::models::{collapse_by_date, DatasetSummary, DatedValues, TemperatureStats};
use super::range::DateRange;
use super::window::{format_date, RollingWindow};

/// Station reported by `/tobs` before any configuration is applied
pub const REFERENCE_ACTIVE_STATION: &str = "USC00519281";

/// Pool settings for [`ClimateStore::open`]
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl StoreOptions {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// How the "most active station" for `/tobs` is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationSelector {
    /// A configured station id
    Fixed(String),
    /// The station with the most measurement rows, looked up per request
    MostActive,
}

impl StationSelector {
    pub fn from_config(station: Option<&str>) -> Self {
        match station {
            Some(id) => StationSelector::Fixed(id.to_string()),
            None => StationSelector::MostActive,
        }
    }
}

/// Read-only handle on the climate database
#[derive(Debug, Clone)]
pub struct ClimateStore {
    pool: SqlitePool,
}

impl ClimateStore {
    /// Open the database file read-only.
    ///
    /// Fails if the file does not exist; it is never created.
    pub async fn open(options: &StoreOptions) -> ClimateResult<Self> {
        let connect = SqliteConnectOptions::new()
            .filename(&options.database_path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.acquire_timeout)
            .connect_with(connect)
            .await?;

        tracing::debug!(
            path = %options.database_path.display(),
            max_connections = options.max_connections,
            "opened climate store"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Path-only shorthand for [`ClimateStore::open`]
    pub async fn open_path(path: &Path) -> ClimateResult<Self> {
        Self::open(&StoreOptions::new(path)).await
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn connection(&self) -> ClimateResult<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> ClimateResult<()> {
        let mut conn = self.connection().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    // ==================
    // Rolling Window
    // ==================

    /// Raw `MAX(date)` over all measurements
    pub async fn latest_date(&self) -> ClimateResult<Option<String>> {
        let mut conn = self.connection().await?;
        let latest = sqlx::query_scalar::<_, Option<String>>("SELECT MAX(date) FROM measurement")
            .fetch_one(&mut *conn)
            .await?;

        Ok(latest)
    }

    /// Last-365-days window anchored on the latest measurement
    pub async fn rolling_window(&self) -> ClimateResult<RollingWindow> {
        let latest = self.latest_date().await?;
        RollingWindow::from_latest(latest.as_deref())
    }

    /// Precipitation per date inside the window
    pub async fn precipitation(&self, window: &RollingWindow) -> ClimateResult<DatedValues> {
        let mut conn = self.connection().await?;
        let rows = sqlx::query_as::<_, (String, Option<f64>)>(
            "SELECT date, prcp FROM measurement \
             WHERE date >= ?1 \
             ORDER BY date DESC, rowid ASC",
        )
        .bind(window.start_key())
        .fetch_all(&mut *conn)
        .await?;

        Ok(collapse_by_date(rows))
    }

    /// Temperature observations per date for one station inside the window
    pub async fn station_temperatures(
        &self,
        station: &str,
        window: &RollingWindow,
    ) -> ClimateResult<DatedValues> {
        let mut conn = self.connection().await?;
        let rows = sqlx::query_as::<_, (String, Option<f64>)>(
            "SELECT date, tobs FROM measurement \
             WHERE station = ?1 AND date >= ?2 \
             ORDER BY date DESC, rowid ASC",
        )
        .bind(station)
        .bind(window.start_key())
        .fetch_all(&mut *conn)
        .await?;

        Ok(collapse_by_date(rows))
    }

    // ==================
    // Stations
    // ==================

    /// Distinct station identifiers in store order
    pub async fn station_ids(&self) -> ClimateResult<Vec<String>> {
        let mut conn = self.connection().await?;
        let ids = sqlx::query_scalar::<_, String>("SELECT DISTINCT station FROM station")
            .fetch_all(&mut *conn)
            .await?;

        Ok(ids)
    }

    /// Station with the most measurement rows; ties go to the smallest id
    pub async fn most_active_station(&self) -> ClimateResult<String> {
        let mut conn = self.connection().await?;
        let station = sqlx::query_scalar::<_, String>(
            "SELECT station FROM measurement \
             GROUP BY station \
             ORDER BY COUNT(*) DESC, station ASC \
             LIMIT 1",
        )
        .fetch_optional(&mut *conn)
        .await?;

        station.ok_or(ClimateError::EmptyDataset)
    }

    /// Resolve a [`StationSelector`] to a concrete station id
    pub async fn resolve_station(&self, selector: &StationSelector) -> ClimateResult<String> {
        match selector {
            StationSelector::Fixed(id) => Ok(id.clone()),
            StationSelector::MostActive => self.most_active_station().await,
        }
    }

    // ==================
    // Aggregates
    // ==================

    /// Min/avg/max of `tobs` over an inclusive date range
    pub async fn temperature_stats(&self, range: &DateRange) -> ClimateResult<TemperatureStats> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT CAST(MIN(tobs) AS REAL) AS min_tobs, \
                    CAST(AVG(tobs) AS REAL) AS avg_tobs, \
                    CAST(MAX(tobs) AS REAL) AS max_tobs \
             FROM measurement WHERE date >= ",
        );
        qb.push_bind(range.start_key());
        if let Some(end) = range.end_key() {
            qb.push(" AND date <= ");
            qb.push_bind(end);
        }

        let mut conn = self.connection().await?;
        let (min, avg, max) = qb
            .build_query_as::<(Option<f64>, Option<f64>, Option<f64>)>()
            .fetch_one(&mut *conn)
            .await?;

        Ok(TemperatureStats { min, avg, max })
    }

    // ==================
    // Summary
    // ==================

    /// Dataset overview for the `summary` command
    pub async fn summary(&self, selector: &StationSelector) -> ClimateResult<DatasetSummary> {
        let window = self.rolling_window().await?;

        let station_count = {
            let mut conn = self.connection().await?;
            sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT station) FROM station")
                .fetch_one(&mut *conn)
                .await?
        };

        Ok(DatasetSummary {
            latest_date: format_date(window.latest()),
            window_start: window.start_key(),
            station_count,
            active_station: self.resolve_station(selector).await?,
        })
    }
}
