//! Shared fixtures: a throwaway SQLite file shaped like the Hawaii dataset.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;
use tower::ServiceExt;

use surfsup::climate::{ClimateStore, StationSelector};
use surfsup::http_server::{ClimateState, HttpServer};

/// `(station, date, prcp, tobs)`
pub type MeasurementRow = (&'static str, &'static str, Option<f64>, Option<f64>);

pub const HAWAII_STATIONS: &[&str] = &["USC00519281", "USC00519397", "USC00513117"];

/// Inserted in this order, so rowid follows the slice index.
pub const HAWAII_MEASUREMENTS: &[MeasurementRow] = &[
    ("USC00519397", "2016-08-22", Some(0.40), Some(70.0)),
    ("USC00519397", "2016-08-23", Some(0.08), Some(81.0)),
    ("USC00519281", "2016-08-23", Some(1.79), Some(77.0)),
    ("USC00513117", "2017-01-15", None, Some(65.0)),
    ("USC00519281", "2017-01-15", Some(0.02), Some(68.0)),
    ("USC00519281", "2017-08-22", Some(0.00), Some(79.0)),
    ("USC00519397", "2017-08-23", Some(0.00), Some(81.0)),
    ("USC00519281", "2017-08-23", Some(0.45), Some(76.0)),
];

/// Keeps the temp dir alive for as long as the database is in use
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

/// Create a database with both tables and the given rows
pub async fn seed(stations: &[&str], measurements: &[MeasurementRow]) -> Fixture {
    seed_with(true, stations, measurements).await
}

/// Create a database with only the `station` table
pub async fn seed_without_measurements(stations: &[&str]) -> Fixture {
    seed_with(false, stations, &[]).await
}

async fn seed_with(
    measurement_table: bool,
    stations: &[&str],
    measurements: &[MeasurementRow],
) -> Fixture {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("hawaii.sqlite");

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create fixture database");

    sqlx::query(
        "CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    if measurement_table {
        sqlx::query(
            "CREATE TABLE measurement (
                id INTEGER PRIMARY KEY,
                station TEXT,
                date TEXT,
                prcp FLOAT,
                tobs FLOAT
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
    }

    for station in stations {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?1, ?2, 21.3, -157.8, 3.0)",
        )
        .bind(*station)
        .bind(format!("{station} HI US"))
        .execute(&pool)
        .await
        .unwrap();
    }

    for (station, date, prcp, tobs) in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(*station)
            .bind(*date)
            .bind(*prcp)
            .bind(*tobs)
            .execute(&pool)
            .await
            .unwrap();
    }

    pool.close().await;

    Fixture { _dir: dir, path }
}

pub async fn open_store(fixture: &Fixture) -> ClimateStore {
    ClimateStore::open_path(&fixture.path)
        .await
        .expect("Failed to open fixture store")
}

/// In-process router over a fixture database
pub async fn router(fixture: &Fixture, station: StationSelector) -> Router {
    let state = Arc::new(ClimateState::new(open_store(fixture).await, station));
    HttpServer::new(state).router()
}

/// GET `uri` and return status plus body text
pub async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// GET `uri` and parse the body as JSON
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(router, uri).await;
    let json = serde_json::from_str(&body).unwrap_or_else(|e| panic!("{uri}: {e}: {body}"));
    (status, json)
}
