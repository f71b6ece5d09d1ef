//! Climate HTTP Routes
//!
//! Endpoints for precipitation, stations, temperature observations and
//! temperature aggregates. Mounted under `/api/v1.0`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Json, Router,
};

use crate::climate::{
    ClimateResult, ClimateStore, DateRange, DatedValues, StationSelector, TemperatureStats,
};

/// Route listing served at `/`
pub const INDEX_PAGE: &str = "Available Routes:<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tobs<br/>\
/api/v1.0/start<br/>\
/api/v1.0/start/end<br/>\
<p>'start' and 'end' date should be in the format YYYY-MM-DD.</p>";

// ==================
// Shared State
// ==================

/// Climate state shared across handlers
pub struct ClimateState {
    pub store: ClimateStore,
    pub station: StationSelector,
}

impl ClimateState {
    pub fn new(store: ClimateStore, station: StationSelector) -> Self {
        Self { store, station }
    }
}

// ==================
// Climate Routes
// ==================

/// Create climate routes
pub fn climate_routes(state: Arc<ClimateState>) -> Router {
    Router::new()
        .route("/precipitation", get(precipitation_handler))
        .route("/stations", get(stations_handler))
        .route("/tobs", get(tobs_handler))
        // Static segments above win over these captures
        .route("/:start", get(start_handler))
        .route("/:start/:end", get(start_end_handler))
        .with_state(state)
}

/// Route listing at the site root
pub fn index_routes() -> Router {
    Router::new().route("/", get(index_handler))
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

// ==================
// Rolling Window Handlers
// ==================

async fn precipitation_handler(
    State(state): State<Arc<ClimateState>>,
) -> ClimateResult<Json<DatedValues>> {
    let window = state.store.rolling_window().await?;
    let values = state.store.precipitation(&window).await?;

    tracing::debug!(window_start = %window.start_key(), dates = values.len(), "precipitation");
    Ok(Json(values))
}

async fn tobs_handler(State(state): State<Arc<ClimateState>>) -> ClimateResult<Json<DatedValues>> {
    let window = state.store.rolling_window().await?;
    let station = state.store.resolve_station(&state.station).await?;
    let values = state.store.station_temperatures(&station, &window).await?;

    tracing::debug!(
        station = %station,
        window_start = %window.start_key(),
        dates = values.len(),
        "temperature observations"
    );
    Ok(Json(values))
}

// ==================
// Station Handlers
// ==================

async fn stations_handler(
    State(state): State<Arc<ClimateState>>,
) -> ClimateResult<Json<Vec<String>>> {
    let stations = state.store.station_ids().await?;
    Ok(Json(stations))
}

// ==================
// Aggregate Handlers
// ==================

async fn start_handler(
    State(state): State<Arc<ClimateState>>,
    Path(start): Path<String>,
) -> ClimateResult<Json<TemperatureStats>> {
    let range = DateRange::parse(&start, None)?;
    temperature_stats(&state, range).await
}

async fn start_end_handler(
    State(state): State<Arc<ClimateState>>,
    Path((start, end)): Path<(String, String)>,
) -> ClimateResult<Json<TemperatureStats>> {
    let range = DateRange::parse(&start, Some(&end))?;
    temperature_stats(&state, range).await
}

async fn temperature_stats(
    state: &ClimateState,
    range: DateRange,
) -> ClimateResult<Json<TemperatureStats>> {
    if range.is_empty() {
        tracing::debug!(start = %range.start_key(), end = ?range.end_key(), "reversed date range");
    }

    let stats = state.store.temperature_stats(&range).await?;
    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_lists_every_route() {
        for route in [
            "/api/v1.0/precipitation",
            "/api/v1.0/stations",
            "/api/v1.0/tobs",
            "/api/v1.0/start",
            "/api/v1.0/start/end",
        ] {
            assert!(INDEX_PAGE.contains(route), "{route}");
        }
        assert!(INDEX_PAGE.contains("YYYY-MM-DD"));
    }
}
