//! # HTTP Server Module
//!
//! Axum server exposing the climate dataset as read-only JSON.
//!
//! # Endpoints
//!
//! - `/` - Route listing
//! - `/health` - Health check
//! - `/api/v1.0/*` - Precipitation, stations, temperatures and aggregates

pub mod climate_routes;
pub mod config;
pub mod observability_routes;
pub mod server;

pub use climate_routes::ClimateState;
pub use config::HttpServerConfig;
pub use server::{HttpServer, API_PREFIX};
