//! surfsup - read-only JSON API over daily weather observations
//!
//! Serves precipitation, station and temperature slices of a SQLite
//! climate dataset over HTTP.

pub mod cli;
pub mod climate;
pub mod http_server;
pub mod observability;
