//! Observability for surfsup
//!
//! Structured logging through `tracing`. Request spans come from
//! `tower_http`'s trace layer in the HTTP server.

mod logger;

pub use logger::{init_logger, LogFormat, DEFAULT_FILTER};
