//! # HTTP Server
//!
//! Main HTTP server combining the index page, health check and climate
//! routes.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::climate_routes::{climate_routes, index_routes, ClimateState};
use super::config::HttpServerConfig;
use super::observability_routes::health_routes;

/// Prefix for the versioned JSON API
pub const API_PREFIX: &str = "/api/v1.0";

/// Level of the per-request span and response event
pub const REQUEST_LOG_LEVEL: Level = Level::INFO;

/// Parse configured CORS origins, skipping (and logging) invalid ones
fn parse_cors_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

/// HTTP Server for the climate API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new(state: Arc<ClimateState>) -> Self {
        Self::with_config(HttpServerConfig::default(), state)
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig, state: Arc<ClimateState>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: Arc<ClimateState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parse_cors_origins(&config.cors_origins)))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(index_routes())
            .merge(health_routes(state.clone()))
            .nest(API_PREFIX, climate_routes(state))
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(REQUEST_LOG_LEVEL))
                    .on_response(DefaultOnResponse::new().level(REQUEST_LOG_LEVEL)),
            )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;

        tracing::info!(%addr, "climate API listening");
        tracing::info!(
            "routes: /, /health, {API_PREFIX}/{{precipitation,stations,tobs,<start>,<start>/<end>}}"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
