//! CLI command implementations
//!
//! Both commands load configuration, install the logger, then open the
//! climate store on a fresh tokio runtime.

use std::sync::Arc;

use crate::climate::ClimateStore;
use crate::http_server::{ClimateState, HttpServer};
use crate::observability::init_logger;

use super::args::{Command, ConfigArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { args, port } => serve(&args, port),
        Command::Summary { args } => summary(&args),
    }
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

async fn open_store(config: &Config) -> CliResult<ClimateStore> {
    ClimateStore::open(&config.store_options())
        .await
        .map_err(|e| {
            CliError::boot_failed(format!(
                "Failed to open database {}: {}",
                config.database_path.display(),
                e
            ))
        })
}

/// Serve the HTTP API until interrupted
pub fn serve(args: &ConfigArgs, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::resolve(args)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    init_logger(config.log_format);
    tracing::info!(
        database = %config.database_path.display(),
        max_connections = config.max_connections,
        station = ?config.most_active_station,
        "starting surfsup"
    );

    runtime()?.block_on(async {
        let store = open_store(&config).await?;
        let state = Arc::new(ClimateState::new(store.clone(), config.station_selector()));
        let server = HttpServer::with_config(config.http.clone(), state);

        let result = server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)));

        store.close().await;
        result
    })
}

/// Print a dataset summary and exit
pub fn summary(args: &ConfigArgs) -> CliResult<()> {
    let config = Config::resolve(args)?;
    init_logger(config.log_format);

    let summary = runtime()?.block_on(async {
        let store = open_store(&config).await?;
        let summary = store.summary(&config.station_selector()).await;
        store.close().await;
        summary.map_err(CliError::from)
    })?;

    write_response(&summary)
}
