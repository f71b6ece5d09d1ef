//! CLI module for surfsup
//!
//! Provides command-line interface for:
//! - serve: Open the database and serve the HTTP API
//! - summary: One-shot dataset overview as JSON

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, ConfigArgs};
pub use commands::{run, run_command, serve, summary};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{success_envelope, write_response};
