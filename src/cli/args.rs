//! CLI argument definitions using clap
//!
//! Commands:
//! - surfsup serve [--config <path>] [--database <path>] [--port <n>]
//! - surfsup summary [--config <path>] [--database <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// surfsup - read-only JSON API over daily weather observations
#[derive(Parser, Debug)]
#[command(name = "surfsup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to JSON configuration file (defaults apply when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overrides `database_path`
    #[arg(long)]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the HTTP API
    Serve {
        #[command(flatten)]
        args: ConfigArgs,

        /// Port to bind, overrides `http.port`
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print a JSON summary of the dataset and exit
    Summary {
        #[command(flatten)]
        args: ConfigArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
