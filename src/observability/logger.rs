//! Structured logger setup
//!
//! Installs a `tracing` subscriber filtered by `RUST_LOG` (falling back to
//! [`DEFAULT_FILTER`]) and rendered either compact for terminals or as one
//! JSON object per line.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "surfsup=info,tower_http=info";

/// Log line rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single line
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Returns `false` if one was already installed.
pub fn init_logger(format: LogFormat) -> bool {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let result = match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt_layer.compact())
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt_layer.json())
            .try_init(),
    };

    result.is_ok()
}
