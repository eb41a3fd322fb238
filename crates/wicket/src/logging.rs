//! Structured logging setup.
//!
//! Thin wrapper around tracing-subscriber: JSON output for production,
//! pretty output for development. `RUST_LOG` overrides the configured level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::Error;

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" => Some(LogFormat::Pretty),
            _ => None,
        }
    }
}

/// Initialize the logging subsystem.
///
/// Fails if a global subscriber is already installed, which embedding
/// applications that bring their own tracing setup are free to do instead.
pub fn init(level: &str, format: LogFormat) -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => init_json(filter),
        LogFormat::Pretty => init_pretty(filter),
    }
}

fn init_json(filter: EnvFilter) -> Result<(), Error> {
    let json_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .flatten_event(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(json_layer)
        .try_init()
        .map_err(|e| Error::LoggingInit(e.to_string()))
}

fn init_pretty(filter: EnvFilter) -> Result<(), Error> {
    let pretty_layer = fmt::layer()
        .pretty()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(pretty_layer)
        .try_init()
        .map_err(|e| Error::LoggingInit(e.to_string()))
}
