//! Log output for the command-line front-ends.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Filter directive for a `-v` count: `info`, then `debug`, then `trace`.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over the verbosity count when set.
pub fn init_logging(verbosity: u8) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}
