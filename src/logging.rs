//! Logging initialization for the `wb` binary.
//!
//! Configures the `tracing` subscriber with level filtering via the `WB_LOG`
//! environment variable. When the variable is unset or invalid, the level
//! from the `[logging]` section of the config file is used.
//!
//! # Usage
//!
//! ```bash
//! # Level from config.toml (info unless changed)
//! wb list
//!
//! # Debug level
//! WB_LOG=debug wb add StatusWidget
//!
//! # Module-specific filtering
//! WB_LOG=widget_board::layout=debug,warn wb list
//! ```

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "WB_LOG";

/// Builds the filter: `WB_LOG` if it parses, otherwise `fallback`.
pub fn filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_directive()))
}

/// Initialize the tracing subscriber.
///
/// Output goes to stderr so that command output on stdout stays parseable.
///
/// # Panics
///
/// Panics if a global subscriber has already been set (should only be
/// called once, at startup).
pub fn init(fallback: LogLevel) {
    fmt()
        .with_env_filter(filter(fallback))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
