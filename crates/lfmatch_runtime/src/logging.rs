//! Log subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILTER;

/// Builds the log filter: `--log` if given, else `RUST_LOG`, else
/// [`DEFAULT_LOG_FILTER`]. An unparsable filter falls back to the default.
#[must_use]
pub fn log_filter(flag: Option<&str>) -> EnvFilter {
    let parsed = match flag {
        Some(directives) => EnvFilter::try_new(directives).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    };
    parsed.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs a stderr `fmt` subscriber. Does nothing if one is already set.
pub fn init_logging(flag: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(flag))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
