//! Tracing setup for the client binaries

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Filter from `RUST_LOG`, INFO when unset or unparsable
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global fmt subscriber
pub fn init() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}
