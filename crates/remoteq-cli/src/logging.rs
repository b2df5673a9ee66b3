//! Log output for the CLI.
//!
//! Events go to stderr so query strings and JSON on stdout stay pipeable.
//! The filter comes from `REMOTEQ_LOG` using `EnvFilter` directive syntax.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "REMOTEQ_LOG";
const DEFAULT_FILTER: &str = "warn";

pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
