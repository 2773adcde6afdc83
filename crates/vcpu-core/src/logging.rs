//! Diagnostic logging setup.
//!
//! Library crates only emit `tracing` events; binaries decide where they go.

use tracing_subscriber::{EnvFilter, fmt};

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize logging to stderr.
///
/// `RUST_LOG` overrides `default_filter`. Calling this more than once is
/// harmless: later calls leave the first subscriber in place.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
