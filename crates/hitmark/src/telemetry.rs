//! Logging setup for binaries and tests.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "HITMARK_LOG";

/// Installs a global `tracing` subscriber filtered by `HITMARK_LOG`
/// (default `info`).
///
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing(pretty: bool) -> bool {
    let directive = std::env::var(LOG_ENV).unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = if pretty { fmt::layer().pretty().boxed() } else { fmt::layer().compact().boxed() };
    tracing_subscriber::registry().with(filter).with(fmt_layer).try_init().is_ok()
}
