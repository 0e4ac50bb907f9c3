//! Diagnostic logging for the CLI.
//!
//! Engine events are emitted with `tracing`; the binary installs a `fmt`
//! subscriber writing to stderr so stdout stays clean for results and JSON.
//! The filter comes from `POKERLAB_LOG`, then `RUST_LOG`, then `warn`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "POKERLAB_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Picks the first parseable directive set, falling back to `warn`.
pub fn build_filter(primary: Option<&str>, secondary: Option<&str>) -> EnvFilter {
    [primary, secondary]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .find_map(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize logging for the application. Safe to call more than once;
/// later calls leave the first subscriber in place.
pub fn init_logging() {
    let primary = std::env::var(LOG_ENV).ok();
    let secondary = std::env::var("RUST_LOG").ok();
    let filter = build_filter(primary.as_deref(), secondary.as_deref());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
