//! Structured logging configuration.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when RUST_LOG is unset
const DEFAULT_FILTER: &str = "info";

/// Initialize structured logging
///
/// Log records go to stderr so they never interleave with the bracket
/// output on stdout. Levels are configurable via the RUST_LOG env var;
/// records from the `log` facade used by the engine are captured too.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("Structured logging initialized");
}

/// Log a finished bracket with structured fields
pub fn log_bracket_finished(champion: &str, matches: usize, elapsed_ms: u64) {
    tracing::info!(
        champion = champion,
        matches = matches,
        elapsed_ms = elapsed_ms,
        "Bracket finished"
    );
}
