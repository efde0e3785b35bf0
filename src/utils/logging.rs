//! Diagnostic logging.
//!
//! Everything the user is meant to read goes through the console; `tracing`
//! events are for whoever is debugging the client. They go to stderr, filtered
//! by `GLITCHAT_LOG` (same syntax as `RUST_LOG`), and default to warnings only
//! so a normal session stays quiet.

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV_VAR: &str = "GLITCHAT_LOG";
pub const DEFAULT_DIRECTIVE: &str = "warn";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Calling this twice is harmless; the second
/// call leaves the first subscriber in place.
pub fn init() {
    let installed = fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
