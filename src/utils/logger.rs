use std::env;
use tracing_subscriber::EnvFilter;

pub const DEBUG_ENV: &str = "POWERLINE_PROMPT_DEBUG";
pub const LOG_FILTER_ENV: &str = "POWERLINE_PROMPT_LOG";

/// Install the stderr logger when `POWERLINE_PROMPT_DEBUG` is set.
///
/// Stdout carries the prompt itself, so nothing is logged by default.
pub fn init() {
    if env::var_os(DEBUG_ENV).is_none() {
        return;
    }

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("debug"));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
