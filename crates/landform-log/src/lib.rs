//! Structured logging for Landform.
//!
//! Console output with uptime timestamps and module paths, plus JSON file
//! logging in debug builds. The filter comes from `RUST_LOG` when set, then
//! from the configured `debug.log_level`.

use landform_config::Config;
use std::fs::File;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "landform.log";

/// Resolve the filter string for a given config.
///
/// An empty `log_level` falls back to [`DEFAULT_FILTER`].
pub fn filter_string(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - whether file logging is enabled
/// * `config` - optional configuration supplying the log level
///
/// Calling this twice panics inside `tracing_subscriber`, so binaries call it
/// exactly once at startup.
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_string(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_file) = open_log_file(log_dir, debug_build) {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create the JSON log file inside `log_dir`, making the directory if needed.
///
/// Returns `None` outside debug builds, without a directory, or when the file
/// cannot be created; logging then stays console-only.
pub fn open_log_file(log_dir: Option<&Path>, debug_build: bool) -> Option<File> {
    let log_dir = log_dir.filter(|_| debug_build)?;
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE_NAME)).ok()
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
