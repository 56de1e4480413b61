//! Tracing initialization for hosting shells.

use tracing_subscriber::{EnvFilter, fmt};

use hubconsole_core::config::logging::LoggingConfig;

/// Initialize tracing from the logging configuration.
///
/// The `RUST_LOG` environment variable takes precedence over the
/// configured level. Call at most once per process.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
