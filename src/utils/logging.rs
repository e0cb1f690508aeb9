//! Logging utilities
//!
//! Simple logging initialization for the loader and its embedders:
//! - Respects the RUST_LOG environment variable
//! - Falls back to a config-supplied filter, then to "info"
//! - Optional JSON output behind the `json-logging` feature
//!
//! Initialization is global and must happen at most once per process;
//! embedders that install their own subscriber should skip these helpers.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize logging for the loader
///
/// RUST_LOG takes precedence; otherwise `filter` is used if provided,
/// defaulting to "info".
///
/// # Example
/// ```no_run
/// use module_bootstrap::utils::init_logging;
///
/// init_logging(Some("module_bootstrap=debug"));
/// ```
pub fn init_logging(filter: Option<&str>) {
    let env_filter = resolve_filter(filter);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(std::env::var("NO_COLOR").is_err()),
        )
        .with(env_filter)
        .init();
}

/// Initialize logging with JSON output (for production/monitoring)
///
/// Same filter resolution as [`init_logging`], formatted for log
/// aggregation systems.
#[cfg(feature = "json-logging")]
pub fn init_json_logging(filter: Option<&str>) {
    let env_filter = resolve_filter(filter);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_span_list(true),
        )
        .with(env_filter)
        .init();
}

/// Initialize logging from loader configuration
///
/// `None` (or a config without a logging section) behaves like
/// [`init_logging`] with no filter.
pub fn init_logging_from_config(config: Option<&LoggingConfig>) {
    let filter = config.and_then(|c| c.filter.as_deref());

    if config.map(|c| c.json_format).unwrap_or(false) {
        #[cfg(feature = "json-logging")]
        {
            init_json_logging(filter);
            return;
        }
    }

    init_logging(filter);
}

// RUST_LOG wins over the config filter; "info" is the floor.
fn resolve_filter(filter: Option<&str>) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(filter.unwrap_or("info"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_resolution_prefers_config_when_rust_log_unset() {
        // Can't install a subscriber here without conflicting with other
        // tests; just exercise filter construction.
        if std::env::var("RUST_LOG").is_err() {
            let filter = resolve_filter(Some("module_bootstrap=trace"));
            assert!(format!("{}", filter).contains("module_bootstrap"));
        }
    }
}
