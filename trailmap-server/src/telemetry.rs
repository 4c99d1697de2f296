//! Logging setup

use crate::config::ServerConfig;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Resolved logging configuration.
///
/// Filter precedence: `RUST_LOG` when set and non-empty, then `LOG_LEVEL`,
/// then the `--log-level` flag.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Directive string handed to [`EnvFilter`].
    pub filter: String,
}

fn env_filter_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

impl TelemetryConfig {
    /// Resolve the log filter, falling back to the CLI log level.
    pub fn with_server_config(server_config: &ServerConfig) -> Self {
        let filter = env_filter_var("RUST_LOG")
            .or_else(|| env_filter_var("LOG_LEVEL"))
            .unwrap_or_else(|| server_config.log_level.clone());
        Self { filter }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        let filter = env_filter_var("RUST_LOG")
            .or_else(|| env_filter_var("LOG_LEVEL"))
            .unwrap_or_else(|| "info".to_string());
        Self { filter }
    }
}

/// Install the global tracing subscriber with level filtering and a
/// compact formatter.
///
/// Re-entrant: a no-op when a subscriber is already installed, so tests
/// that share a process can all call it.
pub fn init_logging(config: &TelemetryConfig) {
    if tracing::dispatcher::has_been_set() {
        tracing::debug!("tracing subscriber already installed, skipping");
        return;
    }

    let fmt_layer = tracing_subscriber::fmt::layer().compact().boxed();

    // try_init covers the window where another thread installs a
    // subscriber after the has_been_set check above
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(&config.filter))
        .with(fmt_layer)
        .try_init();
}
