//! Subscriber setup for the `tracing` events emitted while parsing and
//! traversing. The library never installs one on its own.

use std::sync::Once;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

static INIT: Once = Once::new();

/// `RUST_LOG` takes precedence over the configured directive.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Install the global subscriber described by `config`.
///
/// Only the first call in a process has any effect, and a subscriber
/// installed elsewhere (a test harness, the embedding tool) is left alone.
pub fn init_tracing(config: &LoggingConfig) {
    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(env_filter(config));
        let installed = match config.format {
            LogFormat::Text => registry
                .with(fmt::layer().with_target(true).with_line_number(true))
                .try_init(),
            LogFormat::Json => registry
                .with(fmt::layer().json().with_current_span(true))
                .try_init(),
        };
        if installed.is_ok() {
            info!(format = ?config.format, filter = %config.filter, "xvmdis logging ready");
        }
    });
}
