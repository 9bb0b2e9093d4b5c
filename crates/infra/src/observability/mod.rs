//! Logging setup
//!
//! Installs a global `tracing` subscriber: an `EnvFilter` (taken from
//! `RUST_LOG` when set, otherwise from [`LoggingConfig::filter`]) in front of
//! a plain or JSON fmt layer.

use anyhow::Context;
use careerdeck_domain::LoggingConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Build the filter a subscriber would use for `config`.
///
/// # Errors
/// Fails if the configured directive does not parse.
pub fn env_filter(config: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter directive {:?}", config.filter))
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed; the existing
/// one is left in place.
///
/// # Errors
/// Fails if the configured directive does not parse.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<bool> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(fmt::layer().json().with_current_span(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    match installed {
        Ok(()) => {
            tracing::debug!(json = config.json, "tracing initialised");
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}
