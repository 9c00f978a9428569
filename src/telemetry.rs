//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured level, so a single run can be made
//! more verbose without touching the configuration.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::TelemetryConfig;

/// Filter from `RUST_LOG`, falling back to the configured directive.
pub fn env_filter(config: &TelemetryConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Installs the global subscriber.
///
/// Returns an error if a global subscriber was already set.
pub fn init(config: &TelemetryConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(config));
    if config.json {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_is_used_without_rust_log() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = TelemetryConfig {
            log_level: "warn".to_string(),
            json: false,
        };
        assert!(env_filter(&config).to_string().contains("warn"));
    }

    #[test]
    fn second_init_is_rejected() {
        let config = TelemetryConfig::default();
        let _ = init(&config);
        assert!(init(&config).is_err());
    }
}
