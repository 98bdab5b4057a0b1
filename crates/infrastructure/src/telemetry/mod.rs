//! Logging setup
//!
//! A `tracing-subscriber` registry with an [`EnvFilter`] and a `fmt` layer
//! writing to standard error. Standard output is left to the command's
//! summary.

use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when neither `RUST_LOG` nor `-v` is given
    /// (e.g. "warn", "infrastructure=debug")
    #[serde(default)]
    pub filter: Option<String>,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Filter directive for a `-v` count: 0 = warn, 1 = info, 2 = debug, 3+ = trace
#[must_use]
pub const fn verbosity_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Resolve the filter directive when `RUST_LOG` is unset
///
/// An explicit `-v` wins over the configured filter.
#[must_use]
pub fn filter_directive(config: &LoggingConfig, verbosity: u8) -> String {
    match (&config.filter, verbosity) {
        (Some(filter), 0) => filter.clone(),
        _ => verbosity_level(verbosity).to_string(),
    }
}

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over both `verbosity` and the configured
/// filter.
pub fn init_logging(config: &LoggingConfig, verbosity: u8) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config, verbosity)));

    let json_layer = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer = (!config.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(json = config.json, verbosity, "Logging initialized");
    Ok(())
}
