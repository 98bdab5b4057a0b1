//! Application configuration
//!
//! Sources, later ones winning:
//! - built-in defaults
//! - `drivebc-kml.toml` in the working directory, or the file given with `--config`
//! - environment variables prefixed `DRIVEBC_KML_`, with `__` between
//!   nested keys (e.g. `DRIVEBC_KML_OUTPUT__PATH`, `DRIVEBC_KML_RETRY__MAX_RETRIES`)

mod output;

use std::path::Path;

use integration_drivebc::{DriveBcConfig, RetryConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use output::OutputConfig;

use crate::telemetry::LoggingConfig;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "drivebc-kml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DRIVEBC_KML";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Feed endpoints and HTTP settings
    #[serde(default)]
    pub drivebc: DriveBcConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Retry policy for feed requests
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Without `path`, `drivebc-kml.toml` is read if it exists. An explicit
    /// `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config
            .validate()
            .map_err(config::ConfigError::Message)?;
        debug!(output = %config.output.path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.drivebc.validate()?;
        self.output.validate()?;
        if !self.retry.multiplier.is_finite() || self.retry.multiplier < 1.0 {
            return Err("retry.multiplier must be at least 1.0".to_string());
        }
        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
