//! DriveBC feed configuration

use serde::{Deserialize, Serialize};

/// Configuration for the DriveBC feeds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveBcConfig {
    /// Traffic events endpoint
    #[serde(default = "default_events_url")]
    pub events_url: String,

    /// Inland ferries endpoint
    #[serde(default = "default_ferries_url")]
    pub ferries_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_events_url() -> String {
    "https://www.drivebc.ca/api/events/".to_string()
}

fn default_ferries_url() -> String {
    "https://www.drivebc.ca/api/ferries/".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("drivebc-kml/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for DriveBcConfig {
    fn default() -> Self {
        Self {
            events_url: default_events_url(),
            ferries_url: default_ferries_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl DriveBcConfig {
    /// Create a configuration pointing both feeds at a single base URL
    ///
    /// Used with mock servers: events at `{base}/api/events/`,
    /// ferries at `{base}/api/ferries/`.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            events_url: format!("{base}/api/events/"),
            ferries_url: format!("{base}/api/ferries/"),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.events_url.trim().is_empty() {
            return Err("events_url must not be empty".to_string());
        }

        if self.ferries_url.trim().is_empty() {
            return Err("ferries_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
