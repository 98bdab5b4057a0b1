//! Output file configuration

use std::path::PathBuf;

use application::ExportConfig;
use serde::{Deserialize, Serialize};

/// Where and how the KML document is written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output file path (default: `drivebc_events.kml`)
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// KML document name
    #[serde(default = "default_document_name")]
    pub document_name: String,

    /// Largest document that will be written, in bytes (default: 5 MiB)
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_path() -> PathBuf {
    PathBuf::from("drivebc_events.kml")
}

fn default_document_name() -> String {
    application::ExportConfig::default().document_name
}

const fn default_max_bytes() -> usize {
    application::services::DEFAULT_MAX_BYTES
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            document_name: default_document_name(),
            max_bytes: default_max_bytes(),
        }
    }
}

impl OutputConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("output.path must not be empty".to_string());
        }
        if self.max_bytes == 0 {
            return Err("output.max_bytes must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Export settings for the application layer
    #[must_use]
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            document_name: self.document_name.clone(),
            max_bytes: self.max_bytes,
        }
    }
}
