//! Application-level errors

use kml::KmlError;
use thiserror::Error;

/// Errors that can end an export run
///
/// Every variant is fatal for the run. Individual malformed records are not
/// errors here; they are skipped and counted by the feed adapter.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Feed endpoint unreachable or answered with a non-200 status
    #[error("Network error: {0}")]
    Network(String),

    /// Feed body was not valid JSON or not a list of records
    #[error("Parse error: {0}")]
    Parse(String),

    /// KML could not be produced or did not read back correctly
    #[error("Serialization error: {0}")]
    Serialization(#[from] KmlError),

    /// Output could not be written
    #[error("Write error: {0}")]
    Write(String),

    /// Serialized document exceeds the configured size limit
    #[error("Output too large: {size} bytes exceeds limit of {limit} bytes")]
    OutputTooLarge {
        /// Serialized size in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Short machine-friendly error class, used as a log field
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::Serialization(_) => "serialization",
            Self::Write(_) | Self::OutputTooLarge { .. } => "write",
            Self::Configuration(_) => "configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ApplicationError::Network("HTTP 503".to_string());
        assert_eq!(err.to_string(), "Network error: HTTP 503");

        let err = ApplicationError::OutputTooLarge {
            size: 6_000_000,
            limit: 5_242_880,
        };
        assert!(err.to_string().contains("6000000 bytes"));
    }

    #[test]
    fn test_kml_error_converts() {
        let err: ApplicationError = KmlError::Structure("unbalanced Folder".to_string()).into();
        assert!(matches!(err, ApplicationError::Serialization(_)));
        assert_eq!(err.kind(), "serialization");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ApplicationError::Parse(String::new()).kind(), "parse");
        assert_eq!(
            ApplicationError::OutputTooLarge { size: 2, limit: 1 }.kind(),
            "write"
        );
    }
}
