//! DriveBC error types

use thiserror::Error;

/// Errors that can occur while fetching a DriveBC feed
#[derive(Debug, Error)]
pub enum DriveBcError {
    /// Connection to the feed failed (DNS, TLS, refused, reset)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The feed answered with a status other than 200
    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus {
        /// Status code received
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Body was not valid JSON or not a list of records
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl DriveBcError {
    /// Returns true if this error is retryable
    ///
    /// Transport failures, timeouts, 429 and 5xx responses are retryable.
    /// Malformed bodies and other 4xx responses are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout { .. } => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            Self::ParseError(_) | Self::ConfigurationError(_) => false,
        }
    }

    /// Returns true if this is a transport or status failure rather than a decode failure
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::HttpStatus { .. } | Self::Timeout { .. }
        )
    }
}
