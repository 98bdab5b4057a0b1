//! DriveBC HTTP client
//!
//! One GET per feed with a bounded timeout. Anything other than a 200 with a
//! JSON array body is an error; an empty array is a valid, empty feed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::DriveBcConfig;
use crate::error::DriveBcError;
use crate::retry::{RetryConfig, retry};

/// Trait for DriveBC feed clients
#[async_trait]
pub trait DriveBcClient: Send + Sync {
    /// Fetch the raw traffic event records
    async fn fetch_events(&self) -> Result<Vec<Value>, DriveBcError>;

    /// Fetch the raw inland ferry records
    async fn fetch_ferries(&self) -> Result<Vec<Value>, DriveBcError>;
}

/// reqwest-based client for the public DriveBC API
#[derive(Debug)]
pub struct HttpDriveBcClient {
    client: Client,
    config: DriveBcConfig,
    retry: RetryConfig,
}

impl HttpDriveBcClient {
    /// Create a new client that does not retry
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &DriveBcConfig) -> Result<Self, DriveBcError> {
        Self::with_retry(config, RetryConfig::disabled())
    }

    /// Create a new client with a retry policy
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn with_retry(config: &DriveBcConfig, retry: RetryConfig) -> Result<Self, DriveBcError> {
        config.validate().map_err(DriveBcError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DriveBcError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            retry,
        })
    }

    /// Fetch a feed, retrying retryable failures per the retry policy
    async fn fetch(&self, url: &str) -> Result<Vec<Value>, DriveBcError> {
        let records = retry(&self.retry, || self.fetch_once(url)).await?;
        info!(url = %url, count = records.len(), "Fetched feed");
        Ok(records)
    }

    async fn fetch_once(&self, url: &str) -> Result<Vec<Value>, DriveBcError> {
        debug!(url = %url, "Requesting feed");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DriveBcError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        Self::parse_records(&body)
    }

    fn transport_error(&self, error: &reqwest::Error) -> DriveBcError {
        if error.is_timeout() {
            DriveBcError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            DriveBcError::ConnectionFailed(error.to_string())
        }
    }

    /// Parse a feed body into its list of raw records
    fn parse_records(body: &str) -> Result<Vec<Value>, DriveBcError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| DriveBcError::ParseError(e.to_string()))?;

        match value {
            Value::Array(records) => Ok(records),
            Value::Object(_) => Err(DriveBcError::ParseError(
                "expected a JSON array of records, got an object".to_string(),
            )),
            other => Err(DriveBcError::ParseError(format!(
                "expected a JSON array of records, got {other}"
            ))),
        }
    }
}

#[async_trait]
impl DriveBcClient for HttpDriveBcClient {
    #[instrument(skip(self))]
    async fn fetch_events(&self) -> Result<Vec<Value>, DriveBcError> {
        self.fetch(&self.config.events_url).await
    }

    #[instrument(skip(self))]
    async fn fetch_ferries(&self) -> Result<Vec<Value>, DriveBcError> {
        self.fetch(&self.config.ferries_url).await
    }
}
