//! DriveBC feed adapter - Implements FeedPort using integration_drivebc

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{FeedBatch, FeedPort};
use async_trait::async_trait;
use domain::{FerryRoute, TrafficEvent};
use integration_drivebc::{
    DriveBcClient, DriveBcConfig, DriveBcError, HttpDriveBcClient, NormalizedBatch, RetryConfig,
    normalizer,
};
use tracing::{debug, instrument, warn};

/// Adapter for the DriveBC traffic event and ferry feeds
pub struct DriveBcFeedAdapter {
    client: Arc<dyn DriveBcClient>,
}

impl std::fmt::Debug for DriveBcFeedAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveBcFeedAdapter")
            .field("client", &"DriveBcClient")
            .finish()
    }
}

impl DriveBcFeedAdapter {
    /// Wrap an existing client
    #[must_use]
    pub fn new(client: Arc<dyn DriveBcClient>) -> Self {
        Self { client }
    }

    /// Build an HTTP client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn from_config(
        config: &DriveBcConfig,
        retry: &RetryConfig,
    ) -> Result<Self, ApplicationError> {
        let client = HttpDriveBcClient::with_retry(config, retry.clone()).map_err(map_error)?;
        Ok(Self::new(Arc::new(client)))
    }
}

/// Map integration errors onto the application error taxonomy
fn map_error(err: DriveBcError) -> ApplicationError {
    match err {
        err if err.is_network() => ApplicationError::Network(err.to_string()),
        DriveBcError::ParseError(msg) => ApplicationError::Parse(msg),
        DriveBcError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::Network(other.to_string()),
    }
}

fn into_batch<T>(feed: &str, batch: NormalizedBatch<T>) -> FeedBatch<T> {
    if !batch.skipped.is_empty() {
        warn!(feed, skipped = batch.skipped.len(), "Skipped malformed records");
    }
    debug!(feed, records = batch.records.len(), "Normalized feed");
    FeedBatch::new(batch.records).with_skipped(batch.skipped.len())
}

#[async_trait]
impl FeedPort for DriveBcFeedAdapter {
    #[instrument(skip(self))]
    async fn traffic_events(&self) -> Result<FeedBatch<TrafficEvent>, ApplicationError> {
        let raw = self.client.fetch_events().await.map_err(map_error)?;
        Ok(into_batch("events", normalizer::normalize_events(&raw)))
    }

    #[instrument(skip(self))]
    async fn ferry_routes(&self) -> Result<FeedBatch<FerryRoute>, ApplicationError> {
        let raw = self.client.fetch_ferries().await.map_err(map_error)?;
        Ok(into_batch("ferries", normalizer::normalize_ferries(&raw)))
    }
}
