//! Feed port
//!
//! Source of normalized records. Adapters fetch the raw feeds, normalize
//! them and report how many records had to be skipped.

use async_trait::async_trait;
use domain::{FerryRoute, TrafficEvent};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Records from one feed plus the number of skipped entries
#[derive(Debug, Clone, PartialEq)]
pub struct FeedBatch<T> {
    /// Normalized records in feed order
    pub records: Vec<T>,
    /// Entries dropped as malformed
    pub skipped: usize,
}

impl<T> FeedBatch<T> {
    /// Batch with nothing skipped
    #[must_use]
    pub const fn new(records: Vec<T>) -> Self {
        Self {
            records,
            skipped: 0,
        }
    }

    /// Set the skipped count
    #[must_use]
    pub const fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped = skipped;
        self
    }
}

impl<T> Default for FeedBatch<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Port for the traffic event and ferry feeds
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FeedPort: Send + Sync {
    /// Fetch and normalize the traffic events feed
    async fn traffic_events(&self) -> Result<FeedBatch<TrafficEvent>, ApplicationError>;

    /// Fetch and normalize the ferry routes feed
    async fn ferry_routes(&self) -> Result<FeedBatch<FerryRoute>, ApplicationError>;
}
