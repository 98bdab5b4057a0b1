//! Output sink port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Destination for the finished KML text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Replace the output with `contents`
    ///
    /// Implementations must leave the previous output intact when the write
    /// fails.
    async fn write(&self, contents: &str) -> Result<(), ApplicationError>;

    /// Human-readable location of the output, e.g. a file path
    fn location(&self) -> String;
}
