//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod feed_port;
mod output_sink;

#[cfg(test)]
pub use feed_port::MockFeedPort;
pub use feed_port::{FeedBatch, FeedPort};
#[cfg(test)]
pub use output_sink::MockOutputSink;
pub use output_sink::OutputSink;
