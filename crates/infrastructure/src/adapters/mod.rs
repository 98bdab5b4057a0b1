//! Adapters implementing application ports

mod drivebc_feed_adapter;
mod file_sink;

pub use drivebc_feed_adapter::DriveBcFeedAdapter;
pub use file_sink::AtomicFileSink;
