//! Application layer - Use cases and orchestration
//!
//! Wires the feed and output ports around the KML builder. One export run
//! fetches both feeds, builds and serializes the document, verifies it and
//! hands it to the output sink.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
