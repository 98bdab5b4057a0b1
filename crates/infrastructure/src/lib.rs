//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the DriveBC feed
//! adapter and the atomic file sink. Also owns configuration loading and
//! logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, OutputConfig};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};
