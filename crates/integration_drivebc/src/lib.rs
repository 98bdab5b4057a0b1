//! DriveBC open data integration
//!
//! Fetches the public [DriveBC](https://www.drivebc.ca) traffic-event and
//! inland-ferry feeds and normalizes their JSON records into domain types.
//!
//! # Architecture
//!
//! [`DriveBcClient`] defines the fetch interface, implemented by
//! [`HttpDriveBcClient`]. Fetching returns raw JSON records; the
//! [`normalizer`] turns each one into a [`domain::TrafficEvent`] or
//! [`domain::FerryRoute`], or a [`SkippedRecord`] when the record is unusable.
//! A malformed record never fails the whole feed.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_drivebc::{DriveBcClient, DriveBcConfig, HttpDriveBcClient, normalizer};
//!
//! let client = HttpDriveBcClient::new(&DriveBcConfig::default())?;
//! let raw = client.fetch_events().await?;
//! let batch = normalizer::normalize_events(&raw);
//! println!("{} events, {} skipped", batch.records.len(), batch.skipped.len());
//! ```

mod client;
mod config;
mod error;
mod models;
pub mod normalizer;
pub mod retry;

pub use client::{DriveBcClient, HttpDriveBcClient};
pub use config::DriveBcConfig;
pub use error::DriveBcError;
pub use models::{RawContact, RawEvent, RawFerry, RawLocation};
pub use normalizer::{NormalizedBatch, SkipReason, SkippedRecord};
pub use retry::{RetryConfig, Retryable};
