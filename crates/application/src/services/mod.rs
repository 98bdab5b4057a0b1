//! Application services - Use case implementations

mod export_service;

pub use export_service::{DEFAULT_MAX_BYTES, ExportConfig, ExportService, ExportSummary};
