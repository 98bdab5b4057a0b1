//! KML document model and serialization
//!
//! Turns normalized DriveBC records into a KML 2.2 document:
//!
//! - [`style`]: category → color/icon lookup
//! - [`description`]: the HTML-like detail block shown in map popups
//! - [`document`]: folder-per-category document tree and its builder
//! - [`writer`]: pretty-printed XML serialization
//! - [`reader`]: structural parse of a KML text, used to verify output
//!
//! # Example
//!
//! ```rust,ignore
//! use kml::{DocumentBuilder, writer};
//!
//! let mut builder = DocumentBuilder::new("DriveBC Traffic Events (Live)");
//! for event in &events {
//!     builder.push_event(event);
//! }
//! let xml = writer::serialize(&builder.build())?;
//! ```

pub mod description;
pub mod document;
mod error;
pub mod escape;
pub mod reader;
pub mod style;
pub mod writer;

pub use document::{
    DEFAULT_DOCUMENT_NAME, DocumentBuilder, FERRY_FOLDER, Folder, KmlDocument, Placemark,
    TRAFFIC_FOLDER, build,
};
pub use error::KmlError;
pub use reader::{FolderOutline, KmlOutline, PlacemarkOutline, outline};
pub use style::{Color, Style, style_for};
pub use writer::serialize;

/// KML 2.2 namespace
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
