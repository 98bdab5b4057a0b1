//! KML error types

use thiserror::Error;

/// Errors that can occur while writing or reading KML
#[derive(Debug, Error)]
pub enum KmlError {
    /// XML reader failure
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML writer failure
    #[error("Write error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized output was not valid UTF-8
    #[error("Invalid UTF-8 in document: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Root element is not a KML 2.2 `kml` element
    #[error("Not a KML 2.2 document: {0}")]
    NotKml(String),

    /// Well-formed XML with an unexpected KML structure
    #[error("Unexpected document structure: {0}")]
    Structure(String),
}
