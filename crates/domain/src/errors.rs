//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    /// Coordinate outside the WGS84 range or not finite
    #[error(
        "Invalid coordinates ({longitude}, {latitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates {
        /// Longitude as received
        longitude: f64,
        /// Latitude as received
        latitude: f64,
    },

    /// Geometry without any position
    #[error("Geometry must contain at least one coordinate pair")]
    EmptyGeometry,
}
