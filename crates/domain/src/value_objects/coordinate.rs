//! Geographic coordinate and geometry value objects

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A WGS84 position as delivered by the feeds: longitude first, then latitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
}

impl Coordinate {
    /// Create a new coordinate with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if either value is not finite,
    /// latitude is not in [-90, 90] or longitude is not in [-180, 180].
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, DomainError> {
        if !longitude.is_finite()
            || !latitude.is_finite()
            || !(-90.0..=90.0).contains(&latitude)
            || !(-180.0..=180.0).contains(&longitude)
        {
            return Err(DomainError::InvalidCoordinates {
                longitude,
                latitude,
            });
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Format as a KML tuple (`lon,lat,0`)
    #[must_use]
    pub fn to_kml_tuple(&self) -> String {
        format!("{},{},0", self.longitude, self.latitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Placemark geometry: a single point or an ordered path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// A single position
    Point(Coordinate),
    /// Two or more positions in travel order
    LineString(Vec<Coordinate>),
}

impl Geometry {
    /// Build a geometry from an ordered list of positions
    ///
    /// One position yields a `Point`, two or more a `LineString`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyGeometry` when `coordinates` is empty.
    pub fn from_coordinates(mut coordinates: Vec<Coordinate>) -> Result<Self, DomainError> {
        match coordinates.len() {
            0 => Err(DomainError::EmptyGeometry),
            1 => Ok(Self::Point(coordinates.remove(0))),
            _ => Ok(Self::LineString(coordinates)),
        }
    }

    /// All positions of this geometry in order
    #[must_use]
    pub fn coordinates(&self) -> &[Coordinate] {
        match self {
            Self::Point(c) => std::slice::from_ref(c),
            Self::LineString(cs) => cs,
        }
    }

    /// Check if this geometry is a single point
    #[must_use]
    pub const fn is_point(&self) -> bool {
        matches!(self, Self::Point(_))
    }

    /// Space-separated KML coordinate tuples
    #[must_use]
    pub fn to_kml_coordinates(&self) -> String {
        self.coordinates()
            .iter()
            .map(Coordinate::to_kml_tuple)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
