//! Ferry route entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{Category, Coordinate, FerryType};

/// Vessel capacity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FerryCapacity {
    /// Vehicles per sailing
    pub vehicles: Option<u32>,
    /// Passengers per sailing
    pub passengers: Option<u32>,
}

/// Operator contact details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FerryContact {
    /// Phone number
    pub phone: Option<String>,
    /// Email address
    pub email: Option<String>,
}

/// An inland ferry route from the ferries feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FerryRoute {
    /// Feed identifier
    pub id: Option<String>,

    /// Route name, kept verbatim
    pub name: String,

    /// Normalized service kind
    pub ferry_type: FerryType,

    /// Service kind exactly as published
    pub raw_ferry_type: Option<String>,

    /// Capacity per sailing
    pub capacity: FerryCapacity,

    /// Crossing time in minutes
    pub crossing_time_minutes: Option<u32>,

    /// Free-text schedule
    pub schedule: Option<String>,

    /// Contact details
    pub contact: FerryContact,

    /// Webcam URL
    pub webcam_url: Option<String>,

    /// Terminal location
    pub location: Coordinate,
}

impl FerryRoute {
    /// Create a route with only the required fields set
    #[must_use]
    pub fn new(name: impl Into<String>, ferry_type: FerryType, location: Coordinate) -> Self {
        Self {
            id: None,
            name: name.into(),
            ferry_type,
            raw_ferry_type: None,
            capacity: FerryCapacity::default(),
            crossing_time_minutes: None,
            schedule: None,
            contact: FerryContact::default(),
            webcam_url: None,
            location,
        }
    }

    /// Category for folder grouping and styling
    #[must_use]
    pub const fn category(&self) -> Category {
        Category::Ferry(self.ferry_type)
    }

    /// Ferry type text for display, preferring the raw feed value
    #[must_use]
    pub fn ferry_type_label(&self) -> &str {
        self.raw_ferry_type
            .as_deref()
            .unwrap_or_else(|| self.ferry_type.label())
    }
}
