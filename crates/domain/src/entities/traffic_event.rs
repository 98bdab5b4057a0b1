//! Traffic event entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{Category, EventType, Geometry, Severity};

/// Time information attached to an event
///
/// Values are kept as the ISO-8601 strings the feed published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSchedule {
    /// When the feed last changed this event
    pub last_updated: Option<String>,
    /// When the feed expects the next change
    pub next_update: Option<String>,
    /// Event start
    pub start: Option<String>,
    /// Event end
    pub end: Option<String>,
}

/// A road event from the traffic events feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficEvent {
    /// Feed identifier, kept verbatim
    pub id: String,

    /// Normalized category
    pub event_type: EventType,

    /// Event type exactly as published, when it differs from the category key
    pub raw_event_type: Option<String>,

    /// Sub type, e.g. `ROAD_MAINTENANCE`
    pub event_sub_type: Option<String>,

    /// Severity
    pub severity: Option<Severity>,

    /// Status, e.g. `ACTIVE`
    pub status: Option<String>,

    /// Free-text description
    pub description: Option<String>,

    /// Route name, e.g. `Highway 1`
    pub route: Option<String>,

    /// Location text, e.g. `Between Main St and Oak St`
    pub location_description: Option<String>,

    /// Closest landmark
    pub landmark: Option<String>,

    /// Direction of travel affected
    pub direction: Option<String>,

    /// Whether the road is closed
    pub closed: Option<bool>,

    /// Time information
    pub schedule: EventSchedule,

    /// Where the event is
    pub geometry: Geometry,
}

impl TrafficEvent {
    /// Create an event with only the required fields set
    #[must_use]
    pub fn new(id: impl Into<String>, event_type: EventType, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            event_type,
            raw_event_type: None,
            event_sub_type: None,
            severity: None,
            status: None,
            description: None,
            route: None,
            location_description: None,
            landmark: None,
            direction: None,
            closed: None,
            schedule: EventSchedule::default(),
            geometry,
        }
    }

    /// Category for folder grouping and styling
    #[must_use]
    pub const fn category(&self) -> Category {
        Category::Event(self.event_type)
    }

    /// Event type text for display, preferring the raw feed value
    #[must_use]
    pub fn event_type_label(&self) -> &str {
        self.raw_event_type
            .as_deref()
            .unwrap_or_else(|| self.event_type.key())
    }
}
