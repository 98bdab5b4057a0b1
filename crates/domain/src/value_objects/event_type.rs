//! Traffic event classification value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Traffic event category as published by the events feed
///
/// Values the feed adds later (e.g. `SPECIAL_EVENT`) collapse into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Road work, paving, maintenance
    Construction,
    /// Collisions, vehicle fires, debris
    Incident,
    /// Surface conditions such as ice or washouts
    RoadCondition,
    /// Weather advisories
    Weather,
    /// Anything not covered above
    #[default]
    Other,
}

impl EventType {
    /// All event types in folder order
    pub const ALL: [Self; 5] = [
        Self::Construction,
        Self::Incident,
        Self::RoadCondition,
        Self::Weather,
        Self::Other,
    ];

    /// Map a raw feed value, case-insensitively, falling back to `Other`
    #[must_use]
    pub fn from_api(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "CONSTRUCTION" => Self::Construction,
            "INCIDENT" => Self::Incident,
            "ROAD_CONDITION" => Self::RoadCondition,
            "WEATHER" => Self::Weather,
            _ => Self::Other,
        }
    }

    /// Stable key used in style ids
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Construction => "CONSTRUCTION",
            Self::Incident => "INCIDENT",
            Self::RoadCondition => "ROAD_CONDITION",
            Self::Weather => "WEATHER",
            Self::Other => "OTHER",
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Construction => "Construction",
            Self::Incident => "Incident",
            Self::RoadCondition => "Road Condition",
            Self::Weather => "Weather",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Event severity
///
/// Severities outside the known set keep their raw text so the
/// description can still show it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Minor impact
    Minor,
    /// Moderate impact
    Moderate,
    /// Major impact
    Major,
    /// Unrecognised severity, raw feed value
    Unknown(String),
}

impl Severity {
    /// Map a raw feed value, case-insensitively
    #[must_use]
    pub fn from_api(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "MINOR" => Self::Minor,
            "MODERATE" => Self::Moderate,
            "MAJOR" => Self::Major,
            _ => Self::Unknown(value.trim().to_string()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minor => write!(f, "MINOR"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::Major => write!(f, "MAJOR"),
            Self::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}
