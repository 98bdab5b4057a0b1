//! Ferry service classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of ferry service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FerryType {
    /// Cable-guided reaction or powered ferry
    Cable,
    /// Runs on a published timetable
    Scheduled,
    /// Runs when traffic is waiting
    OnDemand,
    /// Anything not covered above
    #[default]
    Other,
}

impl FerryType {
    /// All ferry types in folder order
    pub const ALL: [Self; 4] = [Self::Cable, Self::Scheduled, Self::OnDemand, Self::Other];

    /// Map a raw feed value, case-insensitively, falling back to `Other`
    ///
    /// Accepts `ON_DEMAND`, `ON-DEMAND` and `ON DEMAND`.
    #[must_use]
    pub fn from_api(value: &str) -> Self {
        let normalized = value.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "CABLE" => Self::Cable,
            "SCHEDULED" => Self::Scheduled,
            "ON_DEMAND" => Self::OnDemand,
            _ => Self::Other,
        }
    }

    /// Stable key used in style ids
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Cable => "CABLE",
            Self::Scheduled => "SCHEDULED",
            Self::OnDemand => "ON_DEMAND",
            Self::Other => "OTHER",
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cable => "Cable",
            Self::Scheduled => "Scheduled",
            Self::OnDemand => "On Demand",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for FerryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
