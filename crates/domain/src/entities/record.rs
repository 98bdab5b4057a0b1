//! Closed set of record kinds produced by the normalizer

use serde::{Deserialize, Serialize};

use super::{FerryRoute, TrafficEvent};
use crate::value_objects::Category;

/// A normalized feed record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    /// Traffic event
    Event(TrafficEvent),
    /// Ferry route
    Ferry(FerryRoute),
}

impl Record {
    /// Category for folder grouping and styling
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Event(e) => e.category(),
            Self::Ferry(f) => f.category(),
        }
    }
}

impl From<TrafficEvent> for Record {
    fn from(value: TrafficEvent) -> Self {
        Self::Event(value)
    }
}

impl From<FerryRoute> for Record {
    fn from(value: FerryRoute) -> Self {
        Self::Ferry(value)
    }
}
