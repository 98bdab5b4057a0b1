//! Placemark category shared by styling and folder grouping

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{EventType, FerryType};

/// The category a record is filed and styled under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", content = "kind", rename_all = "snake_case")]
pub enum Category {
    /// A traffic event category
    Event(EventType),
    /// A ferry route category
    Ferry(FerryType),
}

impl Category {
    /// Identifier used for the shared KML style (`CONSTRUCTION`, `FERRY_CABLE`, ...)
    #[must_use]
    pub fn style_key(&self) -> String {
        match self {
            Self::Event(t) => t.key().to_string(),
            Self::Ferry(t) => format!("FERRY_{}", t.key()),
        }
    }

    /// Folder title, e.g. `Construction Events` or `On Demand Ferries`
    #[must_use]
    pub fn folder_name(&self) -> String {
        match self {
            Self::Event(t) => format!("{} Events", t.label()),
            Self::Ferry(t) => format!("{} Ferries", t.label()),
        }
    }

    /// Every category, events first
    #[must_use]
    pub fn all() -> Vec<Self> {
        EventType::ALL
            .into_iter()
            .map(Self::Event)
            .chain(FerryType::ALL.into_iter().map(Self::Ferry))
            .collect()
    }
}

impl From<EventType> for Category {
    fn from(value: EventType) -> Self {
        Self::Event(value)
    }
}

impl From<FerryType> for Category {
    fn from(value: FerryType) -> Self {
        Self::Ferry(value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.folder_name())
    }
}
