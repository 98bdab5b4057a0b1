//! Category styling
//!
//! Deterministic lookup from [`Category`] to color and icon. The enums are
//! closed, so unknown feed values already arrive as `EventType::Other` or
//! `FerryType::Other` and pick up their family default (gray for events,
//! purple for ferries).

use std::fmt;

use domain::{Category, EventType, FerryType};

/// Width of line geometries in pixels
pub const LINE_WIDTH: u8 = 3;

const FERRY_ICON: &str = "http://maps.google.com/mapfiles/kml/shapes/ferry.png";

/// Placemark colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Construction
    Red,
    /// Incidents
    Yellow,
    /// Road conditions
    Green,
    /// Weather
    Blue,
    /// Other events
    Gray,
    /// Cable and other ferries
    Purple,
    /// Scheduled ferries
    Teal,
    /// On-demand ferries
    Indigo,
}

impl Color {
    /// KML color in `aabbggrr` hex order
    #[must_use]
    pub const fn kml_hex(self) -> &'static str {
        match self {
            Self::Red => "ff0000ff",
            Self::Yellow => "ff00ffff",
            Self::Green => "ff00ff00",
            Self::Blue => "ffff0000",
            Self::Gray => "ff888888",
            Self::Purple => "ff800080",
            Self::Teal => "ff808000",
            Self::Indigo => "ff82004b",
        }
    }

    /// Lowercase color name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Gray => "gray",
            Self::Purple => "purple",
            Self::Teal => "teal",
            Self::Indigo => "indigo",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Visual style of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Category the style belongs to
    pub category: Category,
    /// Icon and line color
    pub color: Color,
    /// Icon image URL
    pub icon: &'static str,
}

impl Style {
    /// Document-unique style id, e.g. `style_CONSTRUCTION`
    #[must_use]
    pub fn id(&self) -> String {
        style_id(self.category)
    }

    /// Reference used by placemarks, e.g. `#style_CONSTRUCTION`
    #[must_use]
    pub fn url(&self) -> String {
        format!("#{}", self.id())
    }
}

/// Style id for a category
#[must_use]
pub fn style_id(category: Category) -> String {
    format!("style_{}", category.style_key())
}

/// Look up the style for a category
#[must_use]
pub const fn style_for(category: Category) -> Style {
    let (color, icon) = match category {
        Category::Event(event_type) => match event_type {
            EventType::Construction => (
                Color::Red,
                "http://maps.google.com/mapfiles/kml/paddle/red-circle.png",
            ),
            EventType::Incident => (
                Color::Yellow,
                "http://maps.google.com/mapfiles/kml/paddle/ylw-circle.png",
            ),
            EventType::RoadCondition => (
                Color::Green,
                "http://maps.google.com/mapfiles/kml/paddle/grn-circle.png",
            ),
            EventType::Weather => (
                Color::Blue,
                "http://maps.google.com/mapfiles/kml/paddle/blu-circle.png",
            ),
            EventType::Other => (
                Color::Gray,
                "http://maps.google.com/mapfiles/kml/paddle/wht-circle.png",
            ),
        },
        Category::Ferry(ferry_type) => match ferry_type {
            FerryType::Cable | FerryType::Other => (Color::Purple, FERRY_ICON),
            FerryType::Scheduled => (Color::Teal, FERRY_ICON),
            FerryType::OnDemand => (Color::Indigo, FERRY_ICON),
        },
    };

    Style {
        category,
        color,
        icon,
    }
}

/// Styles for every category, events first, in a fixed order
#[must_use]
pub fn all_styles() -> Vec<Style> {
    Category::all().into_iter().map(style_for).collect()
}
