//! KML document tree
//!
//! A document holds the shared styles and exactly two top-level folders,
//! [`TRAFFIC_FOLDER`] and [`FERRY_FOLDER`]. Each of those holds one sub-folder
//! per category, in the order the category was first seen, and each
//! sub-folder holds its placemarks in insertion order.

use chrono::{DateTime, Utc};
use domain::{Category, FerryRoute, Geometry, Record, TrafficEvent};
use tracing::debug;

use crate::description::{event_description, ferry_description};
use crate::style::{Style, all_styles, style_for};

/// Top-level folder holding every traffic event category
pub const TRAFFIC_FOLDER: &str = "Traffic Events";

/// Top-level folder holding every ferry category
pub const FERRY_FOLDER: &str = "Ferry Routes";

/// Document name used when none is configured
pub const DEFAULT_DOCUMENT_NAME: &str = "DriveBC Traffic Events (Live)";

/// A single map feature
#[derive(Debug, Clone, PartialEq)]
pub struct Placemark {
    /// Event id or ferry route name, never truncated
    pub name: String,
    /// HTML-like detail block
    pub description: String,
    /// Reference to a shared style, e.g. `#style_CONSTRUCTION`
    pub style_url: String,
    /// Point or line
    pub geometry: Geometry,
    /// Category used for grouping
    pub category: Category,
}

impl Placemark {
    /// Placemark for a traffic event
    #[must_use]
    pub fn from_event(event: &TrafficEvent) -> Self {
        let category = event.category();
        Self {
            name: event.id.clone(),
            description: event_description(event),
            style_url: style_for(category).url(),
            geometry: event.geometry.clone(),
            category,
        }
    }

    /// Placemark for a ferry route
    #[must_use]
    pub fn from_ferry(ferry: &FerryRoute) -> Self {
        let category = ferry.category();
        Self {
            name: ferry.name.clone(),
            description: ferry_description(ferry),
            style_url: style_for(category).url(),
            geometry: Geometry::Point(ferry.location),
            category,
        }
    }
}

impl From<&Record> for Placemark {
    fn from(record: &Record) -> Self {
        match record {
            Record::Event(event) => Self::from_event(event),
            Record::Ferry(ferry) => Self::from_ferry(ferry),
        }
    }
}

/// A named group of placemarks and sub-folders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Folder {
    /// Folder title
    pub name: String,
    /// Nested folders
    pub folders: Vec<Folder>,
    /// Placemarks directly in this folder
    pub placemarks: Vec<Placemark>,
}

impl Folder {
    /// Create an empty folder
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Count placemarks in this folder and all nested folders
    #[must_use]
    pub fn placemark_count(&self) -> usize {
        self.placemarks.len() + self.folders.iter().map(Self::placemark_count).sum::<usize>()
    }

    /// Find a direct sub-folder by name
    #[must_use]
    pub fn folder(&self, name: &str) -> Option<&Self> {
        self.folders.iter().find(|f| f.name == name)
    }

    fn folder_mut_or_insert(&mut self, name: String) -> &mut Self {
        let index = match self.folders.iter().position(|f| f.name == name) {
            Some(index) => index,
            None => {
                self.folders.push(Self::new(name));
                self.folders.len() - 1
            }
        };
        &mut self.folders[index]
    }
}

/// Root of a KML document
#[derive(Debug, Clone, PartialEq)]
pub struct KmlDocument {
    /// Document name
    pub name: String,
    /// Optional document description
    pub description: Option<String>,
    /// Shared styles, one per category
    pub styles: Vec<Style>,
    /// Top-level folders
    pub folders: Vec<Folder>,
}

impl KmlDocument {
    /// Total number of placemarks
    #[must_use]
    pub fn placemark_count(&self) -> usize {
        self.folders.iter().map(Folder::placemark_count).sum()
    }

    /// Find a top-level folder by name
    #[must_use]
    pub fn folder(&self, name: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.name == name)
    }

    /// Placemark count per category, in document order
    #[must_use]
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        let mut counts: Vec<(Category, usize)> = Vec::new();
        for placemark in self.placemarks() {
            match counts.iter_mut().find(|(c, _)| *c == placemark.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((placemark.category, 1)),
            }
        }
        counts
    }

    /// Iterate every placemark depth-first
    pub fn placemarks(&self) -> impl Iterator<Item = &Placemark> {
        let mut stack: Vec<&Folder> = self.folders.iter().rev().collect();
        let mut out = Vec::new();
        while let Some(folder) = stack.pop() {
            out.extend(folder.placemarks.iter());
            stack.extend(folder.folders.iter().rev());
        }
        out.into_iter()
    }
}

/// Incremental document builder
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    name: String,
    generated_at: Option<DateTime<Utc>>,
    traffic: Folder,
    ferries: Folder,
}

impl DocumentBuilder {
    /// Start an empty document
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generated_at: None,
            traffic: Folder::new(TRAFFIC_FOLDER),
            ferries: Folder::new(FERRY_FOLDER),
        }
    }

    /// Stamp the document description with a generation time
    #[must_use]
    pub const fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Add a traffic event
    pub fn push_event(&mut self, event: &TrafficEvent) -> &mut Self {
        self.insert(Placemark::from_event(event))
    }

    /// Add a ferry route
    pub fn push_ferry(&mut self, ferry: &FerryRoute) -> &mut Self {
        self.insert(Placemark::from_ferry(ferry))
    }

    /// Add any record
    pub fn push(&mut self, record: &Record) -> &mut Self {
        self.insert(Placemark::from(record))
    }

    fn insert(&mut self, placemark: Placemark) -> &mut Self {
        let parent = match placemark.category {
            Category::Event(_) => &mut self.traffic,
            Category::Ferry(_) => &mut self.ferries,
        };
        parent
            .folder_mut_or_insert(placemark.category.folder_name())
            .placemarks
            .push(placemark);
        self
    }

    /// Finish the document
    #[must_use]
    pub fn build(self) -> KmlDocument {
        let description = self.generated_at.map(|at| {
            format!(
                "Live DriveBC traffic events and inland ferries. Generated {}",
                at.format("%Y-%m-%d %H:%M:%S UTC")
            )
        });

        let document = KmlDocument {
            name: self.name,
            description,
            styles: all_styles(),
            folders: vec![self.traffic, self.ferries],
        };
        debug!(
            placemarks = document.placemark_count(),
            "Built KML document"
        );
        document
    }
}

/// Build a document from normalized events and ferries
///
/// Uses [`DEFAULT_DOCUMENT_NAME`] and no generation timestamp, so the result
/// depends only on the input.
#[must_use]
pub fn build(events: &[TrafficEvent], ferries: &[FerryRoute]) -> KmlDocument {
    let mut builder = DocumentBuilder::new(DEFAULT_DOCUMENT_NAME);
    for event in events {
        builder.push_event(event);
    }
    for ferry in ferries {
        builder.push_ferry(ferry);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use domain::{Coordinate, EventType, FerryType};

    fn point(lon: f64, lat: f64) -> Geometry {
        Geometry::Point(Coordinate::new(lon, lat).expect("valid"))
    }

    fn event(id: &str, event_type: EventType) -> TrafficEvent {
        TrafficEvent::new(id, event_type, point(-123.1, 49.2))
    }

    fn ferry(name: &str, ferry_type: FerryType) -> FerryRoute {
        FerryRoute::new(
            name,
            ferry_type,
            Coordinate::new(-121.95, 50.35).expect("valid"),
        )
    }

    #[test]
    fn test_empty_document_has_both_top_folders() {
        let doc = build(&[], &[]);
        assert_eq!(doc.placemark_count(), 0);
        assert_eq!(doc.folders.len(), 2);
        assert_eq!(doc.folders[0].name, TRAFFIC_FOLDER);
        assert_eq!(doc.folders[1].name, FERRY_FOLDER);
        assert!(doc.folders.iter().all(|f| f.folders.is_empty()));
        assert_eq!(doc.styles.len(), Category::all().len());
    }

    #[test]
    fn test_single_construction_event() {
        let doc = build(&[event("EVT1", EventType::Construction)], &[]);
        let traffic = doc.folder(TRAFFIC_FOLDER).expect("traffic folder");
        let folder = traffic.folder("Construction Events").expect("sub-folder");

        assert_eq!(folder.placemarks.len(), 1);
        let placemark = &folder.placemarks[0];
        assert_eq!(placemark.name, "EVT1");
        assert_eq!(placemark.style_url, "#style_CONSTRUCTION");
        assert_eq!(placemark.geometry.to_kml_coordinates(), "-123.1,49.2,0");
    }

    #[test]
    fn test_sub_folders_in_first_seen_order() {
        let events = [
            event("A", EventType::Weather),
            event("B", EventType::Incident),
            event("C", EventType::Weather),
        ];
        let doc = build(&events, &[]);
        let traffic = doc.folder(TRAFFIC_FOLDER).expect("traffic folder");

        let names: Vec<_> = traffic.folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Weather Events", "Incident Events"]);

        let weather: Vec<_> = traffic.folders[0]
            .placemarks
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(weather, ["A", "C"]);
    }

    #[test]
    fn test_unknown_event_type_lands_in_other() {
        let mut special = event("X", EventType::from_api("SPECIAL_EVENT"));
        special.raw_event_type = Some("SPECIAL_EVENT".to_string());
        let doc = build(&[special], &[]);

        let traffic = doc.folder(TRAFFIC_FOLDER).expect("traffic folder");
        let other = traffic.folder("Other Events").expect("other folder");
        assert_eq!(other.placemarks[0].style_url, "#style_OTHER");
        assert!(other.placemarks[0].description.contains("SPECIAL_EVENT"));
    }

    #[test]
    fn test_ferries_grouped_under_ferry_folder() {
        let ferries = [
            ferry("Lytton Ferry", FerryType::Cable),
            ferry("Big Bar Ferry", FerryType::OnDemand),
        ];
        let doc = build(&[], &ferries);
        let top = doc.folder(FERRY_FOLDER).expect("ferry folder");

        assert_eq!(top.placemark_count(), 2);
        assert!(top.folder("Cable Ferries").is_some());
        let on_demand = top.folder("On Demand Ferries").expect("on demand");
        assert_eq!(on_demand.placemarks[0].style_url, "#style_FERRY_ON_DEMAND");
        assert!(on_demand.placemarks[0].geometry.is_point());
    }

    #[test]
    fn test_category_counts() {
        let events = [
            event("A", EventType::Construction),
            event("B", EventType::Construction),
            event("C", EventType::Weather),
        ];
        let doc = build(&events, &[ferry("F", FerryType::Scheduled)]);

        assert_eq!(
            doc.category_counts(),
            vec![
                (Category::Event(EventType::Construction), 2),
                (Category::Event(EventType::Weather), 1),
                (Category::Ferry(FerryType::Scheduled), 1),
            ]
        );
    }

    #[test]
    fn test_generated_at_description() {
        let at = Utc.with_ymd_and_hms(2025, 8, 20, 15, 30, 0).unwrap();
        let doc = DocumentBuilder::new("Test").generated_at(at).build();

        assert_eq!(doc.name, "Test");
        let description = doc.description.expect("description");
        assert!(description.ends_with("Generated 2025-08-20 15:30:00 UTC"));
    }

    #[test]
    fn test_push_record() {
        let mut builder = DocumentBuilder::new("Test");
        builder
            .push(&Record::from(event("E", EventType::Incident)))
            .push(&Record::from(ferry("F", FerryType::Cable)));
        let doc = builder.build();

        assert_eq!(doc.placemark_count(), 2);
        let names: Vec<_> = doc.placemarks().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["E", "F"]);
    }
}
