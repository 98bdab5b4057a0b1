//! Serialize-then-read checks on whole documents

use domain::{
    Coordinate, EventType, FerryRoute, FerryType, Geometry, Severity, TrafficEvent,
};
use kml::{FERRY_FOLDER, TRAFFIC_FOLDER, build, outline, serialize};
use proptest::prelude::*;

fn point(lon: f64, lat: f64) -> Geometry {
    Geometry::Point(Coordinate::new(lon, lat).expect("valid"))
}

fn event(id: &str, event_type: EventType) -> TrafficEvent {
    TrafficEvent::new(id, event_type, point(-123.1, 49.2))
}

#[test]
fn single_construction_event() {
    let xml = serialize(&build(&[event("EVT1", EventType::Construction)], &[])).expect("serialize");
    let doc = outline(&xml).expect("outline");

    let traffic = doc.folder(TRAFFIC_FOLDER).expect("traffic folder");
    assert_eq!(traffic.folders.len(), 1);

    let construction = traffic.folder("Construction Events").expect("construction folder");
    assert_eq!(construction.placemarks.len(), 1);

    let placemark = &construction.placemarks[0];
    assert_eq!(placemark.name, "EVT1");
    assert_eq!(placemark.style_url, "#style_CONSTRUCTION");
    assert_eq!(placemark.geometry, "Point");
    assert_eq!(placemark.coordinates, "-123.1,49.2,0");

    assert!(doc.style_ids.iter().any(|id| id == "style_CONSTRUCTION"));
    assert!(xml.contains("<color>ff0000ff</color>"));
}

#[test]
fn empty_feeds_give_valid_empty_document() {
    let xml = serialize(&build(&[], &[])).expect("serialize");
    let doc = outline(&xml).expect("outline");

    assert_eq!(doc.placemark_count(), 0);
    let names: Vec<_> = doc.folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, [TRAFFIC_FOLDER, FERRY_FOLDER]);
    assert!(doc.folders.iter().all(|f| f.folders.is_empty()));
}

#[test]
fn ferry_without_contact_or_webcam() {
    let mut ferry = FerryRoute::new(
        "Lytton Ferry",
        FerryType::Cable,
        Coordinate::new(-121.95, 50.35).expect("valid"),
    );
    ferry.capacity.vehicles = Some(2);

    let xml = serialize(&build(&[], &[ferry])).expect("serialize");
    let doc = outline(&xml).expect("outline");

    let cable = doc
        .folder(FERRY_FOLDER)
        .and_then(|f| f.folder("Cable Ferries"))
        .expect("cable folder");
    let description = &cable.placemarks[0].description;

    assert!(description.contains("<b>Name:</b> Lytton Ferry<br/>"));
    assert!(description.contains("<b>Type:</b> Cable<br/>"));
    assert!(description.contains("<b>Vehicle Capacity:</b> 2<br/>"));
    assert!(!description.contains("None"));
    assert!(!description.contains("Phone"));
    assert!(!description.contains("Webcam"));
    assert_eq!(cable.placemarks[0].style_url, "#style_FERRY_CABLE");
}

#[test]
fn long_identifier_is_not_truncated() {
    let id = "DBC-".to_string() + &"9".repeat(300);
    let xml = serialize(&build(&[event(&id, EventType::Incident)], &[])).expect("serialize");
    let doc = outline(&xml).expect("outline");

    let incident = doc
        .folder(TRAFFIC_FOLDER)
        .and_then(|f| f.folder("Incident Events"))
        .expect("incident folder");
    assert_eq!(incident.placemarks[0].name, id);
}

#[test]
fn full_event_description_survives() {
    let mut full = event("DBC-1", EventType::RoadCondition);
    full.severity = Some(Severity::Moderate);
    full.landmark = Some("Near \"Hope\" & Princeton".to_string());
    full.description = Some("Compact snow <caution>".to_string());

    let xml = serialize(&build(&[full], &[])).expect("serialize");
    let doc = outline(&xml).expect("outline");
    let placemark = &doc
        .folder(TRAFFIC_FOLDER)
        .and_then(|f| f.folder("Road Condition Events"))
        .expect("road condition folder")
        .placemarks[0];

    assert!(placemark.description.starts_with("<h3>Traffic Event Details</h3>"));
    assert!(placemark.description.contains("<b>Severity/Incident Level:</b> MODERATE<br/>"));
    assert!(
        placemark
            .description
            .contains("<b>Closest Landmark:</b> Near &quot;Hope&quot; &amp; Princeton<br/>")
    );
    assert!(placemark.description.contains("Compact snow &lt;caution&gt;"));
}

#[test]
fn carriage_returns_are_written_as_line_feeds() {
    let xml = serialize(&build(&[event("EVT\r\n9", EventType::Weather)], &[])).expect("serialize");
    assert!(!xml.contains('\r'));

    let doc = outline(&xml).expect("outline");
    let weather = doc
        .folder(TRAFFIC_FOLDER)
        .and_then(|f| f.folder("Weather Events"))
        .expect("weather folder");
    assert_eq!(weather.placemarks[0].name, "EVT\n9");
}

fn event_type() -> impl Strategy<Value = EventType> {
    prop::sample::select(EventType::ALL.to_vec())
}

fn ferry_type() -> impl Strategy<Value = FerryType> {
    prop::sample::select(FerryType::ALL.to_vec())
}

proptest! {
    #[test]
    fn text_with_markup_round_trips(name in "\\PC*", raw in "[<>&'\"a-z ]{0,40}") {
        let text = format!("{name}{raw}");
        let ferry = FerryRoute::new(
            text.clone(),
            FerryType::Scheduled,
            Coordinate::new(-123.0, 49.0).expect("valid"),
        );

        let xml = serialize(&build(&[event(&text, EventType::Weather)], &[ferry])).expect("serialize");
        let doc = outline(&xml).expect("outline");

        let weather = doc
            .folder(TRAFFIC_FOLDER)
            .and_then(|f| f.folder("Weather Events"))
            .expect("weather folder");
        prop_assert_eq!(&weather.placemarks[0].name, &text);

        let scheduled = doc
            .folder(FERRY_FOLDER)
            .and_then(|f| f.folder("Scheduled Ferries"))
            .expect("scheduled folder");
        prop_assert_eq!(&scheduled.placemarks[0].name, &text);
    }

    #[test]
    fn counts_and_grouping_round_trip(
        events in prop::collection::vec(event_type(), 0..30),
        ferries in prop::collection::vec(ferry_type(), 0..10),
    ) {
        let events: Vec<_> = events
            .into_iter()
            .enumerate()
            .map(|(i, t)| event(&format!("E{i}"), t))
            .collect();
        let ferries: Vec<_> = ferries
            .into_iter()
            .enumerate()
            .map(|(i, t)| FerryRoute::new(
                format!("F{i}"),
                t,
                Coordinate::new(-122.0, 50.0).expect("valid"),
            ))
            .collect();

        let document = build(&events, &ferries);
        let doc = outline(&serialize(&document).expect("serialize")).expect("outline");

        prop_assert_eq!(doc.placemark_count(), events.len() + ferries.len());

        for (category, count) in document.category_counts() {
            let top = if ferries.iter().any(|f| f.category() == category) {
                FERRY_FOLDER
            } else {
                TRAFFIC_FOLDER
            };
            let folder = doc
                .folder(top)
                .and_then(|f| f.folder(&category.folder_name()))
                .expect("category folder");
            prop_assert_eq!(folder.placemarks.len(), count);
        }
    }
}
