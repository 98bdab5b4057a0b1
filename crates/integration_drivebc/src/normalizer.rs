//! Record normalizer
//!
//! Maps raw feed records onto domain types. Optional fields that are
//! missing, `null` or blank become `None`; they are never replaced by
//! placeholder text. Identifiers and names are kept verbatim. A record
//! that cannot be placed on a map is skipped with a warning and counted,
//! it never aborts the batch.

use domain::{
    Coordinate, EventSchedule, EventType, FerryCapacity, FerryContact, FerryRoute, FerryType,
    Geometry, Severity, TrafficEvent,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{RawEvent, RawFerry, RawLocation};

/// Why a record was left out of the document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// Event without an identifier
    #[error("record has no id")]
    MissingId,

    /// Ferry without a name
    #[error("record has no name")]
    MissingName,

    /// No location, or a location without any coordinate pair
    #[error("record has no geometry")]
    MissingGeometry,

    /// Geometry type other than a point or a line
    #[error("unsupported geometry type '{0}'")]
    UnsupportedGeometry(String),

    /// Coordinates that are not numeric pairs or out of range
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// The record is not a JSON object of the expected shape
    #[error("malformed record: {0}")]
    Malformed(String),
}

/// A record left out of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Position in the feed
    pub index: usize,
    /// Identifier, when one could be read
    pub id: Option<String>,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Outcome of normalizing one feed
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBatch<T> {
    /// Records that made it, in feed order
    pub records: Vec<T>,
    /// Records that were skipped
    pub skipped: Vec<SkippedRecord>,
}

impl<T> Default for NormalizedBatch<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Normalize a single traffic event record
///
/// # Errors
///
/// Returns the [`SkipReason`] when the record has no id, no usable
/// geometry, or is not an object.
pub fn normalize_event(value: &Value) -> Result<TrafficEvent, SkipReason> {
    let raw: RawEvent = decode(value)?;

    let id = present(raw.id).ok_or(SkipReason::MissingId)?;
    let geometry = raw
        .location
        .as_ref()
        .ok_or(SkipReason::MissingGeometry)
        .and_then(extract_geometry)?;

    let raw_type = present(raw.event_type);
    let event_type = raw_type.as_deref().map_or(EventType::Other, EventType::from_api);

    if event_type == EventType::Other {
        if let Some(raw_type) = raw_type.as_deref() {
            debug!(%id, event_type = %raw_type, "Unknown event type, filing under OTHER");
        }
    }

    let mut event = TrafficEvent::new(id, event_type, geometry);
    event.raw_event_type = raw_type.filter(|t| t != event_type.key());
    event.event_sub_type = present(raw.event_sub_type);
    event.severity = present(raw.severity).map(|s| Severity::from_api(&s));
    event.status = present(raw.status);
    event.description = present(raw.description);
    event.route = present(raw.route_at);
    event.location_description = present(raw.location_description);
    event.landmark = present(raw.closest_landmark);
    event.direction = present(raw.direction);
    event.closed = raw.closed;
    event.schedule = EventSchedule {
        last_updated: present(raw.last_updated),
        next_update: present(raw.next_update),
        start: present(raw.start),
        end: present(raw.end),
    };

    Ok(event)
}

/// Normalize a single ferry record
///
/// # Errors
///
/// Returns the [`SkipReason`] when the record has no name, no usable
/// terminal location, or is not an object.
pub fn normalize_ferry(value: &Value) -> Result<FerryRoute, SkipReason> {
    let raw: RawFerry = decode(value)?;

    let name = present(raw.name).ok_or(SkipReason::MissingName)?;
    let location = ferry_location(raw.location.as_ref(), raw.longitude, raw.latitude)?;

    let raw_type = present(raw.kind);
    let ferry_type = raw_type.as_deref().map_or(FerryType::Other, FerryType::from_api);

    let nested = raw.contact.unwrap_or_default();

    let mut route = FerryRoute::new(name, ferry_type, location);
    route.id = present(raw.id);
    route.raw_ferry_type = raw_type;
    route.capacity = FerryCapacity {
        vehicles: raw.vehicle_capacity,
        passengers: raw.passenger_capacity,
    };
    route.crossing_time_minutes = raw.crossing_time_min;
    route.schedule = present(raw.schedule);
    route.contact = FerryContact {
        phone: present(raw.contact_phone).or_else(|| present(nested.phone)),
        email: present(raw.contact_email).or_else(|| present(nested.email)),
    };
    route.webcam_url = present(raw.webcam_url);

    Ok(route)
}

/// Normalize every record of the events feed
pub fn normalize_events(values: &[Value]) -> NormalizedBatch<TrafficEvent> {
    normalize_all(values, "event", normalize_event)
}

/// Normalize every record of the ferries feed
pub fn normalize_ferries(values: &[Value]) -> NormalizedBatch<FerryRoute> {
    normalize_all(values, "ferry", normalize_ferry)
}

fn normalize_all<T>(
    values: &[Value],
    kind: &'static str,
    normalize: fn(&Value) -> Result<T, SkipReason>,
) -> NormalizedBatch<T> {
    let mut batch = NormalizedBatch {
        records: Vec::with_capacity(values.len()),
        skipped: Vec::new(),
    };

    for (index, value) in values.iter().enumerate() {
        match normalize(value) {
            Ok(record) => batch.records.push(record),
            Err(reason) => {
                let id = record_id(value);
                warn!(
                    kind,
                    index,
                    id = id.as_deref().unwrap_or("-"),
                    reason = %reason,
                    "Skipping record"
                );
                batch.skipped.push(SkippedRecord { index, id, reason });
            },
        }
    }

    batch
}

/// Extract a point or line geometry from a location value
///
/// Accepts a GeoJSON-style object (`Point` or `LineString`) or a bare
/// coordinate array: `[lon, lat]` for a point, `[[lon, lat], ...]` for a
/// line. Extra values in a pair, such as elevation, are ignored.
///
/// # Errors
///
/// Returns a [`SkipReason`] for any other shape.
pub fn extract_geometry(location: &Value) -> Result<Geometry, SkipReason> {
    match location {
        Value::Null => Err(SkipReason::MissingGeometry),
        Value::Array(_) => geometry_from_bare(location),
        Value::Object(_) => {
            let raw: RawLocation = serde_json::from_value(location.clone())
                .map_err(|e| SkipReason::Malformed(e.to_string()))?;

            match raw.kind.as_deref() {
                Some("Point") => parse_pair(&raw.coordinates).map(Geometry::Point),
                Some("LineString") => parse_path(&raw.coordinates),
                Some(other) => Err(SkipReason::UnsupportedGeometry(other.to_string())),
                None => geometry_from_bare(&raw.coordinates),
            }
        },
        other => Err(SkipReason::Malformed(format!(
            "location must be an object or array, got {}",
            json_kind(other)
        ))),
    }
}

fn geometry_from_bare(coordinates: &Value) -> Result<Geometry, SkipReason> {
    match coordinates {
        Value::Null => Err(SkipReason::MissingGeometry),
        Value::Array(items) if items.is_empty() => Err(SkipReason::MissingGeometry),
        Value::Array(items) if items[0].is_array() => parse_path(coordinates),
        Value::Array(_) => parse_pair(coordinates).map(Geometry::Point),
        other => Err(SkipReason::InvalidCoordinates(format!(
            "expected an array, got {}",
            json_kind(other)
        ))),
    }
}

fn parse_path(coordinates: &Value) -> Result<Geometry, SkipReason> {
    let items = coordinates
        .as_array()
        .ok_or_else(|| SkipReason::InvalidCoordinates("line is not an array".to_string()))?;

    let points = items.iter().map(parse_pair).collect::<Result<Vec<_>, _>>()?;

    Geometry::from_coordinates(points).map_err(|_| SkipReason::MissingGeometry)
}

fn parse_pair(pair: &Value) -> Result<Coordinate, SkipReason> {
    let values = pair
        .as_array()
        .filter(|v| v.len() >= 2)
        .ok_or_else(|| SkipReason::InvalidCoordinates(format!("expected [lon, lat], got {pair}")))?;

    let (Some(longitude), Some(latitude)) = (values[0].as_f64(), values[1].as_f64()) else {
        return Err(SkipReason::InvalidCoordinates(format!(
            "non-numeric pair {pair}"
        )));
    };

    Coordinate::new(longitude, latitude).map_err(|e| SkipReason::InvalidCoordinates(e.to_string()))
}

fn ferry_location(
    location: Option<&Value>,
    longitude: Option<f64>,
    latitude: Option<f64>,
) -> Result<Coordinate, SkipReason> {
    if let Some(location) = location {
        return match extract_geometry(location)? {
            Geometry::Point(point) => Ok(point),
            Geometry::LineString(_) => Err(SkipReason::UnsupportedGeometry(
                "LineString (ferry terminals are points)".to_string(),
            )),
        };
    }

    match (longitude, latitude) {
        (Some(lon), Some(lat)) => {
            Coordinate::new(lon, lat).map_err(|e| SkipReason::InvalidCoordinates(e.to_string()))
        },
        _ => Err(SkipReason::MissingGeometry),
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: &Value) -> Result<T, SkipReason> {
    if !value.is_object() {
        return Err(SkipReason::Malformed(format!(
            "expected an object, got {}",
            json_kind(value)
        )));
    }
    serde_json::from_value(value.clone()).map_err(|e| SkipReason::Malformed(e.to_string()))
}

/// Drop missing and blank values, keep everything else untouched
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn record_id(value: &Value) -> Option<String> {
    match value.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => value
            .get("name")
            .and_then(Value::as_str)
            .map(ToString::to_string),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
