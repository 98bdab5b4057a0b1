//! Raw DriveBC JSON models
//!
//! These mirror the feed payloads loosely: every field is optional and
//! scalar fields accept the spellings seen in the wild (numbers as strings,
//! ids as numbers). Turning them into domain types is the normalizer's job.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// GeoJSON-like location object: `{"type": "Point", "coordinates": [lon, lat]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    /// Geometry type, e.g. `Point` or `LineString`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Coordinates, shape depends on `kind`
    #[serde(default)]
    pub coordinates: Value,
}

/// A traffic event record from the events feed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    /// Event identifier, e.g. `DBC-52393`
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    /// Event type, e.g. `CONSTRUCTION`
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_type: Option<String>,

    /// Event sub type, e.g. `ROAD_MAINTENANCE`
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_sub_type: Option<String>,

    /// Severity, e.g. `MAJOR`
    #[serde(default, deserialize_with = "lenient_string")]
    pub severity: Option<String>,

    /// Status, e.g. `ACTIVE`
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,

    /// Full description
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,

    /// Route name
    #[serde(default, alias = "route", deserialize_with = "lenient_string")]
    pub route_at: Option<String>,

    /// Location text
    #[serde(default, deserialize_with = "lenient_string")]
    pub location_description: Option<String>,

    /// Closest landmark
    #[serde(default, alias = "landmark", deserialize_with = "lenient_string")]
    pub closest_landmark: Option<String>,

    /// Direction of travel
    #[serde(default, deserialize_with = "lenient_string")]
    pub direction: Option<String>,

    /// Last update timestamp
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_updated: Option<String>,

    /// Next update timestamp
    #[serde(default, deserialize_with = "lenient_string")]
    pub next_update: Option<String>,

    /// Start timestamp
    #[serde(default, deserialize_with = "lenient_string")]
    pub start: Option<String>,

    /// End timestamp
    #[serde(default, deserialize_with = "lenient_string")]
    pub end: Option<String>,

    /// Whether the road is closed
    #[serde(default, deserialize_with = "lenient_bool")]
    pub closed: Option<bool>,

    /// Location: GeoJSON object or bare coordinate array
    #[serde(default, alias = "geometry")]
    pub location: Option<Value>,
}

/// Contact block some ferry records nest instead of flat fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawContact {
    /// Phone number
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,

    /// Email address
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
}

/// An inland ferry record from the ferries feed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFerry {
    /// Route identifier
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    /// Route name
    #[serde(default, alias = "title", alias = "route_name", deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// Service kind, e.g. `CABLE`
    #[serde(
        default,
        rename = "type",
        alias = "ferry_type",
        alias = "service_type",
        deserialize_with = "lenient_string"
    )]
    pub kind: Option<String>,

    /// Vehicles per sailing
    #[serde(default, deserialize_with = "lenient_u32")]
    pub vehicle_capacity: Option<u32>,

    /// Passengers per sailing
    #[serde(default, deserialize_with = "lenient_u32")]
    pub passenger_capacity: Option<u32>,

    /// Crossing time in minutes
    #[serde(default, alias = "crossing_time", deserialize_with = "lenient_u32")]
    pub crossing_time_min: Option<u32>,

    /// Free-text schedule
    #[serde(default, alias = "schedule_detail", deserialize_with = "lenient_string")]
    pub schedule: Option<String>,

    /// Contact block, or a bare phone number or email
    #[serde(default, deserialize_with = "lenient_contact")]
    pub contact: Option<RawContact>,

    /// Flat contact phone
    #[serde(default, deserialize_with = "lenient_string")]
    pub contact_phone: Option<String>,

    /// Flat contact email
    #[serde(default, deserialize_with = "lenient_string")]
    pub contact_email: Option<String>,

    /// Webcam URL
    #[serde(default, deserialize_with = "lenient_string")]
    pub webcam_url: Option<String>,

    /// Terminal location: GeoJSON object or bare coordinate array
    #[serde(default, alias = "geometry")]
    pub location: Option<Value>,

    /// Flat longitude, used when `location` is absent
    #[serde(default, alias = "lon", alias = "lng", deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,

    /// Flat latitude, used when `location` is absent
    #[serde(default, alias = "lat", deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
}

/// Accept a string, number or bool; `null` becomes `None`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Accept a non-negative integer or a string holding one
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accept a number or a string holding one
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accept a contact object or a bare string; strings with `@` are emails
fn lenient_contact<'de, D>(deserializer: D) -> Result<Option<RawContact>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        Some(Value::String(s)) if s.contains('@') => Some(RawContact {
            phone: None,
            email: Some(s),
        }),
        Some(Value::String(s)) => Some(RawContact {
            phone: Some(s),
            email: None,
        }),
        _ => None,
    })
}

/// Accept a bool or the strings `true`/`false`/`yes`/`no`
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Some(Value::Number(n)) => n.as_i64().map(|v| v != 0),
        _ => None,
    })
}
