//! Domain entities - Records published by the feeds

mod ferry_route;
mod record;
mod traffic_event;

pub use ferry_route::{FerryCapacity, FerryContact, FerryRoute};
pub use record::Record;
pub use traffic_event::{EventSchedule, TrafficEvent};
