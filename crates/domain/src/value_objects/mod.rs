//! Value Objects - Immutable, identity-less domain primitives

mod category;
mod coordinate;
mod event_type;
mod ferry_type;

pub use category::Category;
pub use coordinate::{Coordinate, Geometry};
pub use event_type::{EventType, Severity};
pub use ferry_type::FerryType;
