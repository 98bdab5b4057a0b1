//! Domain layer for drivebc-kml
//!
//! Typed traffic-event and ferry-route records, their categories and
//! geometry. This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
