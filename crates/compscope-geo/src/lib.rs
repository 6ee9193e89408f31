//! Compscope Geo - Distance, validation, and map extents
//!
//! This crate handles the geospatial side of comp analysis: great-circle
//! distance between subject and comps, coordinate and subject validation, and
//! the extents a map collaborator needs to frame a comp set.

pub mod bounds;
pub mod distance;
pub mod validation;

pub use distance::{haversine_distance, haversine_miles, EARTH_RADIUS_MILES};
