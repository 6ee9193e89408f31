//! Location and distance types shared across compscope crates.

use serde::{Deserialize, Serialize};

/// A WGS 84 latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Shift by a delta in degrees on each axis
    pub fn offset(&self, d_lat: f64, d_lng: f64) -> Self {
        Self::new(self.lat + d_lat, self.lng + d_lng)
    }

    /// Whether both axes are finite and inside the WGS 84 ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Distance units for display and conversion.
///
/// All distances inside the pipeline are carried in miles; other units are
/// only used at the presentation edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometers,
    Meters,
    Feet,
}

impl DistanceUnit {
    /// Convert a distance in miles into this unit
    pub fn from_miles(&self, miles: f64) -> f64 {
        match self {
            DistanceUnit::Miles => miles,
            DistanceUnit::Kilometers => miles * 1.609344,
            DistanceUnit::Meters => miles * 1609.344,
            DistanceUnit::Feet => miles * 5280.0,
        }
    }

    /// Convert a distance in this unit into miles
    pub fn to_miles(&self, value: f64) -> f64 {
        match self {
            DistanceUnit::Miles => value,
            DistanceUnit::Kilometers => value / 1.609344,
            DistanceUnit::Meters => value / 1609.344,
            DistanceUnit::Feet => value / 5280.0,
        }
    }

    /// Short suffix used in tables
    pub fn abbreviation(&self) -> &'static str {
        match self {
            DistanceUnit::Miles => "mi",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Meters => "m",
            DistanceUnit::Feet => "ft",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validity() {
        assert!(Coordinates::new(48.75, -122.48).is_valid());
        assert!(Coordinates::new(90.0, 180.0).is_valid());
        assert!(!Coordinates::new(90.5, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.1).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_distance_conversion() {
        let km = DistanceUnit::Kilometers.from_miles(1.0);
        assert!((km - 1.609344).abs() < 1e-9);

        let back = DistanceUnit::Kilometers.to_miles(km);
        assert!((back - 1.0).abs() < 1e-9);

        assert_eq!(DistanceUnit::Feet.from_miles(0.5), 2640.0);
        assert_eq!(DistanceUnit::Miles.abbreviation(), "mi");
    }
}
