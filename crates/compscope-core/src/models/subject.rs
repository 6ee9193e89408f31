use serde::{Deserialize, Serialize};

use super::Coordinates;

/// The property under evaluation.
///
/// A session holds exactly one subject and replaces it wholesale on every
/// edit, so earlier snapshots handed to readers are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProperty {
    pub address: String,
    pub location: Coordinates,
    pub sqft: u32,
    pub beds: u32,
    /// Half-step bathroom count (e.g. 2.5)
    pub baths: f64,
    pub year_built: i32,
}

impl Default for SubjectProperty {
    fn default() -> Self {
        Self {
            address: "Bellingham, WA".to_string(),
            location: Coordinates::new(48.75, -122.48),
            sqft: 1800,
            beds: 3,
            baths: 2.0,
            year_built: 1998,
        }
    }
}

impl SubjectProperty {
    /// Return a copy relocated to new coordinates
    pub fn with_location(&self, location: Coordinates) -> Self {
        Self { location, ..self.clone() }
    }

    /// Return a copy with a different living area
    pub fn with_sqft(&self, sqft: u32) -> Self {
        Self { sqft, ..self.clone() }
    }

    /// One-line description used in summaries
    pub fn summary(&self) -> String {
        format!(
            "{} bed · {} bath · {} sqft · Built {}",
            self.beds, self.baths, self.sqft, self.year_built
        )
    }
}
