use serde::{Deserialize, Serialize};
use std::fmt;

use super::Coordinates;

/// Identifier of a listing within one generated batch.
///
/// Ids are batch-local sequence numbers; they are not unique across batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub u32);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A comparable listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,

    /// Sale price in whole dollars
    pub price: u64,

    pub sqft: u32,
    pub beds: u32,
    pub baths: f64,
    pub year_built: i32,
    pub location: Coordinates,

    /// Great-circle distance to the subject in miles
    pub distance_from_subject: f64,

    /// Year the listing was posted, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_date: Option<i32>,
}

impl Listing {
    /// Date used for timeline filtering: the listing date, or the year built
    pub fn effective_date(&self) -> i32 {
        self.listing_date.unwrap_or(self.year_built)
    }

    /// Price per square foot, or `None` when the area is zero
    pub fn price_per_sqft(&self) -> Option<f64> {
        if self.sqft == 0 {
            return None;
        }
        Some(self.price as f64 / self.sqft as f64)
    }
}
