use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CompscopeError;

/// Numeric bounds applied to a comp set.
///
/// Every bound is optional; `None` places no constraint on its dimension.
/// Min/max pairs are not cross-checked: an inverted pair simply matches
/// nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub sqft_min: Option<f64>,
    pub sqft_max: Option<f64>,
    pub min_beds: Option<f64>,
    pub min_baths: Option<f64>,
    pub year_built_min: Option<f64>,
    pub year_built_max: Option<f64>,
    pub max_distance: Option<f64>,
}

/// Individual filter dimension, used for per-control edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    PriceMin,
    PriceMax,
    SqftMin,
    SqftMax,
    MinBeds,
    MinBaths,
    YearBuiltMin,
    YearBuiltMax,
    MaxDistance,
}

impl FilterField {
    pub const ALL: [FilterField; 9] = [
        FilterField::PriceMin,
        FilterField::PriceMax,
        FilterField::SqftMin,
        FilterField::SqftMax,
        FilterField::MinBeds,
        FilterField::MinBaths,
        FilterField::YearBuiltMin,
        FilterField::YearBuiltMax,
        FilterField::MaxDistance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::PriceMin => "price_min",
            FilterField::PriceMax => "price_max",
            FilterField::SqftMin => "sqft_min",
            FilterField::SqftMax => "sqft_max",
            FilterField::MinBeds => "min_beds",
            FilterField::MinBaths => "min_baths",
            FilterField::YearBuiltMin => "year_built_min",
            FilterField::YearBuiltMax => "year_built_max",
            FilterField::MaxDistance => "max_distance",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = CompscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        FilterField::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| CompscopeError::ConfigInvalid {
                key: "filter".to_string(),
                reason: format!("Unknown filter field: {}", s),
            })
    }
}

/// Parse a user-entered bound.
///
/// Blank, non-numeric, NaN and infinite input all normalize to `None` so
/// that malformed text behaves like an unset control.
pub fn parse_bound(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.replace(',', "").parse::<f64>().ok().filter(|v| v.is_finite())
}

impl Filters {
    /// Filters with every bound unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a single bound
    pub fn get(&self, field: FilterField) -> Option<f64> {
        match field {
            FilterField::PriceMin => self.price_min,
            FilterField::PriceMax => self.price_max,
            FilterField::SqftMin => self.sqft_min,
            FilterField::SqftMax => self.sqft_max,
            FilterField::MinBeds => self.min_beds,
            FilterField::MinBaths => self.min_baths,
            FilterField::YearBuiltMin => self.year_built_min,
            FilterField::YearBuiltMax => self.year_built_max,
            FilterField::MaxDistance => self.max_distance,
        }
    }

    /// Return a copy with one bound replaced; non-finite values become unset
    pub fn with(mut self, field: FilterField, value: Option<f64>) -> Self {
        let value = value.filter(|v| v.is_finite());
        let slot = match field {
            FilterField::PriceMin => &mut self.price_min,
            FilterField::PriceMax => &mut self.price_max,
            FilterField::SqftMin => &mut self.sqft_min,
            FilterField::SqftMax => &mut self.sqft_max,
            FilterField::MinBeds => &mut self.min_beds,
            FilterField::MinBaths => &mut self.min_baths,
            FilterField::YearBuiltMin => &mut self.year_built_min,
            FilterField::YearBuiltMax => &mut self.year_built_max,
            FilterField::MaxDistance => &mut self.max_distance,
        };
        *slot = value;
        self
    }

    /// Return a copy with one bound parsed from text
    pub fn with_text(self, field: FilterField, input: &str) -> Self {
        self.with(field, parse_bound(input))
    }

    pub fn price(self, min: Option<f64>, max: Option<f64>) -> Self {
        self.with(FilterField::PriceMin, min).with(FilterField::PriceMax, max)
    }

    pub fn sqft(self, min: Option<f64>, max: Option<f64>) -> Self {
        self.with(FilterField::SqftMin, min).with(FilterField::SqftMax, max)
    }

    pub fn year_built(self, min: Option<f64>, max: Option<f64>) -> Self {
        self.with(FilterField::YearBuiltMin, min).with(FilterField::YearBuiltMax, max)
    }

    pub fn min_beds(self, beds: f64) -> Self {
        self.with(FilterField::MinBeds, Some(beds))
    }

    pub fn min_baths(self, baths: f64) -> Self {
        self.with(FilterField::MinBaths, Some(baths))
    }

    pub fn max_distance(self, miles: f64) -> Self {
        self.with(FilterField::MaxDistance, Some(miles))
    }

    /// Replace any non-finite bound with `None`
    pub fn sanitized(self) -> Self {
        FilterField::ALL
            .into_iter()
            .fold(self, |filters, field| filters.with(field, filters.get(field)))
    }

    /// Check if no bound is set
    pub fn is_empty(&self) -> bool {
        self.active_fields().next().is_none()
    }

    /// Fields that currently constrain the comp set
    pub fn active_fields(&self) -> impl Iterator<Item = FilterField> + '_ {
        FilterField::ALL.into_iter().filter(|field| self.get(*field).is_some())
    }
}
