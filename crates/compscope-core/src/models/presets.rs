//! Named quick-filter presets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Filters;
use crate::error::CompscopeError;

/// Built-in preset identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetId {
    Starter,
    Luxury,
    Fixers,
    Cashflow,
}

/// A preset: label plus the complete filter set it applies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterPreset {
    pub id: PresetId,
    pub label: &'static str,
    pub filters: Filters,
}

impl PresetId {
    pub const ALL: [PresetId; 4] =
        [PresetId::Starter, PresetId::Luxury, PresetId::Fixers, PresetId::Cashflow];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetId::Starter => "starter",
            PresetId::Luxury => "luxury",
            PresetId::Fixers => "fixers",
            PresetId::Cashflow => "cashflow",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PresetId::Starter => "Starter Homes",
            PresetId::Luxury => "Luxury",
            PresetId::Fixers => "Fixers",
            PresetId::Cashflow => "Cashflow Focus",
        }
    }

    /// Filters applied by this preset; every other bound is unset
    pub fn filters(&self) -> Filters {
        match self {
            PresetId::Starter => Filters::new()
                .price(None, Some(300_000.0))
                .sqft(None, Some(2000.0))
                .min_beds(2.0)
                .min_baths(1.0),
            PresetId::Luxury => Filters::new()
                .price(Some(500_000.0), None)
                .sqft(Some(2500.0), None)
                .min_beds(3.0)
                .min_baths(2.0),
            PresetId::Fixers => {
                Filters::new().price(None, Some(400_000.0)).year_built(None, Some(1990.0))
            }
            PresetId::Cashflow => Filters::new()
                .price(None, Some(350_000.0))
                .sqft(Some(1200.0), Some(2500.0))
                .min_beds(2.0)
                .min_baths(1.5)
                .year_built(Some(1980.0), None)
                .max_distance(5.0),
        }
    }

    pub fn preset(&self) -> FilterPreset {
        FilterPreset { id: *self, label: self.label(), filters: self.filters() }
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetId {
    type Err = CompscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "starter" => Ok(PresetId::Starter),
            "luxury" => Ok(PresetId::Luxury),
            "fixers" => Ok(PresetId::Fixers),
            "cashflow" => Ok(PresetId::Cashflow),
            _ => Err(CompscopeError::UnknownPreset { name: s.to_string() }),
        }
    }
}

/// All presets in display order
pub fn all_presets() -> Vec<FilterPreset> {
    PresetId::ALL.iter().map(PresetId::preset).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preset() {
        assert_eq!("Luxury".parse::<PresetId>().unwrap(), PresetId::Luxury);
        assert!(matches!(
            "cheap".parse::<PresetId>(),
            Err(CompscopeError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn test_cashflow_preset_bounds() {
        let filters = PresetId::Cashflow.filters();
        assert_eq!(filters.price_max, Some(350_000.0));
        assert_eq!(filters.sqft_min, Some(1200.0));
        assert_eq!(filters.sqft_max, Some(2500.0));
        assert_eq!(filters.min_baths, Some(1.5));
        assert_eq!(filters.year_built_min, Some(1980.0));
        assert_eq!(filters.max_distance, Some(5.0));
        assert_eq!(filters.price_min, None);
    }

    #[test]
    fn test_all_presets_in_order() {
        let presets = all_presets();
        assert_eq!(presets.len(), 4);
        assert_eq!(presets[0].label, "Starter Homes");
        assert_eq!(presets[3].id, PresetId::Cashflow);
    }
}
