use chrono::{DateTime, Utc};
use compscope_analysis::{format_dollars, HistogramBin, Kpis};
use compscope_core::models::{
    Coordinates, DateRange, DistanceUnit, Filters, FilterPreset, Listing, PresetId,
    SubjectProperty,
};
use compscope_core::stats::DataPoint;
use compscope_geo::bounds::MapBounds;
use serde::Serialize;
use tabled::Tabled;

/// Output for analyze command
#[derive(Debug, Serialize)]
pub struct AnalyzeOutput {
    pub generated_at: DateTime<Utc>,
    pub subject: SubjectProperty,
    pub seed: Option<u64>,
    pub preset: Option<PresetId>,
    pub filters: Filters,
    pub date_range: DateRange,
    pub distance_unit: DistanceUnit,
    pub total_listings: usize,
    pub kpis: Kpis,
    pub insight: Option<String>,
    pub market_profile: Option<String>,
    pub subject_valuation: Option<f64>,
    pub regression: Option<[DataPoint; 2]>,
    pub histogram: Vec<HistogramBin>,
    pub bounds: Option<MapBounds>,
    pub centroid: Option<Coordinates>,
    pub listings: Vec<Listing>,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: String,
}

#[derive(Tabled)]
pub struct ListingRow {
    #[tabled(rename = "ID")]
    pub id: u32,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Sqft")]
    pub sqft: u32,
    #[tabled(rename = "$/Sqft")]
    pub price_per_sqft: String,
    #[tabled(rename = "Beds")]
    pub beds: u32,
    #[tabled(rename = "Baths")]
    pub baths: f64,
    #[tabled(rename = "Built")]
    pub year_built: i32,
    #[tabled(rename = "Distance")]
    pub distance: String,
}

impl ListingRow {
    pub fn new(listing: &Listing, unit: DistanceUnit) -> Self {
        Self {
            id: listing.id.0,
            price: format!("${}", format_dollars(listing.price as f64)),
            sqft: listing.sqft,
            price_per_sqft: listing
                .price_per_sqft()
                .map(|ppsf| format!("${:.2}", ppsf))
                .unwrap_or_else(|| "-".to_string()),
            beds: listing.beds,
            baths: listing.baths,
            year_built: listing.year_built,
            distance: format!(
                "{:.2} {}",
                unit.from_miles(listing.distance_from_subject),
                unit.abbreviation()
            ),
        }
    }
}

#[derive(Tabled)]
pub struct HistogramRow {
    #[tabled(rename = "$/Sqft")]
    pub range: String,
    #[tabled(rename = "Count")]
    pub count: usize,
    #[tabled(rename = "")]
    pub bar: String,
}

impl From<&HistogramBin> for HistogramRow {
    fn from(bin: &HistogramBin) -> Self {
        Self { range: bin.label.clone(), count: bin.count, bar: "█".repeat(bin.count) }
    }
}

#[derive(Tabled)]
pub struct PresetRow {
    #[tabled(rename = "Name")]
    pub name: &'static str,
    #[tabled(rename = "Label")]
    pub label: &'static str,
    #[tabled(rename = "Filters")]
    pub filters: String,
}

impl From<&FilterPreset> for PresetRow {
    fn from(preset: &FilterPreset) -> Self {
        Self {
            name: preset.id.as_str(),
            label: preset.label,
            filters: describe_filters(&preset.filters),
        }
    }
}

#[derive(Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

/// `field=value` pairs for every set bound, or `none`
pub fn describe_filters(filters: &Filters) -> String {
    let parts: Vec<String> = filters
        .active_fields()
        .filter_map(|field| filters.get(field).map(|value| format!("{}={}", field, value)))
        .collect();

    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}
