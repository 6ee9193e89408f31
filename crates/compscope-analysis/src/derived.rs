//! KPIs, regression line and price/sqft histogram for a filtered comp set.

use compscope_core::models::{Listing, SubjectProperty};
use compscope_core::stats::{average, linear_regression, median, DataPoint};
use serde::Serialize;

use crate::insight::{derive_insight, market_profile, subject_valuation, MarketProfile};

/// Bins used for the price/sqft distribution
pub const HISTOGRAM_BINS: usize = 20;

/// Headline figures for a comp set; all zero for an empty set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub count: usize,
    pub median_price: f64,
    pub median_price_per_sqft: f64,
    pub average_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub midpoint: f64,
    pub count: usize,
    pub label: String,
}

/// Everything derived from one filtered comp set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedStats {
    pub kpis: Kpis,
    /// Price-vs-sqft fit evaluated at the smallest and largest sqft
    pub regression: Option<[DataPoint; 2]>,
    pub histogram: Vec<HistogramBin>,
    pub insight: Option<String>,
    pub profile: Option<MarketProfile>,
    /// Subject value at the median price/sqft
    pub subject_valuation: Option<f64>,
}

impl Kpis {
    pub fn from_listings(listings: &[Listing]) -> Self {
        let prices: Vec<f64> = listings.iter().map(|l| l.price as f64).collect();
        let distances: Vec<f64> = listings.iter().map(|l| l.distance_from_subject).collect();

        Self {
            count: listings.len(),
            median_price: median(&prices),
            median_price_per_sqft: median(&price_per_sqft_values(listings)),
            average_distance: average(&distances),
        }
    }
}

/// Price/sqft of every listing with a non-zero area
pub fn price_per_sqft_values(listings: &[Listing]) -> Vec<f64> {
    listings.iter().filter_map(Listing::price_per_sqft).collect()
}

/// `(sqft, price)` samples for regression
pub fn sqft_price_points(listings: &[Listing]) -> Vec<DataPoint> {
    listings.iter().map(|l| DataPoint::new(l.sqft as f64, l.price as f64)).collect()
}

/// Equal-width histogram of price/sqft over the set's own range
pub fn price_histogram(listings: &[Listing]) -> Vec<HistogramBin> {
    histogram(&price_per_sqft_values(listings), HISTOGRAM_BINS)
}

fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    if width == 0.0 {
        return vec![bin(min, min, values.len())];
    }

    let mut counts = vec![0usize; bins];
    for value in values {
        // The maximum lands exactly on the upper edge; keep it in the last bin
        let index = (((value - min) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = min + i as f64 * width;
            bin(start, start + width, count)
        })
        .collect()
}

fn bin(start: f64, end: f64, count: usize) -> HistogramBin {
    HistogramBin {
        start,
        end,
        midpoint: (start + end) / 2.0,
        count,
        label: format!("{}-{}", start.round(), end.round()),
    }
}

/// Run every derivation over a filtered comp set
pub fn derive_stats(listings: &[Listing], subject: &SubjectProperty) -> DerivedStats {
    DerivedStats {
        kpis: Kpis::from_listings(listings),
        regression: linear_regression(&sqft_price_points(listings)),
        histogram: price_histogram(listings),
        insight: derive_insight(listings, subject),
        profile: market_profile(listings),
        subject_valuation: subject_valuation(listings, subject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compscope_core::models::{Coordinates, ListingId};

    fn listing(id: u32, price: u64, sqft: u32, distance: f64) -> Listing {
        Listing {
            id: ListingId(id),
            price,
            sqft,
            beds: 3,
            baths: 2.0,
            year_built: 2000,
            location: Coordinates::new(48.75, -122.48),
            distance_from_subject: distance,
            listing_date: None,
        }
    }

    #[test]
    fn test_empty_set_is_all_zero() {
        let stats = derive_stats(&[], &SubjectProperty::default());
        assert_eq!(stats.kpis, Kpis::default());
        assert!(stats.regression.is_none());
        assert!(stats.histogram.is_empty());
        assert!(stats.insight.is_none());
        assert!(stats.profile.is_none());
        assert!(stats.subject_valuation.is_none());
    }

    #[test]
    fn test_kpis() {
        let listings = vec![
            listing(0, 400_000, 1000, 0.2),
            listing(1, 700_000, 2000, 0.4),
            listing(2, 500_000, 1250, 0.6),
        ];
        let kpis = Kpis::from_listings(&listings);
        assert_eq!(kpis.count, 3);
        assert_eq!(kpis.median_price, 500_000.0);
        assert_eq!(kpis.median_price_per_sqft, 400.0);
        assert!((kpis.average_distance - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_zero_area_listing_excluded_from_ratio() {
        let listings = vec![listing(0, 350_000, 1000, 0.1), listing(1, 500_000, 0, 0.1)];
        assert_eq!(price_per_sqft_values(&listings), vec![350.0]);
        assert_eq!(Kpis::from_listings(&listings).median_price_per_sqft, 350.0);
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let listings: Vec<_> =
            (0..41).map(|i| listing(i, 1000 * (330 + i as u64), 1000, 0.1)).collect();
        let bins = price_histogram(&listings);

        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 41);
        assert_eq!(bins[0].start, 330.0);
        assert!((bins[HISTOGRAM_BINS - 1].end - 370.0).abs() < 1e-9);
        assert_eq!(bins[0].label, "330-332");
        assert!(bins[HISTOGRAM_BINS - 1].count >= 1, "maximum belongs to the last bin");
    }

    #[test]
    fn test_histogram_identical_values() {
        let listings = vec![listing(0, 350_000, 1000, 0.1), listing(1, 700_000, 2000, 0.1)];
        let bins = price_histogram(&listings);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[0].label, "350-350");
    }

    #[test]
    fn test_regression_over_comps() {
        let listings = vec![listing(0, 350_000, 1000, 0.1), listing(1, 700_000, 2000, 0.1)];
        let stats = derive_stats(&listings, &SubjectProperty::default());
        let line = stats.regression.unwrap();
        assert_eq!(line[0], DataPoint::new(1000.0, 350_000.0));
        assert_eq!(line[1], DataPoint::new(2000.0, 700_000.0));
    }
}
