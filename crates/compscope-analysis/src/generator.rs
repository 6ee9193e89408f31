//! Synthetic comparable listings around a subject.

use compscope_core::models::{Listing, ListingId, SubjectProperty};
use compscope_geo::haversine_miles;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Ranges the generator draws from
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Maximum deviation from the subject's square footage
    pub sqft_jitter: f64,
    pub price_per_sqft_min: f64,
    pub price_per_sqft_max: f64,
    pub beds_min: u32,
    pub beds_max: u32,
    pub baths_min: f64,
    pub baths_max: f64,
    pub year_built_min: i32,
    pub year_built_max: i32,
    /// Maximum offset from the subject on each axis, in degrees
    pub coordinate_jitter: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sqft_jitter: 600.0,
            price_per_sqft_min: 330.0,
            price_per_sqft_max: 370.0,
            beds_min: 2,
            beds_max: 5,
            baths_min: 1.0,
            baths_max: 3.5,
            year_built_min: 1965,
            year_built_max: 2019,
            coordinate_jitter: 0.01,
        }
    }
}

/// Produces batches of comps for a subject
#[derive(Debug, Clone, Default)]
pub struct ListingGenerator {
    config: GeneratorConfig,
}

impl ListingGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate exactly `count` listings with ids `0..count`.
    ///
    /// Ids are only unique within the returned batch; a new subject location
    /// needs a fresh batch rather than an appended one.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        count: usize,
        subject: &SubjectProperty,
        rng: &mut R,
    ) -> Vec<Listing> {
        let listings: Vec<Listing> =
            (0..count).map(|i| self.generate_one(i as u32, subject, rng)).collect();
        tracing::debug!(count = listings.len(), address = %subject.address, "generated comp batch");
        listings
    }

    fn generate_one<R: Rng + ?Sized>(
        &self,
        index: u32,
        subject: &SubjectProperty,
        rng: &mut R,
    ) -> Listing {
        let cfg = &self.config;

        let sqft_noise = rng.gen_range(-cfg.sqft_jitter..=cfg.sqft_jitter);
        let sqft = (subject.sqft as f64 + sqft_noise).round().max(1.0) as u32;

        let price_per_sqft = rng.gen_range(cfg.price_per_sqft_min..=cfg.price_per_sqft_max);
        let price = (sqft as f64 * price_per_sqft).round() as u64;

        let beds = rng.gen_range(cfg.beds_min..=cfg.beds_max);
        let half_baths =
            rng.gen_range((cfg.baths_min * 2.0).round() as u32..=(cfg.baths_max * 2.0).round() as u32);
        let baths = half_baths as f64 / 2.0;
        let year_built = rng.gen_range(cfg.year_built_min..=cfg.year_built_max);

        let location = subject.location.offset(
            rng.gen_range(-cfg.coordinate_jitter..=cfg.coordinate_jitter),
            rng.gen_range(-cfg.coordinate_jitter..=cfg.coordinate_jitter),
        );

        Listing {
            id: ListingId(index),
            price,
            sqft,
            beds,
            baths,
            year_built,
            location,
            distance_from_subject: haversine_miles(subject.location, location),
            listing_date: None,
        }
    }
}

/// Generate `count` comps for `subject` with the default ranges
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    subject: &SubjectProperty,
    rng: &mut R,
) -> Vec<Listing> {
    ListingGenerator::default().generate(count, subject, rng)
}

/// Seeded generator when a seed is given, OS entropy otherwise
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn batch(seed: u64, count: usize) -> (SubjectProperty, Vec<Listing>) {
        let subject = SubjectProperty::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let listings = generate(count, &subject, &mut rng);
        (subject, listings)
    }

    #[test]
    fn test_exact_count_and_sequential_ids() {
        let (_, listings) = batch(1, 150);
        assert_eq!(listings.len(), 150);
        for (i, listing) in listings.iter().enumerate() {
            assert_eq!(listing.id, ListingId(i as u32));
        }
        let ids: HashSet<_> = listings.iter().map(|l| l.id).collect();
        assert_eq!(ids.len(), 150);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let (_, listings) = batch(1, 0);
        assert!(listings.is_empty());
    }

    #[test]
    fn test_fields_within_ranges() {
        let (subject, listings) = batch(7, 500);
        for l in &listings {
            assert!(l.sqft >= subject.sqft - 600 && l.sqft <= subject.sqft + 600);
            assert!(l.price > 0);
            assert!((2..=5).contains(&l.beds));
            assert!(l.baths >= 1.0 && l.baths <= 3.5);
            assert_eq!((l.baths * 2.0).fract(), 0.0);
            assert!((1965..=2019).contains(&l.year_built));
            assert!((l.location.lat - subject.location.lat).abs() <= 0.01 + 1e-12);
            assert!((l.location.lng - subject.location.lng).abs() <= 0.01 + 1e-12);
            assert!(l.distance_from_subject >= 0.0);
        }
    }

    #[test]
    fn test_price_per_sqft_within_band() {
        let (_, listings) = batch(11, 500);
        for l in &listings {
            let ppsf = l.price_per_sqft().unwrap();
            // Price rounding moves the ratio by at most 0.5 / sqft
            assert!(ppsf >= 330.0 - 1e-3 && ppsf <= 370.0 + 1e-3, "ppsf {} out of band", ppsf);
        }
    }

    #[test]
    fn test_distance_matches_coordinates() {
        let (subject, listings) = batch(3, 20);
        for l in &listings {
            let expected = haversine_miles(subject.location, l.location);
            assert_eq!(l.distance_from_subject, expected);
            assert!(l.distance_from_subject < 1.0);
        }
    }

    #[test]
    fn test_same_seed_same_batch() {
        let (_, a) = batch(42, 30);
        let (_, b) = batch(42, 30);
        assert_eq!(a, b);

        let (_, c) = batch(43, 30);
        assert_ne!(a, c);
    }

    #[test]
    fn test_small_subject_keeps_positive_area() {
        let subject = SubjectProperty::default().with_sqft(200);
        let mut rng = StdRng::seed_from_u64(5);
        let listings = generate(300, &subject, &mut rng);
        assert!(listings.iter().all(|l| l.sqft >= 1 && l.price > 0));
    }
}
