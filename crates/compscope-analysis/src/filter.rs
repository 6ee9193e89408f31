//! Listing predicate evaluation.

use compscope_core::models::{DateRange, Filters, Listing};

/// Evaluate a listing against a date range and filter set.
///
/// The date window is checked first, then each bound in turn; an unset bound
/// never excludes. All bounds are inclusive.
pub fn matches(listing: &Listing, filters: &Filters, date_range: &DateRange) -> bool {
    if !date_range.contains(listing.effective_date()) {
        return false;
    }

    let price = listing.price as f64;
    let sqft = listing.sqft as f64;
    let beds = listing.beds as f64;
    let year_built = listing.year_built as f64;

    at_least(price, filters.price_min)
        && at_most(price, filters.price_max)
        && at_least(sqft, filters.sqft_min)
        && at_most(sqft, filters.sqft_max)
        && at_least(beds, filters.min_beds)
        && at_least(listing.baths, filters.min_baths)
        && at_least(year_built, filters.year_built_min)
        && at_most(year_built, filters.year_built_max)
        && at_most(listing.distance_from_subject, filters.max_distance)
}

/// Listings that pass [`matches`], in their original order
pub fn filter_all(listings: &[Listing], filters: &Filters, date_range: &DateRange) -> Vec<Listing> {
    listings.iter().filter(|l| matches(l, filters, date_range)).cloned().collect()
}

// Non-finite bounds count as unset, however the filter set was built
fn at_least(value: f64, bound: Option<f64>) -> bool {
    bound.filter(|min| min.is_finite()).map_or(true, |min| value >= min)
}

fn at_most(value: f64, bound: Option<f64>) -> bool {
    bound.filter(|max| max.is_finite()).map_or(true, |max| value <= max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compscope_core::models::{Coordinates, FilterField, ListingId};
    use proptest::prelude::*;

    fn listing(id: u32, price: u64, sqft: u32, year_built: i32) -> Listing {
        Listing {
            id: ListingId(id),
            price,
            sqft,
            beds: 3,
            baths: 2.0,
            year_built,
            location: Coordinates::new(48.75, -122.48),
            distance_from_subject: 0.5,
            listing_date: None,
        }
    }

    fn all_years() -> DateRange {
        DateRange::new(1900, 2100).unwrap()
    }

    #[test]
    fn test_unset_filters_match_everything() {
        let l = listing(0, 500_000, 1500, 2000);
        assert!(matches(&l, &Filters::new(), &all_years()));
    }

    #[test]
    fn test_non_finite_bounds_never_exclude() {
        let listings = vec![listing(0, 300_000, 1200, 1980), listing(1, 650_000, 2400, 2015)];
        let raw = Filters {
            price_min: Some(f64::NAN),
            sqft_max: Some(f64::NEG_INFINITY),
            year_built_min: Some(f64::INFINITY),
            max_distance: Some(f64::NAN),
            ..Filters::new()
        };

        assert_eq!(filter_all(&listings, &raw, &all_years()), listings);
        assert!(listings.iter().all(|l| matches(l, &raw, &DateRange::default())));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let l = listing(0, 300_000, 1500, 1990);
        let exact = Filters::new()
            .price(Some(300_000.0), Some(300_000.0))
            .sqft(Some(1500.0), Some(1500.0))
            .year_built(Some(1990.0), Some(1990.0))
            .min_beds(3.0)
            .min_baths(2.0)
            .max_distance(0.5);
        assert!(matches(&l, &exact, &all_years()));

        assert!(!matches(&l, &Filters::new().price(None, Some(299_999.0)), &all_years()));
        assert!(!matches(&l, &Filters::new().min_beds(4.0), &all_years()));
        assert!(!matches(&l, &Filters::new().min_baths(2.5), &all_years()));
        assert!(!matches(&l, &Filters::new().max_distance(0.49), &all_years()));
        assert!(!matches(&l, &Filters::new().year_built(Some(1991.0), None), &all_years()));
    }

    #[test]
    fn test_date_range_uses_listing_date_then_year_built() {
        let mut l = listing(0, 400_000, 1600, 1998);
        let recent = DateRange::new(2020, 2024).unwrap();
        assert!(!matches(&l, &Filters::new(), &recent));

        l.listing_date = Some(2022);
        assert!(matches(&l, &Filters::new(), &recent));

        let edge = DateRange::new(2022, 2022).unwrap();
        assert!(matches(&l, &Filters::new(), &edge));
    }

    #[test]
    fn test_inverted_bounds_match_nothing() {
        let listings: Vec<_> = (0..10).map(|i| listing(i, 250_000 + i as u64 * 50_000, 1500, 2000)).collect();
        let inverted = Filters::new().price(Some(600_000.0), Some(300_000.0));
        assert!(filter_all(&listings, &inverted, &all_years()).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_all(&[], &Filters::new().min_beds(2.0), &all_years()).is_empty());
    }

    #[test]
    fn test_filter_all_preserves_order() {
        let listings: Vec<_> = (0..6).map(|i| listing(i, 100_000 * (i as u64 + 1), 1500, 2000)).collect();
        let out = filter_all(&listings, &Filters::new().with(FilterField::PriceMin, Some(250_000.0)), &all_years());
        let ids: Vec<u32> = out.iter().map(|l| l.id.0).collect();
        assert_eq!(ids, vec![2, 3, 4, 5]);
    }

    fn arb_listing() -> impl Strategy<Value = Listing> {
        (0u32..1000, 100_000u64..900_000, 800u32..3000, 1965i32..2020, 2u32..6, 2u32..8, 0.0f64..1.0)
            .prop_map(|(id, price, sqft, year, beds, half_baths, distance)| Listing {
                id: ListingId(id),
                price,
                sqft,
                beds,
                baths: half_baths as f64 / 2.0,
                year_built: year,
                location: Coordinates::new(48.75, -122.48),
                distance_from_subject: distance,
                listing_date: None,
            })
    }

    fn arb_filters() -> impl Strategy<Value = Filters> {
        (
            prop::option::of(100_000.0f64..900_000.0),
            prop::option::of(100_000.0f64..900_000.0),
            prop::option::of(800.0f64..3000.0),
            prop::option::of(2.0f64..6.0),
            prop::option::of(1965.0f64..2020.0),
            prop::option::of(0.0f64..1.0),
        )
            .prop_map(|(pmin, pmax, smin, beds, ymax, dist)| Filters {
                price_min: pmin,
                price_max: pmax,
                sqft_min: smin,
                min_beds: beds,
                year_built_max: ymax,
                max_distance: dist,
                ..Filters::new()
            })
    }

    proptest! {
        #[test]
        fn prop_filter_all_is_idempotent(
            listings in prop::collection::vec(arb_listing(), 0..60),
            filters in arb_filters(),
            start in 1960i32..2000,
        ) {
            let range = DateRange::new(start, 2024).unwrap();
            let once = filter_all(&listings, &filters, &range);
            let twice = filter_all(&once, &filters, &range);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_unset_filters_keep_everything(listings in prop::collection::vec(arb_listing(), 0..60)) {
            let range = DateRange::new(1965, 2024).unwrap();
            let out = filter_all(&listings, &Filters::new(), &range);
            prop_assert_eq!(out, listings);
        }

        #[test]
        fn prop_result_is_ordered_subsequence(
            listings in prop::collection::vec(arb_listing(), 0..60),
            filters in arb_filters(),
        ) {
            let out = filter_all(&listings, &filters, &DateRange::default());
            let mut remaining = listings.iter();
            for kept in &out {
                prop_assert!(remaining.any(|l| l == kept));
            }
        }
    }
}
