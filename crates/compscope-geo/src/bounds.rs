//! Map extents for a subject and its comps.

use compscope_core::models::{Coordinates, Listing, SubjectProperty};
use geo::algorithm::bounding_rect::BoundingRect;
use geo::algorithm::centroid::Centroid;
use geo::{MultiPoint, Point};
use serde::{Deserialize, Serialize};

/// Axis-aligned extent in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl MapBounds {
    pub fn contains(&self, coords: &Coordinates) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&coords.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&coords.lng)
    }
}

fn to_point(coords: &Coordinates) -> Point {
    Point::new(coords.lng, coords.lat)
}

fn collect_points(subject: &SubjectProperty, listings: &[Listing]) -> MultiPoint {
    std::iter::once(to_point(&subject.location))
        .chain(listings.iter().map(|l| to_point(&l.location)))
        .collect::<Vec<_>>()
        .into()
}

/// Smallest extent containing the subject and every listing
pub fn comp_bounds(subject: &SubjectProperty, listings: &[Listing]) -> Option<MapBounds> {
    let rect = collect_points(subject, listings).bounding_rect()?;
    Some(MapBounds {
        south_west: Coordinates::new(rect.min().y, rect.min().x),
        north_east: Coordinates::new(rect.max().y, rect.max().x),
    })
}

/// Mean position of the subject and its listings, for centering a map
pub fn comp_centroid(subject: &SubjectProperty, listings: &[Listing]) -> Option<Coordinates> {
    let centroid = collect_points(subject, listings).centroid()?;
    Some(Coordinates::new(centroid.y(), centroid.x()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use compscope_core::models::ListingId;

    fn listing_at(id: u32, lat: f64, lng: f64) -> Listing {
        Listing {
            id: ListingId(id),
            price: 500_000,
            sqft: 1500,
            beds: 3,
            baths: 2.0,
            year_built: 2000,
            location: Coordinates::new(lat, lng),
            distance_from_subject: 0.0,
            listing_date: None,
        }
    }

    #[test]
    fn test_subject_only_bounds_are_a_point() {
        let subject = SubjectProperty::default();
        let bounds = comp_bounds(&subject, &[]).unwrap();
        assert_eq!(bounds.south_west, subject.location);
        assert_eq!(bounds.north_east, subject.location);
    }

    #[test]
    fn test_bounds_cover_all_listings() {
        let subject = SubjectProperty::default();
        let listings = vec![listing_at(0, 48.74, -122.49), listing_at(1, 48.76, -122.47)];

        let bounds = comp_bounds(&subject, &listings).unwrap();
        assert_eq!(bounds.south_west, Coordinates::new(48.74, -122.49));
        assert_eq!(bounds.north_east, Coordinates::new(48.76, -122.47));
        assert!(listings.iter().all(|l| bounds.contains(&l.location)));
    }

    #[test]
    fn test_centroid_of_symmetric_comps_is_subject() {
        let subject = SubjectProperty::default();
        let listings = vec![listing_at(0, 48.74, -122.49), listing_at(1, 48.76, -122.47)];

        let center = comp_centroid(&subject, &listings).unwrap();
        assert!((center.lat - 48.75).abs() < 1e-9);
        assert!((center.lng + 122.48).abs() < 1e-9);
    }
}
