pub mod date_range;
pub mod filters;
pub mod geometry;
pub mod listing;
pub mod presets;
pub mod subject;

pub use date_range::DateRange;
pub use filters::{parse_bound, FilterField, Filters};
pub use geometry::{Coordinates, DistanceUnit};
pub use listing::{Listing, ListingId};
pub use presets::{all_presets, FilterPreset, PresetId};
pub use subject::SubjectProperty;
