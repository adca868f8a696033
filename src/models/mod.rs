pub mod amenity;
pub mod listing;
pub mod params;
pub mod ranked;
pub mod review;

pub use amenity::{Amenity, AmenityIcon};
pub use listing::{Listing, ListingId, PLACEHOLDER_IMAGE};
pub use params::{RadiusFilter, SearchParameters};
pub use ranked::RankedListing;
pub use review::{Rating, RatingSummary, Review};

use serde::{Deserialize, Deserializer};

/// The listing service sends `null` for empty arrays
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
