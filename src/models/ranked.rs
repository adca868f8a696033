use crate::models::Listing;
use serde::{Deserialize, Serialize};

/// A listing placed in one search result set
///
/// `rank` is 1-based once the ranker has run; filters hand out 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedListing {
    #[serde(flatten)]
    pub listing: Listing,
    #[serde(
        rename = "distanceMeters",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub distance_meters: Option<f64>,
    pub rank: usize,
}

impl RankedListing {
    pub fn unranked(listing: Listing) -> Self {
        Self {
            listing,
            distance_meters: None,
            rank: 0,
        }
    }

    pub fn with_distance(listing: Listing, distance_meters: f64) -> Self {
        Self {
            listing,
            distance_meters: Some(distance_meters),
            rank: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.listing.id
    }
}
