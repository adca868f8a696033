use crate::error::GeoError;
use crate::geo::GeoPoint;
use crate::models::amenity::{self, Amenity};
use crate::models::review::{RatingSummary, Review};
use serde::{Deserialize, Serialize};

pub type ListingId = String;

/// Image shown on a card when a listing has no photos
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.pexels.com/photos/4907197/pexels-photo-4907197.jpeg?auto=compress&cs=tinysrgb&w=800";

/// Core lodging listing as delivered by the listing service
///
/// Coordinates are kept exactly as stored; use [`Listing::position`] to get a
/// validated point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "lat", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "long", default)]
    pub longitude: Option<f64>,
    pub price_min: u32,
    pub price_max: u32,
    #[serde(default, deserialize_with = "amenity::deserialize_tags")]
    pub amenities: Vec<Amenity>,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub reviews: Vec<Review>,
    /// Distance already computed by the radius RPC, if the listing came from it
    #[serde(
        rename = "dist_meters",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reported_distance: Option<f64>,
}

impl Listing {
    pub fn new(id: impl Into<String>, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            latitude: None,
            longitude: None,
            price_min: 0,
            price_max: 0,
            amenities: Vec::new(),
            images: Vec::new(),
            is_verified: false,
            reviews: Vec::new(),
            reported_distance: None,
        }
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Set the monthly price range; the bounds are swapped if given in reverse
    pub fn priced(mut self, min: u32, max: u32) -> Self {
        self.price_min = min.min(max);
        self.price_max = min.max(max);
        self
    }

    pub fn with_amenities<I, A>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Amenity>,
    {
        self.amenities = amenity::dedup(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self
    }

    pub fn verified(mut self) -> Self {
        self.is_verified = true;
        self
    }

    /// Validated position, or `InvalidCoordinate` when absent or out of range
    pub fn position(&self) -> Result<GeoPoint, GeoError> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon),
            (lat, lon) => Err(GeoError::InvalidCoordinate {
                latitude: lat.unwrap_or(f64::NAN),
                longitude: lon.unwrap_or(f64::NAN),
            }),
        }
    }

    pub fn is_locatable(&self) -> bool {
        self.position().is_ok()
    }

    pub fn rating_summary(&self) -> RatingSummary {
        RatingSummary::from_reviews(&self.reviews)
    }

    /// First `limit` amenities plus how many more are hidden
    pub fn amenity_preview(&self, limit: usize) -> (&[Amenity], usize) {
        let shown = limit.min(self.amenities.len());
        (&self.amenities[..shown], self.amenities.len() - shown)
    }

    pub fn cover_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}
