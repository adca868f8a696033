use crate::error::FetchError;
use crate::fetch::traits::{FetchQuery, ListingSource};
use crate::geo::filter_within;
use crate::models::{Listing, Rating, Review};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tracing::info;

/// In-memory listing source
///
/// Answers `FetchQuery::Within` like the radius RPC when `radius_support` is
/// on, and with the full set otherwise.
pub struct FixtureSource {
    listings: Vec<Listing>,
    radius_support: bool,
}

impl FixtureSource {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            radius_support: false,
        }
    }

    /// Filter radius queries before returning, like the server does
    pub fn with_radius_support(mut self) -> Self {
        self.radius_support = true;
        self
    }

    /// Sample hostels around central Ahmedabad
    pub fn ahmedabad() -> Self {
        info!("📋 Loading sample Ahmedabad listings");
        Self::new(sample_ahmedabad_listings())
    }
}

#[async_trait]
impl ListingSource for FixtureSource {
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<Listing>, FetchError> {
        match query {
            FetchQuery::Within(filter) if self.radius_support => Ok(filter_within(
                &self.listings,
                filter,
            )
            .into_iter()
            .map(|ranked| Listing {
                reported_distance: ranked.distance_meters,
                ..ranked.listing
            })
            .collect()),
            _ => Ok(self.listings.clone()),
        }
    }

    fn source_name(&self) -> &'static str {
        "fixture"
    }

    fn supports_radius(&self) -> bool {
        self.radius_support
    }
}

fn review(id: &str, rating: u8, comment: &str, day: u32, author: &str) -> Review {
    Review {
        id: id.to_string(),
        rating: Rating::clamped(rating),
        comment: comment.to_string(),
        created_at: Utc
            .with_ymd_and_hms(2024, 6, day, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now),
        author: author.to_string(),
    }
}

/// Listings modelled on typical student hostels and PGs in Ahmedabad
pub fn sample_ahmedabad_listings() -> Vec<Listing> {
    vec![
        Listing::new("ahm-001", "Blue Hostel", "CG Road, Navrangpura, Ahmedabad")
            .at(23.0300, 72.5600)
            .priced(5000, 7500)
            .with_amenities(["WiFi", "AC", "Laundry", "Security"])
            .with_images(vec!["https://images.pexels.com/photos/271618/pexels-photo-271618.jpeg".to_string()])
            .with_reviews(vec![
                review("rev-001", 5, "Clean rooms and fast WiFi", 3, "user-11"),
                review("rev-002", 4, "Good food, strict curfew", 9, "user-12"),
            ])
            .verified(),
        Listing::new("ahm-002", "Blue PG", "Paldi, Ahmedabad")
            .at(23.0120, 72.5650)
            .priced(4000, 5500)
            .with_amenities(["WiFi", "Meals"])
            .with_reviews(vec![review("rev-003", 3, "Okay for the price", 12, "user-13")]),
        Listing::new("ahm-003", "Sunrise Girls PG", "Near Gujarat University, Ahmedabad")
            .at(23.0370, 72.5470)
            .priced(6000, 8000)
            .with_amenities(["WiFi", "AC", "Meals", "Security", "Gym"])
            .verified(),
        Listing::new("ahm-004", "Riverfront Stay", "Ellis Bridge, Ahmedabad")
            .at(23.0240, 72.5720)
            .priced(7000, 9000)
            .with_amenities(["AC", "Laundry", "Rooftop"]),
        Listing::new("ahm-005", "Green Nest Hostel", "Bodakdev, Ahmedabad")
            .at(23.0390, 72.5120)
            .priced(6500, 8500)
            .with_amenities(["WiFi", "Gym"])
            .verified(),
        // Geocoding failed upstream for this one
        Listing::new("ahm-006", "Old City Rooms", "Manek Chowk, Ahmedabad")
            .priced(3000, 4000),
    ]
}
