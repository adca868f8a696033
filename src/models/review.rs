use crate::error::ReviewError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Star rating, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Pull an arbitrary score into range
    pub fn clamped(value: u8) -> Self {
        Rating(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ReviewError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(ReviewError::RatingOutOfRange(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A resident's review of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub rating: Rating,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "user_id", alias = "author")]
    pub author: String,
}

/// Aggregate rating over a listing's reviews
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingSummary {
    NoRatingYet,
    Average { mean: f64, count: usize },
}

impl RatingSummary {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return RatingSummary::NoRatingYet;
        }
        let total: u32 = reviews.iter().map(|r| u32::from(r.rating.value())).sum();
        RatingSummary::Average {
            mean: f64::from(total) / reviews.len() as f64,
            count: reviews.len(),
        }
    }

    pub fn mean(&self) -> Option<f64> {
        match self {
            RatingSummary::NoRatingYet => None,
            RatingSummary::Average { mean, .. } => Some(*mean),
        }
    }
}

impl fmt::Display for RatingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingSummary::NoRatingYet => f.write_str("New"),
            RatingSummary::Average { mean, .. } => write!(f, "{:.1}", mean),
        }
    }
}
