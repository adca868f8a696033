use crate::error::GeoError;
use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// Center point and radius of a proximity search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusFilter {
    center: GeoPoint,
    radius_m: f64,
}

impl RadiusFilter {
    pub fn new(center: GeoPoint, radius_m: f64) -> Result<Self, GeoError> {
        if radius_m.is_finite() && radius_m >= 0.0 {
            Ok(Self { center, radius_m })
        } else {
            Err(GeoError::InvalidRadius(radius_m))
        }
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    /// Radius in meters
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }
}

/// Snapshot of the user's search input
///
/// Each edit builds a new value; a session never mutates the one it is using.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParameters {
    /// Radius filter, `None` when searching without a location
    pub geo: Option<RadiusFilter>,
    /// Free-text query matched against name and address
    pub query: String,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            geo: None,
            query: String::new(),
        }
    }
}

impl SearchParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn within(mut self, center: GeoPoint, radius_m: f64) -> Result<Self, GeoError> {
        self.geo = Some(RadiusFilter::new(center, radius_m)?);
        Ok(self)
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn without_geo(mut self) -> Self {
        self.geo = None;
        self
    }
}
