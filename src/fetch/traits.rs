use crate::error::FetchError;
use crate::models::{Listing, RadiusFilter};
use async_trait::async_trait;

/// What to ask the listing service for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FetchQuery {
    /// Every visible listing; radius filtering happens locally
    All,
    /// Only listings inside the radius, pre-annotated with distance
    Within(RadiusFilter),
}

/// Common trait for all listing sources
/// Lets the session run against the HTTP service or an in-memory fixture
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Retrieve raw listing records
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<Listing>, FetchError>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;

    /// Whether `FetchQuery::Within` is answered server-side
    fn supports_radius(&self) -> bool {
        false
    }
}
