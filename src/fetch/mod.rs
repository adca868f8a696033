pub mod coordinator;
pub mod fixture;
pub mod http;
pub mod traits;

pub use coordinator::{FetchCoordinator, FetchOutcome, Generation};
pub use fixture::FixtureSource;
pub use http::HttpListingSource;
pub use traits::{FetchQuery, ListingSource};
