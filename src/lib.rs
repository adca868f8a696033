//! Proximity search over lodging listings.
//!
//! Raw listings come in through a [`fetch::ListingSource`], a
//! [`search::SearchSession`] runs the radius filter, text filter and ranker
//! over them, and [`view::ViewSync`] turns the published result set into a
//! list and a set of map markers.

pub mod config;
pub mod error;
pub mod fetch;
pub mod geo;
pub mod models;
pub mod search;
pub mod view;

pub use config::{AppConfig, GeoStrategy};
pub use error::{FetchError, FetchErrorKind, GeoError};
pub use fetch::{FixtureSource, HttpListingSource, ListingSource};
pub use geo::GeoPoint;
pub use models::{Listing, RankedListing, SearchParameters};
pub use search::{ResultSet, SearchSession, SessionState, SessionStatus};
pub use view::{Focus, MapMarker, ViewSync};

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber; `RUST_LOG` overrides `default_level`
///
/// A second call leaves the first subscriber in place.
pub fn init_logging(default_level: tracing::Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(default_level.into()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
