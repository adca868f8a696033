pub mod rank;
pub mod session;
pub mod text;

pub use rank::rank;
pub use session::{Applied, ResultSet, SearchSession, SessionState, SessionStatus};
pub use text::{filter_text, Searchable};

use crate::geo::filter_within;
use crate::models::{Listing, RankedListing, SearchParameters};

/// Radius filter, then text filter, then ranking
///
/// Without a radius filter every listing passes through without a distance.
pub fn run_pipeline(listings: &[Listing], params: &SearchParameters) -> Vec<RankedListing> {
    let candidates = match &params.geo {
        Some(filter) => filter_within(listings, filter),
        None => listings.iter().cloned().map(RankedListing::unranked).collect(),
    };
    rank(filter_text(candidates, &params.query))
}
