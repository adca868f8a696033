use crate::geo::distance::haversine_meters;
use crate::models::{Listing, RadiusFilter, RankedListing};
use tracing::{debug, warn};

/// Keep the listings within `filter`'s radius, annotated with their distance
///
/// The boundary is inclusive. Listings without a valid position are dropped
/// and logged; they never fail the search. A `reported_distance` is used as
/// is, otherwise the distance is computed here; callers must clear it unless
/// the listing came from the radius RPC for this same filter. Output order is
/// unspecified.
pub fn filter_within(listings: &[Listing], filter: &RadiusFilter) -> Vec<RankedListing> {
    let center = filter.center();
    let mut retained = Vec::new();
    let mut unlocatable = 0usize;

    for listing in listings {
        let position = match listing.position() {
            Ok(position) => position,
            Err(e) => {
                unlocatable += 1;
                warn!(listing_id = %listing.id, error = %e, "Excluding unlocatable listing");
                continue;
            }
        };

        let distance = listing
            .reported_distance
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or_else(|| haversine_meters(position, center));

        if distance <= filter.radius_m() {
            retained.push(RankedListing::with_distance(listing.clone(), distance));
        }
    }

    debug!(
        total = listings.len(),
        retained = retained.len(),
        unlocatable,
        radius_m = filter.radius_m(),
        "Applied radius filter"
    );

    retained
}
