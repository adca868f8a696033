use crate::models::RankedListing;
use std::cmp::Ordering;

/// Result ordering: distance, then minimum price, then name ignoring case
///
/// Listings without a distance sort after every listing that has one.
pub fn compare(a: &RankedListing, b: &RankedListing) -> Ordering {
    compare_distance(a.distance_meters, b.distance_meters)
        .then(a.listing.price_min.cmp(&b.listing.price_min))
        .then_with(|| compare_names(&a.listing.name, &b.listing.name))
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Sort into result order and number the ranks from 1
///
/// The sort is stable, so listings equal on every key keep their input order.
pub fn rank(mut items: Vec<RankedListing>) -> Vec<RankedListing> {
    items.sort_by(compare);
    for (position, item) in items.iter_mut().enumerate() {
        item.rank = position + 1;
    }
    items
}
