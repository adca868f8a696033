use crate::models::{Listing, RankedListing};

/// Anything with a name and an address the text filter can match against
pub trait Searchable {
    fn name(&self) -> &str;
    fn address(&self) -> &str;
}

impl Searchable for Listing {
    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> &str {
        &self.address
    }
}

impl Searchable for RankedListing {
    fn name(&self) -> &str {
        &self.listing.name
    }

    fn address(&self) -> &str {
        &self.listing.address
    }
}

/// Case-folded needle, or `None` when the query is blank
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive substring match on name or address
pub fn matches<T: Searchable>(item: &T, needle: &str) -> bool {
    item.name().to_lowercase().contains(needle) || item.address().to_lowercase().contains(needle)
}

/// Keep the items whose name or address contains `query`
///
/// A blank query returns the input untouched.
pub fn filter_text<T: Searchable>(items: Vec<T>, query: &str) -> Vec<T> {
    match normalize_query(query) {
        None => items,
        Some(needle) => items
            .into_iter()
            .filter(|item| matches(item, &needle))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listings() -> Vec<Listing> {
        vec![
            Listing::new("1", "Blue Hostel", "CG Road, Navrangpura"),
            Listing::new("2", "Sunrise PG", "Near Gujarat University"),
            Listing::new("3", "Green Nest", "Blue Lagoon Society, Bodakdev"),
        ]
    }

    #[test]
    fn empty_query_is_identity() {
        assert_eq!(filter_text(listings(), ""), listings());
        assert_eq!(filter_text(listings(), "   \t"), listings());
    }

    #[test]
    fn matches_name_or_address_case_insensitively() {
        let ids: Vec<_> = filter_text(listings(), "BLUE")
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(filter_text(listings(), "  university ").len(), 1);
    }

    #[test]
    fn no_fuzzy_matching() {
        assert!(filter_text(listings(), "hostle").is_empty());
        assert!(filter_text(listings(), "blue pg").is_empty());
    }

    #[test]
    fn works_on_ranked_listings() {
        let ranked: Vec<_> = listings().into_iter().map(RankedListing::unranked).collect();
        assert_eq!(filter_text(ranked, "nest")[0].id(), "3");
    }
}
