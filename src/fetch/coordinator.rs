use crate::error::FetchError;
use crate::fetch::traits::{FetchQuery, ListingSource};
use crate::models::Listing;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Monotonic request counter; 0 means nothing has been issued
pub type Generation = u64;

/// A resolved fetch, tagged with the generation and query that issued it
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: Generation,
    pub query: FetchQuery,
    pub result: Result<Vec<Listing>, FetchError>,
}

/// Issues fetches and decides which results may still be applied
///
/// Only the latest generation is current. Issuing a new fetch also cancels the
/// previous one, but that is only to save work: a late result from an older
/// generation is rejected by [`FetchCoordinator::is_current`] either way.
pub struct FetchCoordinator {
    latest: Generation,
    in_flight: Option<CancellationToken>,
    outcomes: mpsc::UnboundedSender<FetchOutcome>,
}

impl FetchCoordinator {
    /// Create a coordinator and the receiving end its outcomes are sent to
    pub fn new() -> (Self, mpsc::UnboundedReceiver<FetchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let coordinator = Self {
            latest: 0,
            in_flight: None,
            outcomes: tx,
        };
        (coordinator, rx)
    }

    /// Spawn a fetch for `query` on the current tokio runtime
    pub fn issue(&mut self, source: Arc<dyn ListingSource>, query: FetchQuery) -> Generation {
        let generation = self.next_generation();
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        let outcomes = self.outcomes.clone();

        debug!(generation, source = source.source_name(), ?query, "Issuing fetch");

        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => Err(FetchError::Cancelled),
                result = source.fetch(&query) => result,
            };
            // The session may already be gone
            let _ = outcomes.send(FetchOutcome {
                generation,
                query,
                result,
            });
        });

        generation
    }

    /// Bump the generation without issuing anything
    ///
    /// Cancels work in flight; whatever it still delivers is stale.
    pub fn next_generation(&mut self) -> Generation {
        self.cancel_in_flight();
        self.latest += 1;
        self.latest
    }

    pub fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }

    pub fn latest(&self) -> Generation {
        self.latest
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation != 0 && generation == self.latest
    }
}
