use crate::config::GeoStrategy;
use crate::error::FetchErrorKind;
use crate::fetch::{FetchCoordinator, FetchOutcome, FetchQuery, Generation, ListingSource};
use crate::models::{RadiusFilter, RankedListing, SearchParameters};
use crate::search::run_pipeline;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// One published, immutable result set
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultSet {
    /// Generation of the fetch this set was computed from; 0 before the first
    pub generation: Generation,
    pub params: Option<SearchParameters>,
    pub listings: Vec<RankedListing>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn summary(&self) -> String {
        match self.listings.len() {
            1 => "1 hostel found".to_string(),
            n => format!("{n} hostels found"),
        }
    }
}

/// Lifecycle of a search session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No parameters yet, or torn down
    Idle,
    /// A fetch for `generation` is in flight
    Loading { generation: Generation },
    /// The published result set is current
    Ready,
    /// The latest fetch failed; the previous result set is still published
    Failed { kind: FetchErrorKind },
}

/// What the user should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Loading,
    Results(usize),
    /// Valid search, zero matches: refine rather than retry
    NoMatches,
    /// Retry; `showing` listings from the last good result stay on screen
    Failed { kind: FetchErrorKind, showing: usize },
}

/// Effect of applying one fetch outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated { matches: usize },
    Failed(FetchErrorKind),
    /// A newer request was issued since; nothing changed
    Stale,
}

/// Owns the search parameters and the result set derived from them
///
/// Create one when the search view opens and call [`SearchSession::teardown`]
/// when it closes. Fetches are spawned on the ambient tokio runtime; filtering
/// and ranking run synchronously when an outcome is applied.
pub struct SearchSession {
    source: Arc<dyn ListingSource>,
    strategy: GeoStrategy,
    coordinator: FetchCoordinator,
    outcomes: mpsc::UnboundedReceiver<FetchOutcome>,
    params: Option<SearchParameters>,
    state: SessionState,
    results: Arc<ResultSet>,
}

impl SearchSession {
    pub fn new(source: Arc<dyn ListingSource>, strategy: GeoStrategy) -> Self {
        let (coordinator, outcomes) = FetchCoordinator::new();
        Self {
            source,
            strategy,
            coordinator,
            outcomes,
            params: None,
            state: SessionState::Idle,
            results: Arc::new(ResultSet::default()),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn params(&self) -> Option<&SearchParameters> {
        self.params.as_ref()
    }

    /// Latest published snapshot
    pub fn results(&self) -> Arc<ResultSet> {
        Arc::clone(&self.results)
    }

    pub fn status(&self) -> SessionStatus {
        match &self.state {
            SessionState::Idle => SessionStatus::Idle,
            SessionState::Loading { .. } => SessionStatus::Loading,
            SessionState::Ready if self.results.is_empty() => SessionStatus::NoMatches,
            SessionState::Ready => SessionStatus::Results(self.results.len()),
            SessionState::Failed { kind } => SessionStatus::Failed {
                kind: *kind,
                showing: self.results.len(),
            },
        }
    }

    /// Replace the parameters and start a fetch for them
    pub fn search(&mut self, params: SearchParameters) -> Generation {
        self.drain_outcomes();
        let query = self.fetch_query(&params);
        self.params = Some(params);
        let generation = self.coordinator.issue(Arc::clone(&self.source), query);
        self.state = SessionState::Loading { generation };
        info!(generation, ?query, "Search started");
        generation
    }

    /// Change only the text query
    pub fn set_query(&mut self, query: impl Into<String>) -> Generation {
        let params = self.params.clone().unwrap_or_default().with_query(query);
        self.search(params)
    }

    /// Change only the radius filter; `None` searches everywhere
    pub fn set_area(&mut self, area: Option<RadiusFilter>) -> Generation {
        let mut params = self.params.clone().unwrap_or_default();
        params.geo = area;
        self.search(params)
    }

    /// Reissue the current parameters as a new generation
    pub fn retry(&mut self) -> Option<Generation> {
        let params = self.params.clone()?;
        Some(self.search(params))
    }

    /// Cancel pending work and forget parameters and results
    pub fn teardown(&mut self) {
        let retired = self.coordinator.next_generation();
        debug!(retired, "Session torn down");
        self.params = None;
        self.state = SessionState::Idle;
        self.results = Arc::new(ResultSet::default());
    }

    /// Apply a fetch outcome if it belongs to the latest generation
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        let generation = outcome.generation;
        if !self.coordinator.is_current(generation) {
            debug!(
                generation,
                latest = self.coordinator.latest(),
                "Discarding stale response"
            );
            return Applied::Stale;
        }
        let Some(params) = self.params.clone() else {
            return Applied::Stale;
        };

        match outcome.result {
            Ok(mut listings) => {
                // Only the radius RPC for this exact filter may annotate distances
                let annotated_for_filter = matches!(
                    outcome.query,
                    FetchQuery::Within(filter) if Some(filter) == params.geo
                );
                if !annotated_for_filter {
                    for listing in &mut listings {
                        listing.reported_distance = None;
                    }
                }
                let ranked = run_pipeline(&listings, &params);
                let matches = ranked.len();
                info!(generation, fetched = listings.len(), matches, "Results ready");
                self.results = Arc::new(ResultSet {
                    generation,
                    params: Some(params),
                    listings: ranked,
                });
                self.state = SessionState::Ready;
                Applied::Updated { matches }
            }
            Err(e) => {
                let kind = e.kind();
                warn!(
                    generation,
                    error = %e,
                    kept = self.results.len(),
                    "Fetch failed; keeping last results"
                );
                self.state = SessionState::Failed { kind };
                Applied::Failed(kind)
            }
        }
    }

    /// Number of outcomes received but not yet applied
    pub fn pending_outcomes(&self) -> usize {
        self.outcomes.len()
    }

    /// Apply whatever has already arrived without waiting
    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcomes.try_recv() {
            self.apply(outcome);
        }
    }

    /// Wait for the next fetch outcome and apply it
    pub async fn next_applied(&mut self) -> Option<Applied> {
        let outcome = self.outcomes.recv().await?;
        Some(self.apply(outcome))
    }

    /// Apply outcomes until the session is no longer loading
    pub async fn settle(&mut self) -> &SessionState {
        while matches!(self.state, SessionState::Loading { .. }) {
            match self.outcomes.recv().await {
                Some(outcome) => {
                    self.apply(outcome);
                }
                None => break,
            }
        }
        &self.state
    }

    fn fetch_query(&self, params: &SearchParameters) -> FetchQuery {
        match (self.strategy, params.geo) {
            (GeoStrategy::ServerRadius, Some(filter)) if self.source.supports_radius() => {
                FetchQuery::Within(filter)
            }
            _ => FetchQuery::All,
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.coordinator.cancel_in_flight();
    }
}
