//! End-to-end search flows through the public API
//!
//! Each test drives a `SearchSession` over an in-memory `FixtureSource` and
//! reads results back through `ViewSync`, the way the binary does.

use hostel_scout::fetch::{FetchOutcome, FetchQuery};
use hostel_scout::geo::{haversine_meters, EARTH_RADIUS_M};
use hostel_scout::search::Applied;
use hostel_scout::{
    init_logging, FixtureSource, GeoPoint, GeoStrategy, Listing, SearchParameters, SearchSession,
    SessionState, SessionStatus, ViewSync,
};
use std::sync::Arc;

const LAT: f64 = 23.0225;
const LON: f64 = 72.5714;

fn setup() {
    init_logging(tracing::Level::WARN);
}

fn center() -> GeoPoint {
    GeoPoint::new(LAT, LON).unwrap()
}

/// Listing due north of the center at `meters`
fn north(id: &str, name: &str, meters: f64) -> Listing {
    let d_lat = (meters / EARTH_RADIUS_M).to_degrees();
    Listing::new(id, name, "Ahmedabad").at(LAT + d_lat, LON).priced(5000, 6000)
}

fn session_over(listings: Vec<Listing>) -> SearchSession {
    SearchSession::new(Arc::new(FixtureSource::new(listings)), GeoStrategy::ClientSide)
}

fn names(view: &ViewSync) -> Vec<&str> {
    view.list().iter().map(|r| r.listing.name.as_str()).collect()
}

#[tokio::test]
async fn radius_keeps_nearby_listings_in_distance_order() {
    setup();
    let mut session = session_over(vec![
        north("1", "Five Hundred", 500.0),
        north("2", "Twelve Hundred", 1200.0),
        north("3", "Eight Hundred", 800.0),
    ]);

    session.search(SearchParameters::new().within(center(), 1000.0).unwrap());
    assert_eq!(session.settle().await, &SessionState::Ready);

    let mut view = ViewSync::new(center());
    view.publish(session.results());
    assert_eq!(names(&view), vec!["Five Hundred", "Eight Hundred"]);

    let distances: Vec<f64> = view.list().iter().map(|r| r.distance_meters.unwrap()).collect();
    assert!((distances[0] - 500.0).abs() < 0.01);
    assert!((distances[1] - 800.0).abs() < 0.01);
    assert_eq!(view.list()[0].rank, 1);
    assert_eq!(view.list()[1].rank, 2);
}

#[tokio::test]
async fn text_query_without_location_orders_by_price() {
    setup();
    let mut session = session_over(vec![
        Listing::new("h", "Blue Hostel", "Navrangpura").priced(5000, 7000),
        Listing::new("p", "Blue PG", "Paldi").priced(4000, 5000),
        Listing::new("g", "Green Nest", "Bodakdev").priced(3000, 4000),
    ]);

    session.search(SearchParameters::new().with_query("blue"));
    session.settle().await;

    let mut view = ViewSync::new(center());
    view.publish(session.results());
    assert_eq!(names(&view), vec!["Blue PG", "Blue Hostel"]);
    assert!(view.list().iter().all(|r| r.distance_meters.is_none()));
}

#[tokio::test]
async fn invalid_coordinates_are_dropped_without_error() {
    setup();
    let mut session = session_over(vec![
        north("ok-1", "Near", 200.0),
        Listing::new("bad", "Broken Pin", "Ahmedabad").at(200.0, LON).priced(1000, 2000),
        north("ok-2", "Nearer", 100.0),
    ]);

    session.search(SearchParameters::new().within(center(), 1000.0).unwrap());
    assert_eq!(session.settle().await, &SessionState::Ready);

    let results = session.results();
    let ids: Vec<&str> = results.listings.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["ok-2", "ok-1"]);
}

#[tokio::test]
async fn nothing_in_radius_is_an_explicit_empty_result() {
    setup();
    let mut session = session_over(vec![north("far", "Far Away", 4000.0)]);

    session.search(SearchParameters::new().within(center(), 1000.0).unwrap());
    assert_eq!(session.settle().await, &SessionState::Ready);
    assert_eq!(session.status(), SessionStatus::NoMatches);
    assert!(session.results().is_empty());
}

#[tokio::test]
async fn client_side_radius_ignores_distance_in_payload() {
    setup();
    let mut far = north("far", "Far But Claims Near", 3000.0);
    far.reported_distance = Some(100.0);
    let mut session = session_over(vec![far, north("near", "Near", 300.0)]);

    session.search(SearchParameters::new().within(center(), 1000.0).unwrap());
    assert_eq!(session.settle().await, &SessionState::Ready);

    let mut view = ViewSync::new(center());
    view.publish(session.results());
    assert_eq!(names(&view), vec!["Near"]);
    assert_eq!(view.markers().len(), 1);
}

#[tokio::test]
async fn late_response_from_older_generation_is_ignored() {
    setup();
    let mut session = session_over(vec![north("a", "Alpha", 100.0)]);

    let older = session.search(SearchParameters::new().with_query("zzz"));
    let newer = session.search(SearchParameters::new());
    session.settle().await;
    assert_eq!(session.results().generation, newer);

    let applied = session.apply(FetchOutcome {
        generation: older,
        query: FetchQuery::All,
        result: Ok(vec![north("b", "Beta", 50.0)]),
    });
    assert_eq!(applied, Applied::Stale);
    assert_eq!(session.results().generation, newer);
    assert_eq!(session.results().listings[0].id(), "a");
}

#[tokio::test]
async fn retained_listings_respect_radius_on_sample_data() {
    setup();
    let mut session = SearchSession::new(Arc::new(FixtureSource::ahmedabad()), GeoStrategy::ClientSide);
    session.search(SearchParameters::new().within(center(), 2500.0).unwrap());
    session.settle().await;

    let results = session.results();
    assert!(!results.is_empty());
    for ranked in &results.listings {
        let d = haversine_meters(ranked.listing.position().unwrap(), center());
        assert!(d <= 2500.0);
    }

    let mut view = ViewSync::new(center());
    view.publish(results.clone());
    assert_eq!(view.markers().len(), view.list().len());
}
