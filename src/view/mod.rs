use crate::geo::GeoPoint;
use crate::models::RankedListing;
use crate::search::ResultSet;
use serde::Serialize;
use std::sync::Arc;

/// Viewports narrower than this show one panel at a time
pub const NARROW_VIEWPORT_PX: u32 = 768;

/// Initial map zoom level
pub const DEFAULT_ZOOM: u8 = 12;

/// Which projection is emphasized on a narrow viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    List,
    Map,
}

/// Marker placement for one locatable listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rank: usize,
}

/// Which panels are on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub list: bool,
    pub map: bool,
}

/// List and map projections of one published result set
///
/// Both projections come from the same snapshot, so the marker ids are always
/// the list ids minus the unlocatable listings. Focus, viewport and hover
/// changes never touch the snapshot.
#[derive(Debug)]
pub struct ViewSync {
    snapshot: Arc<ResultSet>,
    markers: Vec<MapMarker>,
    focus: Focus,
    viewport_width: Option<u32>,
    hovered: Option<String>,
    default_center: GeoPoint,
}

impl ViewSync {
    pub fn new(default_center: GeoPoint) -> Self {
        Self {
            snapshot: Arc::new(ResultSet::default()),
            markers: Vec::new(),
            focus: Focus::default(),
            viewport_width: None,
            hovered: None,
            default_center,
        }
    }

    /// Show a new result set in both projections
    pub fn publish(&mut self, snapshot: Arc<ResultSet>) {
        self.markers = snapshot.listings.iter().filter_map(marker_for).collect();
        if let Some(id) = &self.hovered {
            if !snapshot.listings.iter().any(|r| r.id() == id) {
                self.hovered = None;
            }
        }
        self.snapshot = snapshot;
    }

    pub fn snapshot(&self) -> &Arc<ResultSet> {
        &self.snapshot
    }

    /// List projection, in rank order
    pub fn list(&self) -> &[RankedListing] {
        &self.snapshot.listings
    }

    /// Map projection
    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn toggle_focus(&mut self) -> Focus {
        self.focus = match self.focus {
            Focus::List => Focus::Map,
            Focus::Map => Focus::List,
        };
        self.focus
    }

    pub fn set_viewport_width(&mut self, px: u32) {
        self.viewport_width = Some(px);
    }

    pub fn is_narrow(&self) -> bool {
        self.viewport_width.is_some_and(|px| px < NARROW_VIEWPORT_PX)
    }

    pub fn panels(&self) -> Panels {
        if !self.is_narrow() {
            return Panels {
                list: true,
                map: true,
            };
        }
        Panels {
            list: self.focus == Focus::List,
            map: self.focus == Focus::Map,
        }
    }

    /// Highlight a listing in both projections; returns its rank
    ///
    /// Ids that are not in the current snapshot clear the highlight.
    pub fn hover(&mut self, id: &str) -> Option<usize> {
        let rank = self
            .snapshot
            .listings
            .iter()
            .find(|r| r.id() == id)
            .map(|r| r.rank);
        self.hovered = rank.map(|_| id.to_string());
        rank
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Search center if the snapshot has one, otherwise the default center
    pub fn map_center(&self) -> GeoPoint {
        self.snapshot
            .params
            .as_ref()
            .and_then(|p| p.geo)
            .map(|filter| filter.center())
            .unwrap_or(self.default_center)
    }

    pub fn zoom(&self) -> u8 {
        DEFAULT_ZOOM
    }
}

fn marker_for(ranked: &RankedListing) -> Option<MapMarker> {
    let position = ranked.listing.position().ok()?;
    Some(MapMarker {
        id: ranked.listing.id.clone(),
        latitude: position.latitude(),
        longitude: position.longitude(),
        rank: ranked.rank,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Listing, SearchParameters};
    use crate::search::run_pipeline;
    use std::collections::HashSet;

    fn snapshot() -> Arc<ResultSet> {
        let listings = vec![
            Listing::new("a", "Alpha", "").at(23.03, 72.56).priced(4000, 5000),
            Listing::new("b", "Beta", "").priced(3000, 4000),
            Listing::new("c", "Gamma", "").at(23.01, 72.57).priced(5000, 6000),
        ];
        let params = SearchParameters::new();
        Arc::new(ResultSet {
            generation: 1,
            listings: run_pipeline(&listings, &params),
            params: Some(params),
        })
    }

    fn center() -> GeoPoint {
        GeoPoint::new(23.0225, 72.5714).unwrap()
    }

    #[test]
    fn markers_match_locatable_list_entries() {
        let mut view = ViewSync::new(center());
        view.publish(snapshot());

        let list_ids: HashSet<_> = view
            .list()
            .iter()
            .filter(|r| r.listing.is_locatable())
            .map(|r| r.id().to_string())
            .collect();
        let marker_ids: HashSet<_> = view.markers().iter().map(|m| m.id.clone()).collect();
        assert_eq!(list_ids, marker_ids);
        assert_eq!(view.list().len(), 3);
        assert_eq!(view.markers().len(), 2);
    }

    #[test]
    fn markers_carry_list_rank() {
        let mut view = ViewSync::new(center());
        view.publish(snapshot());
        for marker in view.markers() {
            let entry = view.list().iter().find(|r| r.id() == marker.id).unwrap();
            assert_eq!(marker.rank, entry.rank);
        }
    }

    #[test]
    fn toggling_focus_leaves_snapshot_alone() {
        let snap = snapshot();
        let mut view = ViewSync::new(center());
        view.publish(Arc::clone(&snap));
        view.set_viewport_width(400);

        assert_eq!(view.panels(), Panels { list: true, map: false });
        assert_eq!(view.toggle_focus(), Focus::Map);
        assert_eq!(view.panels(), Panels { list: false, map: true });
        assert!(Arc::ptr_eq(view.snapshot(), &snap));
    }

    #[test]
    fn wide_viewport_shows_both_panels() {
        let mut view = ViewSync::new(center());
        assert_eq!(view.panels(), Panels { list: true, map: true });
        view.set_viewport_width(NARROW_VIEWPORT_PX);
        view.set_focus(Focus::Map);
        assert_eq!(view.panels(), Panels { list: true, map: true });
    }

    #[test]
    fn hover_is_shared_and_cleared_when_listing_disappears() {
        let mut view = ViewSync::new(center());
        view.publish(snapshot());

        let rank = view.hover("c");
        assert!(rank.is_some());
        assert_eq!(view.highlighted(), Some("c"));
        assert_eq!(view.hover("zzz"), None);
        assert_eq!(view.highlighted(), None);

        view.hover("a");
        view.publish(Arc::new(ResultSet::default()));
        assert_eq!(view.highlighted(), None);
        assert!(view.markers().is_empty());
    }

    #[test]
    fn map_center_follows_search() {
        let mut view = ViewSync::new(center());
        assert_eq!(view.map_center(), center());

        let here = GeoPoint::new(23.05, 72.53).unwrap();
        let params = SearchParameters::new().within(here, 2000.0).unwrap();
        view.publish(Arc::new(ResultSet {
            generation: 2,
            params: Some(params),
            listings: Vec::new(),
        }));
        assert_eq!(view.map_center(), here);
        assert_eq!(view.zoom(), DEFAULT_ZOOM);
    }
}
