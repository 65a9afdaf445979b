pub mod commands;
pub mod controller;
pub mod filter;
pub mod markers;
pub mod query;
pub mod view;

use serde::Serialize;

use crate::models::Report;
use crate::settings::{GeoPoint, IconSet};

pub use controller::EngineController;
pub use query::{CategoryFilter, QueryState};

use filter::filter_reports;
use markers::{MarkerDelta, MarkerPool};
use view::{build_list, ListView};

/// Everything the page needs after one derivation pass: the rendered list
/// and the marker instructions for the map.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewUpdate {
    pub list: ListView,
    pub markers: MarkerDelta,
}

/// The report store sync & filter engine.
///
/// Holds the in-memory mirror of the latest store snapshot, the current
/// query state, and the marker pool. Plain data in, plain data out: no map
/// widget, no store handle, no page — those live behind the controller.
pub struct SyncEngine {
    icons: IconSet,
    mirror: Vec<Report>,
    query: QueryState,
    markers: MarkerPool,
}

impl SyncEngine {
    pub fn new(icons: IconSet) -> Self {
        Self {
            icons,
            mirror: Vec::new(),
            query: QueryState::cleared(),
            markers: MarkerPool::new(),
        }
    }

    /// Replace the mirror with a full store snapshot. The previous mirror
    /// and marker pool are discarded wholesale; the update tells the map to
    /// clear every displayed pin and attach the currently visible set.
    pub fn apply_snapshot(&mut self, mut reports: Vec<Report>) -> ViewUpdate {
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.mirror = reports;
        self.markers.rebuild(&self.mirror, &self.icons);
        self.refresh(true)
    }

    pub fn set_query(&mut self, query: QueryState) -> ViewUpdate {
        self.query = query;
        self.refresh(false)
    }

    pub fn clear_query(&mut self) -> ViewUpdate {
        self.query = QueryState::cleared();
        self.refresh(false)
    }

    /// Resolve a row or marker activation to its pan target.
    pub fn focus(&self, report_id: &str) -> Option<GeoPoint> {
        self.find(report_id).map(|report| GeoPoint {
            lat: report.lat,
            lng: report.lng,
        })
    }

    pub fn find(&self, report_id: &str) -> Option<&Report> {
        self.mirror.iter().find(|report| report.id == report_id)
    }

    /// The current list and full visible marker set, for a page painting
    /// from scratch.
    pub fn current_view(&self) -> ViewUpdate {
        let visible = filter_reports(&self.mirror, &self.query);
        let markers = MarkerDelta {
            reset: true,
            attach: visible
                .iter()
                .filter_map(|report| self.markers.spec(&report.id).cloned())
                .collect(),
            detach: Vec::new(),
        };
        ViewUpdate {
            list: build_list(&visible),
            markers,
        }
    }

    pub fn attached_markers(&self) -> usize {
        self.markers.attached_count()
    }

    fn refresh(&mut self, reset: bool) -> ViewUpdate {
        let visible = filter_reports(&self.mirror, &self.query);
        let mut markers = self.markers.reconcile(&visible);
        markers.reset = reset;
        ViewUpdate {
            list: build_list(&visible),
            markers,
        }
    }
}
