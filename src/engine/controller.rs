use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use log::{debug, error};
use serde::Serialize;
use tauri::{AppHandle, Emitter};

use crate::models::Report;
use crate::render;
use crate::settings::{GeoPoint, IconSet};
use crate::store::ReportFeed;

use super::{QueryState, SyncEngine, ViewUpdate};

#[derive(Serialize, Clone)]
struct ReportListChangedEvent {
    list: super::view::ListView,
}

#[derive(Serialize, Clone)]
struct MapMarkersChangedEvent {
    markers: super::markers::MarkerDelta,
}

#[derive(Serialize, Clone)]
struct MapFocusEvent {
    lat: f64,
    lng: f64,
}

/// Wires the engine to the page: subscribes to the report feed, applies
/// snapshots and query changes under one lock, and emits the resulting
/// list/marker updates as events.
#[derive(Clone)]
pub struct EngineController {
    engine: Arc<Mutex<SyncEngine>>,
    app_handle: AppHandle,
}

impl EngineController {
    pub fn new(app_handle: AppHandle, icons: IconSet) -> Self {
        Self {
            engine: Arc::new(Mutex::new(SyncEngine::new(icons))),
            app_handle,
        }
    }

    /// Register the standing subscription on the feed. Every snapshot fully
    /// supersedes the mirror; a late delivery simply wins.
    pub fn subscribe_to(&self, feed: &ReportFeed) {
        let controller = self.clone();
        feed.subscribe(move |reports| controller.apply_snapshot(reports));
    }

    fn apply_snapshot(&self, reports: Vec<Report>) {
        let update = {
            let mut engine = self.engine.lock().unwrap();
            let update = engine.apply_snapshot(reports);
            debug!(
                "Snapshot applied: {} rows, {} markers attached",
                update.list.rows.len(),
                engine.attached_markers()
            );
            update
        };
        self.emit_view(update);
    }

    pub fn set_query(&self, query: QueryState) {
        let update = self.engine.lock().unwrap().set_query(query);
        self.emit_view(update);
    }

    pub fn clear_query(&self) {
        let update = self.engine.lock().unwrap().clear_query();
        self.emit_view(update);
    }

    pub fn current_view(&self) -> ViewUpdate {
        self.engine.lock().unwrap().current_view()
    }

    /// Pan the map to a report without changing zoom or marker state.
    pub fn focus_report(&self, report_id: &str) -> Result<()> {
        let point: GeoPoint = self
            .engine
            .lock()
            .unwrap()
            .focus(report_id)
            .ok_or_else(|| anyhow!("report no longer exists"))?;

        self.app_handle
            .emit(
                "map-focus",
                MapFocusEvent {
                    lat: point.lat,
                    lng: point.lng,
                },
            )
            .map_err(|err| anyhow!("failed to emit map-focus: {err}"))
    }

    pub fn spoken_summary(&self, report_id: &str) -> Option<String> {
        self.engine
            .lock()
            .unwrap()
            .find(report_id)
            .map(render::spoken_summary)
    }

    fn emit_view(&self, update: ViewUpdate) {
        if let Err(err) = self
            .app_handle
            .emit("report-list-changed", ReportListChangedEvent { list: update.list })
        {
            error!("Failed to emit report-list-changed: {err}");
        }
        if let Err(err) = self.app_handle.emit(
            "map-markers-changed",
            MapMarkersChangedEvent {
                markers: update.markers,
            },
        ) {
            error!("Failed to emit map-markers-changed: {err}");
        }
    }
}
