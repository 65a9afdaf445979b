use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::Report;
use crate::render;
use crate::settings::IconSet;

/// Everything the map needs to place one pin. Built once per record per
/// snapshot; attach/detach never touches it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub icon: String,
    pub popup_html: String,
}

fn marker_spec(report: &Report, icons: &IconSet) -> MarkerSpec {
    MarkerSpec {
        id: report.id.clone(),
        lat: report.lat,
        lng: report.lng,
        icon: icons.for_category(report.category).to_string(),
        popup_html: render::popup_html(report),
    }
}

struct MarkerEntry {
    spec: MarkerSpec,
    attached: bool,
}

/// Instructions for the map widget. `reset` clears every displayed pin
/// before `attach` is applied (used when a snapshot replaces the pool).
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MarkerDelta {
    pub reset: bool,
    pub attach: Vec<MarkerSpec>,
    pub detach: Vec<String>,
}

/// The engine-owned pool of map pins, keyed by report id.
///
/// Filtered-out markers are detached but retained, so loosening the filter
/// reattaches the identical spec. The pool is rebuilt wholesale only when a
/// store snapshot arrives.
pub struct MarkerPool {
    entries: HashMap<String, MarkerEntry>,
}

impl MarkerPool {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Wholesale rebuild on snapshot receipt. Every pin starts detached; the
    /// following reconcile pass attaches the visible set.
    pub fn rebuild(&mut self, reports: &[Report], icons: &IconSet) {
        self.entries = reports
            .iter()
            .map(|report| {
                (
                    report.id.clone(),
                    MarkerEntry {
                        spec: marker_spec(report, icons),
                        attached: false,
                    },
                )
            })
            .collect();
    }

    /// Attach exactly the markers whose records are in `visible`; detach the
    /// rest. Specs are never mutated on the way through.
    pub fn reconcile(&mut self, visible: &[&Report]) -> MarkerDelta {
        let visible_ids: HashSet<&str> = visible.iter().map(|r| r.id.as_str()).collect();
        let mut delta = MarkerDelta::default();

        for report in visible {
            if let Some(entry) = self.entries.get_mut(report.id.as_str()) {
                if !entry.attached {
                    entry.attached = true;
                    delta.attach.push(entry.spec.clone());
                }
            }
        }

        for (id, entry) in &mut self.entries {
            if entry.attached && !visible_ids.contains(id.as_str()) {
                entry.attached = false;
                delta.detach.push(id.clone());
            }
        }

        delta
    }

    pub fn spec(&self, report_id: &str) -> Option<&MarkerSpec> {
        self.entries.get(report_id).map(|entry| &entry.spec)
    }

    pub fn attached_count(&self) -> usize {
        self.entries.values().filter(|entry| entry.attached).count()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{Report, ReportCategory};
    use crate::settings::IconSet;

    fn report(id: &str, category: ReportCategory) -> Report {
        Report {
            id: id.to_string(),
            category,
            item_name: format!("item {id}"),
            description: None,
            contact: None,
            pickup_location: None,
            date_found: None,
            lat: 14.6071,
            lng: 121.0043,
            created_at: Utc::now(),
            claimed: false,
            claimed_at: None,
        }
    }

    #[test]
    fn first_reconcile_attaches_all_visible() {
        let reports = vec![report("a", ReportCategory::Phone), report("b", ReportCategory::Keys)];
        let mut pool = MarkerPool::new();
        pool.rebuild(&reports, &IconSet::default());

        let visible: Vec<&Report> = reports.iter().collect();
        let delta = pool.reconcile(&visible);

        assert_eq!(delta.attach.len(), 2);
        assert!(delta.detach.is_empty());
        assert_eq!(pool.attached_count(), 2);
    }

    #[test]
    fn narrowing_detaches_without_destroying() {
        let reports = vec![report("a", ReportCategory::Phone), report("b", ReportCategory::Keys)];
        let mut pool = MarkerPool::new();
        pool.rebuild(&reports, &IconSet::default());
        pool.reconcile(&reports.iter().collect::<Vec<_>>());

        let narrowed: Vec<&Report> = reports.iter().filter(|r| r.id == "a").collect();
        let delta = pool.reconcile(&narrowed);

        assert!(delta.attach.is_empty());
        assert_eq!(delta.detach, vec!["b".to_string()]);
        // The detached marker's spec is retained for reattachment.
        assert!(pool.spec("b").is_some());
    }

    #[test]
    fn reattach_after_loosening_reuses_the_same_spec() {
        let reports = vec![report("a", ReportCategory::Phone), report("b", ReportCategory::Keys)];
        let mut pool = MarkerPool::new();
        pool.rebuild(&reports, &IconSet::default());
        pool.reconcile(&reports.iter().collect::<Vec<_>>());

        let before = pool.spec("b").cloned().unwrap();
        pool.reconcile(&reports.iter().filter(|r| r.id == "a").collect::<Vec<_>>());
        let delta = pool.reconcile(&reports.iter().collect::<Vec<_>>());

        // Icon, popup, and position come back untouched.
        assert_eq!(delta.attach, vec![before]);
    }

    #[test]
    fn reconcile_is_a_noop_when_nothing_changed() {
        let reports = vec![report("a", ReportCategory::Phone)];
        let mut pool = MarkerPool::new();
        pool.rebuild(&reports, &IconSet::default());
        pool.reconcile(&reports.iter().collect::<Vec<_>>());

        let delta = pool.reconcile(&reports.iter().collect::<Vec<_>>());
        assert!(delta.attach.is_empty());
        assert!(delta.detach.is_empty());
    }

    #[test]
    fn rebuild_replaces_the_pool() {
        let mut pool = MarkerPool::new();
        pool.rebuild(&[report("a", ReportCategory::Phone)], &IconSet::default());
        pool.reconcile(&[&report("a", ReportCategory::Phone)]);

        pool.rebuild(&[report("b", ReportCategory::Keys)], &IconSet::default());
        assert!(pool.spec("a").is_none());
        assert_eq!(pool.attached_count(), 0);
    }

    #[test]
    fn icons_follow_the_category() {
        let mut pool = MarkerPool::new();
        pool.rebuild(&[report("a", ReportCategory::Keys)], &IconSet::default());
        assert_eq!(pool.spec("a").unwrap().icon, "🔑");
    }
}
