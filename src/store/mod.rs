use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::error;

use crate::{db::Database, models::Report};

type SnapshotListener = Box<dyn Fn(Vec<Report>) + Send + Sync + 'static>;

/// The live view onto the `reports` collection.
///
/// Consumers register a standing subscription; every change to the
/// collection is delivered as a complete snapshot of all current records,
/// never as a diff. Writes go through the feed so a notification follows
/// every successful write and never a failed one.
#[derive(Clone)]
pub struct ReportFeed {
    db: Database,
    listeners: Arc<Mutex<Vec<SnapshotListener>>>,
}

impl ReportFeed {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(Vec<Report>) + Send + Sync + 'static,
    {
        self.listeners.lock().unwrap().push(Box::new(listener));
    }

    pub async fn submit(&self, report: &Report) -> Result<()> {
        self.db.insert_report(report).await?;
        self.notify().await;
        Ok(())
    }

    pub async fn claim(&self, report_id: &str, claimed_at: DateTime<Utc>) -> Result<()> {
        self.db.mark_report_claimed(report_id, claimed_at).await?;
        self.notify().await;
        Ok(())
    }

    /// Reload the full collection and fan it out to every subscriber.
    ///
    /// A failed reload is logged and dropped; subscribers simply keep their
    /// previous view. There is no user-facing recovery path for read
    /// failures, matching the subscription contract.
    pub async fn notify(&self) {
        let snapshot = match self.db.list_reports().await {
            Ok(reports) => reports,
            Err(err) => {
                error!("Failed to reload reports for snapshot delivery: {err}");
                return;
            }
        };

        let listeners = self.listeners.lock().unwrap();
        for listener in listeners.iter() {
            listener(snapshot.clone());
        }
    }
}
