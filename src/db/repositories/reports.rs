use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::db::{
    helpers::{parse_category, parse_optional_date, parse_optional_datetime, parse_datetime},
    Database,
};
use crate::models::Report;

const REPORT_COLUMNS: &str = "id, category, item_name, description, contact, pickup_location, \
     date_found, lat, lng, created_at, claimed, claimed_at";

fn row_to_report(row: &Row) -> Result<Report> {
    let created_at: String = row.get("created_at")?;
    let claimed_at: Option<String> = row.get("claimed_at")?;
    let date_found: Option<String> = row.get("date_found")?;
    let category: String = row.get("category")?;

    Ok(Report {
        id: row.get("id")?,
        category: parse_category(&category)?,
        item_name: row.get("item_name")?,
        description: row.get("description")?,
        contact: row.get("contact")?,
        pickup_location: row.get("pickup_location")?,
        date_found: parse_optional_date(date_found, "date_found")?,
        lat: row.get("lat")?,
        lng: row.get("lng")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        claimed: row.get::<_, i64>("claimed")? != 0,
        claimed_at: parse_optional_datetime(claimed_at, "claimed_at")?,
    })
}

impl Database {
    pub async fn insert_report(&self, report: &Report) -> Result<()> {
        let record = report.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO reports (id, category, item_name, description, contact, \
                 pickup_location, date_found, lat, lng, created_at, claimed, claimed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    record.id,
                    record.category.as_str(),
                    record.item_name,
                    record.description,
                    record.contact,
                    record.pickup_location,
                    record.date_found.map(|d| d.format("%Y-%m-%d").to_string()),
                    record.lat,
                    record.lng,
                    record.created_at.to_rfc3339(),
                    record.claimed as i64,
                    record.claimed_at.as_ref().map(|dt| dt.to_rfc3339()),
                ],
            )
            .map_err(|err| anyhow!("failed to insert report: {err}"))?;
            Ok(())
        })
        .await
    }

    /// All reports, newest first.
    pub async fn list_reports(&self) -> Result<Vec<Report>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REPORT_COLUMNS} FROM reports ORDER BY created_at DESC"
            ))?;

            let mut rows = stmt.query([])?;
            let mut reports = Vec::new();
            while let Some(row) = rows.next()? {
                reports.push(row_to_report(row)?);
            }

            Ok(reports)
        })
        .await
    }

    pub async fn get_report(&self, report_id: &str) -> Result<Option<Report>> {
        let report_id = report_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REPORT_COLUMNS} FROM reports WHERE id = ?1"
            ))?;

            let mut rows = stmt.query(params![report_id])?;
            match rows.next()? {
                Some(row) => Ok(Some(row_to_report(row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// Flip a report to claimed and stamp the claim time. The flag is set
    /// exactly once: claiming a missing or already-claimed report fails and
    /// leaves the row untouched.
    pub async fn mark_report_claimed(
        &self,
        report_id: &str,
        claimed_at: DateTime<Utc>,
    ) -> Result<()> {
        let report_id = report_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE reports
                 SET claimed = 1, claimed_at = ?1
                 WHERE id = ?2 AND claimed = 0",
                params![claimed_at.to_rfc3339(), report_id],
            )?;

            if rows_affected == 0 {
                let exists: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM reports WHERE id = ?1",
                    params![report_id],
                    |row| row.get(0),
                )?;
                if exists == 0 {
                    bail!("report not found");
                }
                bail!("report is already claimed");
            }

            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::{Duration, Utc};

    use crate::db::Database;
    use crate::models::{Report, ReportCategory};

    fn setup_test_db() -> Database {
        Database::new(PathBuf::from(":memory:")).expect("Failed to init test DB")
    }

    fn report(id: &str, offset_secs: i64) -> Report {
        Report {
            id: id.to_string(),
            category: ReportCategory::Wallet,
            item_name: format!("item {id}"),
            description: None,
            contact: None,
            pickup_location: Some("Security office".into()),
            date_found: None,
            lat: 14.6071,
            lng: 121.0043,
            created_at: Utc::now() + Duration::seconds(offset_secs),
            claimed: false,
            claimed_at: None,
        }
    }

    #[tokio::test]
    async fn insert_then_list_roundtrips() {
        let db = setup_test_db();

        db.insert_report(&report("a", 0)).await.expect("insert failed");

        let reports = db.list_reports().await.expect("list failed");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, "a");
        assert_eq!(reports[0].category, ReportCategory::Wallet);
        assert_eq!(reports[0].pickup_location.as_deref(), Some("Security office"));
        assert!(!reports[0].claimed);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let db = setup_test_db();

        db.insert_report(&report("older", 0)).await.unwrap();
        db.insert_report(&report("newer", 60)).await.unwrap();

        let reports = db.list_reports().await.unwrap();
        assert_eq!(reports[0].id, "newer");
        assert_eq!(reports[1].id, "older");
    }

    #[tokio::test]
    async fn claim_sets_flag_and_timestamp_once() {
        let db = setup_test_db();
        db.insert_report(&report("a", 0)).await.unwrap();

        let claimed_at = Utc::now();
        db.mark_report_claimed("a", claimed_at).await.expect("claim failed");

        let stored = db.get_report("a").await.unwrap().unwrap();
        assert!(stored.claimed);
        assert!(stored.claimed_at.is_some());

        // Second claim must fail and leave the original stamp in place.
        let err = db.mark_report_claimed("a", Utc::now()).await.unwrap_err();
        assert!(err.to_string().contains("already claimed"));

        let unchanged = db.get_report("a").await.unwrap().unwrap();
        assert_eq!(unchanged.claimed_at, stored.claimed_at);
    }

    #[tokio::test]
    async fn claim_of_missing_report_fails() {
        let db = setup_test_db();
        let err = db.mark_report_claimed("ghost", Utc::now()).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn get_report_returns_none_for_unknown_id() {
        let db = setup_test_db();
        assert!(db.get_report("missing").await.unwrap().is_none());
    }
}
