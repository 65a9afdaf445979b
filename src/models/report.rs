use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ReportCategory {
    Phone,
    Wallet,
    Keys,
    Other,
}

impl ReportCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportCategory::Phone => "phone",
            ReportCategory::Wallet => "wallet",
            ReportCategory::Keys => "keys",
            ReportCategory::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "phone" => Ok(ReportCategory::Phone),
            "wallet" => Ok(ReportCategory::Wallet),
            "keys" => Ok(ReportCategory::Keys),
            "other" => Ok(ReportCategory::Other),
            _ => Err(anyhow!("unknown report category '{value}'")),
        }
    }
}

/// A single lost/found item submission. One schema covers every variant of
/// the record: the later-addition fields (`pickup_location`, `date_found`,
/// claim state) are declared as optional up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub category: ReportCategory,
    pub item_name: String,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub pickup_location: Option<String>,
    pub date_found: Option<NaiveDate>,
    pub lat: f64,
    pub lng: f64,
    pub created_at: DateTime<Utc>,
    pub claimed: bool,
    pub claimed_at: Option<DateTime<Utc>>,
}

/// The report form payload as submitted by the page, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    pub category: String,
    pub item_name: String,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub pickup_location: Option<String>,
    pub date_found: Option<NaiveDate>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl ReportInput {
    /// Validate the form payload and build the stored record. A validation
    /// failure blocks submission: callers must not touch the store when this
    /// returns an error.
    ///
    /// Coordinates use a presence check, so 0.0 is a legal value.
    pub fn into_report(self, id: String, created_at: DateTime<Utc>) -> Result<Report> {
        let category = ReportCategory::parse(&self.category)?;

        let item_name = self.item_name.trim().to_string();
        if item_name.is_empty() {
            bail!("item name is required");
        }

        let lat = self.lat.ok_or_else(|| anyhow!("pick a spot on the map first"))?;
        let lng = self.lng.ok_or_else(|| anyhow!("pick a spot on the map first"))?;
        if !lat.is_finite() || !lng.is_finite() {
            bail!("location coordinates are not valid numbers");
        }

        Ok(Report {
            id,
            category,
            item_name,
            description: none_if_blank(self.description),
            contact: none_if_blank(self.contact),
            pickup_location: none_if_blank(self.pickup_location),
            date_found: self.date_found,
            lat,
            lng,
            created_at,
            claimed: false,
            claimed_at: None,
        })
    }
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
