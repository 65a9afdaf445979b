use serde::Serialize;

use crate::models::Report;
use crate::render;

/// One rendered list entry. The placeholder row has no id and is not
/// click-activatable.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListRow {
    pub id: Option<String>,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub rows: Vec<ListRow>,
}

/// Build the rendered list for a filtered subset. Callers pass records
/// already ordered newest first; an empty subset renders the single
/// "no reports found" placeholder rather than an empty list.
pub fn build_list(visible: &[&Report]) -> ListView {
    if visible.is_empty() {
        return ListView {
            rows: vec![ListRow {
                id: None,
                html: render::NO_REPORTS_HTML.to_string(),
            }],
        };
    }

    ListView {
        rows: visible
            .iter()
            .map(|report| ListRow {
                id: Some(report.id.clone()),
                html: render::row_html(report),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{Report, ReportCategory};

    fn report(id: &str) -> Report {
        Report {
            id: id.to_string(),
            category: ReportCategory::Other,
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
    fn empty_subset_renders_exactly_the_placeholder() {
        let view = build_list(&[]);
        assert_eq!(view.rows.len(), 1);
        assert!(view.rows[0].id.is_none());
        assert!(view.rows[0].html.contains("No reports found"));
    }

    #[test]
    fn rows_carry_their_report_id() {
        let a = report("a");
        let b = report("b");
        let view = build_list(&[&a, &b]);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].id.as_deref(), Some("a"));
        assert_eq!(view.rows[1].id.as_deref(), Some("b"));
    }
}
