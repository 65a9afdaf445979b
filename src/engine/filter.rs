use crate::models::Report;

use super::query::QueryState;

/// Derive the filtered subset of the mirror for the given query state.
///
/// Pure: identical inputs yield the identical subset, independent of call
/// order. A record is included only when it passes both the category filter
/// (the `all` sentinel, or exact equality) and the text filter (trimmed,
/// lower-cased query empty or a substring of item name, description,
/// contact, or pickup location; absent fields never match).
pub fn filter_reports<'a>(mirror: &'a [Report], query: &QueryState) -> Vec<&'a Report> {
    let needle = query.text.trim().to_lowercase();

    mirror
        .iter()
        .filter(|report| query.category.matches(report.category) && matches_text(report, &needle))
        .collect()
}

fn matches_text(report: &Report, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    [
        Some(&report.item_name),
        report.description.as_ref(),
        report.contact.as_ref(),
        report.pickup_location.as_ref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::engine::query::CategoryFilter;
    use crate::models::{Report, ReportCategory};

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
            created_at: Utc::now() + Duration::seconds(id.len() as i64),
            claimed: false,
            claimed_at: None,
        }
    }

    fn mirror() -> Vec<Report> {
        let mut wallet = report("w1", ReportCategory::Wallet);
        wallet.description = Some("lost blue wallet near gate 2".into());
        let mut phone = report("p1", ReportCategory::Phone);
        phone.contact = Some("0917-555-0199".into());
        let keys = report("k1", ReportCategory::Keys);
        vec![wallet, phone, keys]
    }

    fn query(text: &str, category: CategoryFilter) -> QueryState {
        QueryState {
            text: text.to_string(),
            category,
        }
    }

    #[test]
    fn identical_inputs_yield_identical_subsets() {
        let mirror = mirror();
        let q = query("wallet", CategoryFilter::All);

        let first: Vec<&str> = filter_reports(&mirror, &q).iter().map(|r| r.id.as_str()).collect();
        let second: Vec<&str> = filter_reports(&mirror, &q).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn cleared_query_is_the_unfiltered_mirror() {
        let mirror = mirror();
        let all = filter_reports(&mirror, &QueryState::cleared());
        assert_eq!(all.len(), mirror.len());
    }

    #[test]
    fn category_filter_excludes_regardless_of_text() {
        let mirror = mirror();
        // The phone record mentions nothing about wallets, but even a text
        // match could not rescue it from the category filter.
        let q = query("", CategoryFilter::Only(ReportCategory::Wallet));
        let hits = filter_reports(&mirror, &q);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category, ReportCategory::Wallet);
    }

    #[test]
    fn text_matches_description_case_insensitively() {
        let mirror = mirror();
        let hits = filter_reports(&mirror, &query("WALLET", CategoryFilter::All));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "w1");
    }

    #[test]
    fn text_matches_contact_field() {
        let mirror = mirror();
        let hits = filter_reports(&mirror, &query("555-0199", CategoryFilter::All));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p1");
    }

    #[test]
    fn absent_fields_never_match() {
        let mirror = mirror();
        // Only k1 has no description/contact/pickup; searching for text that
        // appears in no populated field returns nothing rather than matching
        // records with absent fields.
        let hits = filter_reports(&mirror, &query("umbrella", CategoryFilter::All));
        assert!(hits.is_empty());
    }

    #[test]
    fn both_filters_must_pass() {
        let mirror = mirror();
        // Text matches the wallet record, category selects phones: AND of
        // the two leaves nothing.
        let q = query("gate 2", CategoryFilter::Only(ReportCategory::Phone));
        assert!(filter_reports(&mirror, &q).is_empty());
    }

    #[test]
    fn query_text_is_trimmed_before_matching() {
        let mirror = mirror();
        let hits = filter_reports(&mirror, &query("  wallet  ", CategoryFilter::All));
        assert_eq!(hits.len(), 1);
    }
}
