//! Markup and spoken-text fragments shipped to the webview.
//!
//! Every user-supplied field is escaped here, on the Rust side, so the page
//! never interpolates raw report text into HTML.

use crate::models::Report;

pub const NO_REPORTS_HTML: &str = r#"<li class="report-row empty">No reports found.</li>"#;

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn popup_html(report: &Report) -> String {
    let mut html = format!(
        "<strong>{}</strong> <em>({})</em><br/>",
        escape_html(&report.item_name),
        report.category.as_str()
    );

    if let Some(description) = &report.description {
        html.push_str(&format!("<div>{}</div>", escape_html(description)));
    }
    if let Some(contact) = &report.contact {
        html.push_str(&format!(
            "<div><small>Contact: {}</small></div>",
            escape_html(contact)
        ));
    }
    if let Some(pickup) = &report.pickup_location {
        html.push_str(&format!(
            "<div><small>Pickup at: {}</small></div>",
            escape_html(pickup)
        ));
    }
    if let Some(date) = report.date_found {
        html.push_str(&format!(
            "<div><small>Found on: {}</small></div>",
            date.format("%Y-%m-%d")
        ));
    }
    if report.claimed {
        html.push_str("<div><small>Already claimed</small></div>");
    }
    html.push_str(&format!(
        r#"<div style="margin-top:6px"><small>{}</small></div>"#,
        report.created_at.format("%b %d, %Y %H:%M")
    ));

    html
}

pub fn row_html(report: &Report) -> String {
    let mut html = format!(
        r#"<li class="report-row" data-id="{}"><strong>{}</strong> <em>({})</em>"#,
        escape_html(&report.id),
        escape_html(&report.item_name),
        report.category.as_str()
    );

    if let Some(description) = &report.description {
        html.push_str(&format!("<div>{}</div>", escape_html(description)));
    }
    if report.claimed {
        html.push_str(r#"<span class="claimed-badge">claimed</span>"#);
    }
    html.push_str(&format!(
        "<small>{}</small></li>",
        report.created_at.format("%b %d, %Y %H:%M")
    ));

    html
}

/// The text handed to speech synthesis for one report.
pub fn spoken_summary(report: &Report) -> String {
    let mut parts = vec![format!(
        "{}, a {} report.",
        report.item_name,
        report.category.as_str()
    )];

    if let Some(description) = &report.description {
        parts.push(format!("{description}."));
    }
    if let Some(pickup) = &report.pickup_location {
        parts.push(format!("Pickup at {pickup}."));
    }
    if let Some(contact) = &report.contact {
        parts.push(format!("Contact {contact}."));
    }
    if report.claimed {
        parts.push("This item has already been claimed.".to_string());
    }

    parts.join(" ")
}
