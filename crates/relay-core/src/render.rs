//! Rendering of event reports into notification text.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::report::EventReport;

/// Shown when a report has no path.
pub const UNKNOWN: &str = "unknown";

/// Shown when a report has no referrer.
pub const NO_REFERRER: &str = "none";

/// Subject line: `Website event: <type>` plus ` - <path>` when known.
pub fn subject(report: &EventReport) -> String {
    let mut subject = format!("Website event: {}", report.event_type());
    if let Some(path) = report.path() {
        let _ = write!(subject, " - {path}");
    }
    subject
}

/// Human-readable event time, e.g. `11/14/2023, 10:13:20 PM`.
///
/// Uses the report's `ts` when usable, `now` otherwise. Always UTC.
pub fn event_time(report: &EventReport, now: DateTime<Utc>) -> String {
    report.timestamp().unwrap_or(now).format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// HTML body with the summary fields and a JSON dump of the whole report.
pub fn html_body(report: &EventReport, now: DateTime<Utc>) -> String {
    let dump = serde_json::to_string_pretty(report.as_json())
        .unwrap_or_else(|_| report.as_json().to_string());

    let mut html = String::from("<h3>Website event</h3>\n");
    let rows = [
        ("Type", report.event_type()),
        ("Path", report.path().unwrap_or_else(|| UNKNOWN.to_string())),
        ("Referrer", report.referrer().unwrap_or_else(|| NO_REFERRER.to_string())),
        ("User agent", report.user_agent().unwrap_or_else(|| UNKNOWN.to_string())),
        ("Time", event_time(report, now)),
    ];
    for (label, value) in rows {
        let _ = writeln!(html, "<p><strong>{label}:</strong> {}</p>", escape_html(&value));
    }
    let _ = writeln!(html, "<pre style=\"white-space:pre-wrap\">{}</pre>", escape_html(&dump));
    html
}

/// Plain-text body.
pub fn text_body(report: &EventReport, now: DateTime<Utc>) -> String {
    format!(
        "Event: {}\nPath: {}\nReferrer: {}\nTime: {}",
        report.event_type(),
        report.path().as_deref().unwrap_or(UNKNOWN),
        report.referrer().as_deref().unwrap_or(NO_REFERRER),
        event_time(report, now),
    )
}

/// Escapes text for inclusion in HTML element content.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
