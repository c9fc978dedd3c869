//! Inbound event reports.
//!
//! Reports are unstructured: every field is optional and unknown fields are
//! kept so they show up in the JSON dump of the notification.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// Event type used when the report does not name one.
pub const DEFAULT_EVENT_TYPE: &str = "visit";

/// A website event as posted by the tracking snippet.
///
/// Wraps the parsed JSON body. Field accessors are permissive: empty
/// strings, zero, `false` and `null` all count as absent, and lookups on a
/// body that is not a JSON object simply find nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct EventReport {
    value: Value,
    raw_fallback: bool,
}

impl EventReport {
    /// Parses a request body into a report.
    ///
    /// An empty body is an empty report. A body that is not valid JSON is
    /// kept whole under a `raw` field instead of being rejected.
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self { value: Value::Object(serde_json::Map::new()), raw_fallback: false };
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self { value, raw_fallback: false },
            Err(_) => Self {
                value: json!({ "raw": String::from_utf8_lossy(body) }),
                raw_fallback: true,
            },
        }
    }

    /// Wraps an already parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        Self { value, raw_fallback: false }
    }

    /// Returns true when the body was not JSON and was stored under `raw`.
    pub fn is_raw_fallback(&self) -> bool {
        self.raw_fallback
    }

    /// The full report as JSON.
    pub fn as_json(&self) -> &Value {
        &self.value
    }

    /// Event type, defaulting to `visit`.
    pub fn event_type(&self) -> String {
        self.field("eventType").unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_string())
    }

    /// Page path the event happened on.
    pub fn path(&self) -> Option<String> {
        self.field("path")
    }

    /// Referrer reported by the browser.
    pub fn referrer(&self) -> Option<String> {
        self.field("referrer")
    }

    /// Browser user agent.
    pub fn user_agent(&self) -> Option<String> {
        self.field("ua")
    }

    /// Raw body text when the JSON fallback was taken.
    pub fn raw(&self) -> Option<String> {
        self.field("raw")
    }

    /// Event time from `ts`.
    ///
    /// Accepts milliseconds since the epoch as a number or numeric string,
    /// or an RFC 3339 string. Anything else, including zero, is `None` and
    /// callers substitute the current time.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self.value.get("ts")? {
            Value::Number(n) => {
                let millis = n.as_i64().or_else(|| n.as_f64().and_then(float_millis))?;
                from_millis(millis)
            },
            Value::String(s) => {
                let s = s.trim();
                if let Ok(millis) = s.parse::<i64>() {
                    return from_millis(millis);
                }
                if let Some(millis) = s.parse::<f64>().ok().and_then(float_millis) {
                    return from_millis(millis);
                }
                DateTime::parse_from_rfc3339(s).ok().map(|t| t.with_timezone(&Utc))
            },
            _ => None,
        }
    }

    /// Renders a field as display text if it holds a truthy value.
    fn field(&self, key: &str) -> Option<String> {
        match self.value.get(key)? {
            Value::Null | Value::Bool(false) => None,
            Value::Bool(true) => Some("true".to_string()),
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

impl Default for EventReport {
    fn default() -> Self {
        Self::from_body(b"")
    }
}

#[allow(clippy::cast_possible_truncation)]
fn float_millis(f: f64) -> Option<i64> {
    if f.is_finite() && f.abs() < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    if millis == 0 {
        return None;
    }
    DateTime::from_timestamp_millis(millis)
}
