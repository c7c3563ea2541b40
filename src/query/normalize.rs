//! Input normalization for the query engine.
//!
//! Thread data arrives as untyped JSON from an external source and may be
//! missing fields or carry the wrong types. [`ThreadBatch::from_value`] runs once
//! per batch and produces fully-typed [`ThreadSummary`] values, so the filter and
//! sort stages never guard individual fields.
//!
//! | Input                         | Result                              |
//! |-------------------------------|-------------------------------------|
//! | not an array                  | empty batch                         |
//! | array element not an object  | skipped                             |
//! | missing / wrong-typed string  | `""`                                |
//! | missing / wrong-typed list    | `[]` (scalar entries become strings)|
//! | bad `unreadCount`             | `0`                                 |
//! | fractional `unreadCount`      | rounded up                          |
//! | bad `priority`                | `low`                               |
//! | bad `timestamp`               | `None`                              |

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{Priority, ThreadSummary};

/// A normalized batch of threads, the unit the query engine works on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadBatch {
    threads: Vec<ThreadSummary>,
}

impl ThreadBatch {
    pub fn new(threads: Vec<ThreadSummary>) -> Self {
        Self { threads }
    }

    /// Normalize arbitrary JSON into a batch
    pub fn from_value(value: &Value) -> Self {
        let Some(items) = value.as_array() else {
            debug!("Thread input is not an array, treating as empty");
            return Self::default();
        };

        let threads: Vec<ThreadSummary> = items.iter().filter_map(normalize_thread).collect();
        if threads.len() < items.len() {
            debug!("Skipped {} non-object thread entries", items.len() - threads.len());
        }

        Self { threads }
    }

    /// Parse and normalize a JSON document. Malformed JSON yields an empty batch.
    pub fn from_json_str(input: &str) -> Self {
        match serde_json::from_str::<Value>(input) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                debug!("Thread input is not valid JSON, treating as empty: {}", e);
                Self::default()
            }
        }
    }

    pub fn threads(&self) -> &[ThreadSummary] {
        &self.threads
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

fn normalize_thread(value: &Value) -> Option<ThreadSummary> {
    let fields = value.as_object()?;

    Some(ThreadSummary {
        id: string_field(fields, "id"),
        subject: string_field(fields, "subject"),
        participants: string_list_field(fields, "participants"),
        last_message: string_field(fields, "lastMessage"),
        last_sender: string_field(fields, "lastSender"),
        timestamp: fields.get("timestamp").and_then(parse_timestamp),
        unread_count: fields.get("unreadCount").map(unread_count).unwrap_or(0),
        priority: fields
            .get("priority")
            .and_then(Value::as_str)
            .map(Priority::parse)
            .unwrap_or_default(),
        tags: string_list_field(fields, "tags"),
        is_read: fields.get("isRead").and_then(Value::as_bool).unwrap_or(false),
        channel: string_field(fields, "channel"),
    })
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn string_list_field(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(coerce_to_string).collect(),
        _ => Vec::new(),
    }
}

/// Strings pass through, numbers and booleans use their JSON text. Nulls,
/// arrays and objects are dropped.
fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn unread_count(value: &Value) -> u64 {
    if let Some(n) = value.as_u64() {
        return n;
    }
    match value.as_f64() {
        Some(f) if f.is_finite() && f > 0.0 => f.ceil() as u64,
        _ => 0,
    }
}

/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (UTC), `YYYY-MM-DD` (UTC
/// midnight) and integer epoch milliseconds
///
/// Naive date-times are read as UTC, not in the local time zone.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::String(s) => parse_timestamp_str(s),
        _ => None,
    }
}

fn parse_timestamp_str(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}
