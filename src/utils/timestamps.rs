use chrono::{DateTime, Utc};

/// Format a thread's last-activity time for the inbox list:
/// - Under 24 hours old: "14:05"
/// - Under 48 hours old: "Yesterday"
/// - Older: "Jan 9"
///
/// Threads without a timestamp render as "-".
pub fn format_thread_time(timestamp: Option<&DateTime<Utc>>, now: &DateTime<Utc>) -> String {
    let Some(timestamp) = timestamp else {
        return "-".to_string();
    };

    let hours = now.signed_duration_since(*timestamp).num_hours();

    if hours < 24 {
        timestamp.format("%H:%M").to_string()
    } else if hours < 48 {
        "Yesterday".to_string()
    } else {
        timestamp.format("%b %-d").to_string()
    }
}
