use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Thread priority level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl Priority {
    /// Sort rank: high = 3, medium = 2, low = 1
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// Strict parse of `high`, `medium` or `low` (case-insensitive)
    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    /// Lenient parse, unknown values become [`Priority::Low`]
    pub fn parse(value: &str) -> Self {
        Self::from_name(value).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Normalized, read-only projection of a conversation thread.
///
/// Built once per input batch by [`crate::query::ThreadBatch`]; every field is
/// present so the filter and sort stages never deal with missing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummary {
    pub id: String,
    pub subject: String,
    pub participants: Vec<String>,
    pub last_message: String,
    pub last_sender: String,
    /// `None` when the source value was missing or unparseable
    pub timestamp: Option<DateTime<Utc>>,
    pub unread_count: u64,
    pub priority: Priority,
    /// Free-form tag names, not necessarily known to the registry
    pub tags: Vec<String>,
    pub is_read: bool,
    pub channel: String,
}

impl ThreadSummary {
    pub fn has_unread(&self) -> bool {
        self.unread_count > 0
    }
}
