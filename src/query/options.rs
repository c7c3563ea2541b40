use tracing::debug;

use crate::models::Priority;

/// Category filter applied after the search filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterSelection {
    /// Everything passes
    #[default]
    All,
    /// Threads with `unread_count > 0`
    Unread,
    /// Threads at exactly this priority level
    Priority(Priority),
    /// Threads whose raw tag list contains this exact name (case-sensitive)
    Tag(String),
}

impl FilterSelection {
    /// Interpret a UI selection value.
    ///
    /// - `all` or blank → [`FilterSelection::All`]
    /// - `unread` → [`FilterSelection::Unread`]
    /// - `priority:<high|medium|low>` → [`FilterSelection::Priority`]
    /// - anything else is a tag name
    pub fn parse(value: &str) -> Self {
        match value {
            "all" => return FilterSelection::All,
            "unread" => return FilterSelection::Unread,
            _ => {}
        }

        if value.trim().is_empty() {
            return FilterSelection::All;
        }

        if let Some(level) = value.strip_prefix("priority:").and_then(Priority::from_name) {
            return FilterSelection::Priority(level);
        }

        FilterSelection::Tag(value.to_string())
    }
}

/// Sort order applied after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first
    #[default]
    Timestamp,
    /// High, then medium, then low
    Priority,
    /// Threads with unread messages first
    Unread,
}

impl SortKey {
    /// Unknown values fall back to [`SortKey::Timestamp`]
    pub fn parse(value: &str) -> Self {
        match value {
            "timestamp" => SortKey::Timestamp,
            "priority" => SortKey::Priority,
            "unread" => SortKey::Unread,
            other => {
                debug!("Unknown sort key '{}', sorting by timestamp", other);
                SortKey::Timestamp
            }
        }
    }
}

/// The user's current list selections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Case-insensitive substring search, empty means no search filter
    pub search_text: String,
    pub filter: FilterSelection,
    pub sort: SortKey,
}

impl QueryOptions {
    pub fn new(search_text: &str, filter: &str, sort: &str) -> Self {
        Self {
            search_text: search_text.to_string(),
            filter: FilterSelection::parse(filter),
            sort: SortKey::parse(sort),
        }
    }
}
