use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::badges::{BadgeRow, badge_row};
use super::normalize::ThreadBatch;
use super::options::{FilterSelection, QueryOptions, SortKey};
use crate::models::{Tag, ThreadSummary};

/// A thread ready for display: the thread itself plus its resolved tag badges
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadView<'a> {
    pub thread: &'a ThreadSummary,
    pub badges: BadgeRow<'a>,
}

/// Filter, sort and annotate a batch for display
///
/// `tags` is a snapshot of the tag registry; it only decides which tag badges
/// are shown and their colors, never which threads pass the filters.
pub fn query<'a>(
    batch: &'a ThreadBatch,
    options: &QueryOptions,
    tags: &'a [Tag],
) -> Vec<ThreadView<'a>> {
    filter_and_sort(batch, options)
        .into_iter()
        .map(|thread| ThreadView { thread, badges: badge_row(thread, tags) })
        .collect()
}

/// Filter and sort using the current time for undated threads
pub fn filter_and_sort<'a>(batch: &'a ThreadBatch, options: &QueryOptions) -> Vec<&'a ThreadSummary> {
    filter_and_sort_at(batch, options, Utc::now())
}

/// Filter and sort, treating threads without a timestamp as dated `now`
///
/// Pipeline, always in this order:
/// 1. Search: case-insensitive substring in subject, last message or any participant
/// 2. Category: [`FilterSelection`]
/// 3. Sort: [`SortKey`], stable so ties keep their input order
pub fn filter_and_sort_at<'a>(
    batch: &'a ThreadBatch,
    options: &QueryOptions,
    now: DateTime<Utc>,
) -> Vec<&'a ThreadSummary> {
    let needle = options.search_text.to_lowercase();

    let mut threads: Vec<&ThreadSummary> = batch
        .threads()
        .iter()
        .filter(|thread| matches_search(thread, &needle))
        .filter(|thread| matches_filter(thread, &options.filter))
        .collect();

    match options.sort {
        SortKey::Timestamp => threads.sort_by_key(|t| Reverse(t.timestamp.unwrap_or(now))),
        SortKey::Priority => threads.sort_by_key(|t| Reverse(t.priority.rank())),
        SortKey::Unread => threads.sort_by_key(|t| !t.has_unread()),
    }

    threads
}

/// `needle` must already be lowercase; empty matches everything
fn matches_search(thread: &ThreadSummary, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    thread.subject.to_lowercase().contains(needle)
        || thread.last_message.to_lowercase().contains(needle)
        || thread.participants.iter().any(|p| p.to_lowercase().contains(needle))
}

fn matches_filter(thread: &ThreadSummary, filter: &FilterSelection) -> bool {
    match filter {
        FilterSelection::All => true,
        FilterSelection::Unread => thread.has_unread(),
        FilterSelection::Priority(level) => thread.priority == *level,
        FilterSelection::Tag(name) => thread.tags.iter().any(|tag| tag == name),
    }
}
