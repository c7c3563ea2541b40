//! Tag badge resolution for thread rows.
//!
//! Only tags known to the registry are rendered, colored with the registry
//! color. Tags the registry does not know are hidden from the row; a direct
//! [`tag_color`] lookup for them returns [`FALLBACK_TAG_COLOR`].

use serde::Serialize;

use crate::models::{Tag, ThreadSummary};
use crate::registry::find_tag_by_name;

/// Color for tags that are unknown or have no color of their own
pub const FALLBACK_TAG_COLOR: &str = "#F0F0F0";

/// Badges shown per row before collapsing the rest into a `+N` counter
pub const MAX_VISIBLE_BADGES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagBadge<'a> {
    /// Tag name as written on the thread
    pub name: &'a str,
    pub color: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BadgeRow<'a> {
    pub shown: Vec<TagBadge<'a>>,
    /// Known tags beyond [`MAX_VISIBLE_BADGES`]
    pub overflow: usize,
}

impl BadgeRow<'_> {
    /// `+N` label for the hidden badges, if any
    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{}", self.overflow))
    }
}

pub fn tag_color<'a>(name: &str, tags: &'a [Tag]) -> &'a str {
    find_tag_by_name(tags, name).map(registry_color).unwrap_or(FALLBACK_TAG_COLOR)
}

fn registry_color(tag: &Tag) -> &str {
    if tag.color.trim().is_empty() { FALLBACK_TAG_COLOR } else { &tag.color }
}

/// Resolve the badges for one thread against a registry snapshot
pub fn badge_row<'a>(thread: &'a ThreadSummary, tags: &'a [Tag]) -> BadgeRow<'a> {
    let known: Vec<TagBadge<'a>> = thread
        .tags
        .iter()
        .filter_map(|name| {
            find_tag_by_name(tags, name).map(|tag| TagBadge { name, color: registry_color(tag) })
        })
        .collect();

    let overflow = known.len().saturating_sub(MAX_VISIBLE_BADGES);
    let shown = known.into_iter().take(MAX_VISIBLE_BADGES).collect();

    BadgeRow { shown, overflow }
}
