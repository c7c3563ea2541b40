use crate::models::Tag;

/// Seed set used when no valid persisted tags exist, in display order
pub fn default_tags() -> Vec<Tag> {
    vec![
        Tag::new("1", "Urgent", "#FFCCCC", 5, &["contains:urgent", "contains:asap"]),
        Tag::new("2", "Client", "#CCE5FF", 4, &["contains:client", "contains:customer"]),
        Tag::new("3", "Follow-up", "#E5F2FF", 3, &["contains:follow", "contains:reminder"]),
        Tag::new("4", "Meeting", "#FFF2CC", 3, &["contains:meeting", "contains:call"]),
        Tag::new("5", "Project", "#E5CCFF", 2, &["contains:project", "contains:task"]),
    ]
}
