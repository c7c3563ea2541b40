//! Data models for tags and conversation threads.
//!
//! - [`Tag`] - User-defined label, also the persisted record shape
//! - [`TagDraft`] - Unvalidated user input for a new tag
//! - [`TagPatch`] - Partial edit of an existing tag
//! - [`TagRule`] - Parsed `<field>:<substring>` rule expression
//! - [`ThreadSummary`] - Normalized thread projection consumed by the query engine
//! - [`Priority`] - Thread priority level with its sort rank

pub mod tag;
pub mod thread;

pub use tag::{
    DEFAULT_TAG_COLOR, DEFAULT_TAG_PRIORITY, MAX_TAG_PRIORITY, MIN_TAG_PRIORITY, RuleField,
    TAG_COLOR_PALETTE, Tag, TagDraft, TagPatch, TagRule, validate_priority,
};
pub use thread::{Priority, ThreadSummary};
