//! Thread query engine: normalize, filter, sort and annotate thread batches.
//!
//! The engine is a pure derivation. Nothing it is given is mutated and no
//! input shape makes it fail; bad input degrades to fewer (or no) results.
//!
//! ```rust
//! use fusion_inbox::query::{QueryOptions, ThreadBatch, query};
//! use fusion_inbox::registry::default_tags;
//!
//! let batch = ThreadBatch::from_json_str(
//!     r#"[{"id":"t1","subject":"Q4 Budget Review","tags":["Urgent"],"unreadCount":1}]"#,
//! );
//! let tags = default_tags();
//! let views = query(&batch, &QueryOptions::new("budget", "unread", "priority"), &tags);
//! assert_eq!(views.len(), 1);
//! assert_eq!(views[0].badges.shown[0].color, "#FFCCCC");
//! ```

pub mod badges;
pub mod engine;
pub mod normalize;
pub mod options;

pub use badges::{BadgeRow, FALLBACK_TAG_COLOR, MAX_VISIBLE_BADGES, TagBadge, badge_row, tag_color};
pub use engine::{ThreadView, filter_and_sort, filter_and_sort_at, query};
pub use normalize::ThreadBatch;
pub use options::{FilterSelection, QueryOptions, SortKey};
