//! Fusion Inbox - tag registry and thread query engine for a unified inbox
//!
//! This library provides the classification core behind the inbox list:
//!
//! - A persisted registry of user-defined tags, seeded with defaults on first run
//! - Normalization of untrusted thread data into typed summaries
//! - Search, category filters and sort orders over a batch of threads
//! - Registry-driven tag badges for each displayed thread
//!
//! # Example
//!
//! ```no_run
//! use fusion_inbox::query::{QueryOptions, ThreadBatch, query};
//! use fusion_inbox::registry::TagRegistry;
//! use fusion_inbox::storage::FileStore;
//!
//! let registry = TagRegistry::initialize(FileStore::new("/tmp/fusion-inbox"));
//! let batch = ThreadBatch::from_json_str(&std::fs::read_to_string("threads.json")?);
//! let options = QueryOptions::new("budget", "unread", "priority");
//!
//! for view in query(&batch, &options, registry.list()) {
//!     println!("{}", view.thread.subject);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod models;
pub mod query;
pub mod registry;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use models::{Priority, Tag, TagDraft, TagPatch, ThreadSummary};
pub use query::{QueryOptions, ThreadBatch, query};
pub use registry::TagRegistry;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
