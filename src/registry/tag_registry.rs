//! Persisted, mutable tag collection.
//!
//! # Error Handling Strategy
//!
//! The registry never fails a caller because of stored data:
//!
//! - **Absent value**: seeds the default tag set and persists it
//! - **Corrupt value**: anything that does not deserialize as a tag array is
//!   logged at `error` and replaced by the default set
//! - **Store write failure**: logged at `warn`; the in-memory mutation stays
//!
//! Only [`TagRegistry::create`] returns an error, for invalid user input or an
//! id collision.

use anyhow::{Result, bail};
use tracing::{debug, error, warn};

use super::defaults::default_tags;
use crate::models::{Tag, TagDraft};
use crate::storage::{KeyValueStore, TAGS_STORAGE_KEY};

/// First tag whose name matches case-insensitively
pub fn find_tag_by_name<'a>(tags: &'a [Tag], name: &str) -> Option<&'a Tag> {
    tags.iter().find(|tag| tag.name_matches(name))
}

/// Tag collection backed by a [`KeyValueStore`].
///
/// Construct one per application with [`TagRegistry::initialize`] and hand it
/// to whatever needs tag metadata. Every mutation rewrites the full collection
/// under [`TAGS_STORAGE_KEY`].
#[derive(Debug)]
pub struct TagRegistry<S: KeyValueStore> {
    store: S,
    tags: Vec<Tag>,
}

impl<S: KeyValueStore> TagRegistry<S> {
    /// Load tags from `store`, falling back to the default seed set
    pub fn initialize(store: S) -> Self {
        let stored = match store.get(TAGS_STORAGE_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read stored tags, using defaults: {:#}", e);
                None
            }
        };

        let loaded = stored.and_then(|json| match serde_json::from_str::<Vec<Tag>>(&json) {
            Ok(tags) => Some(tags),
            Err(e) => {
                error!("Stored tags are corrupt, restoring defaults: {}", e);
                None
            }
        });

        match loaded {
            Some(tags) => {
                debug!("Loaded {} tags from storage", tags.len());
                Self { store, tags }
            }
            None => {
                let mut registry = Self { store, tags: default_tags() };
                registry.persist();
                registry
            }
        }
    }

    /// All tags in insertion order
    pub fn list(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append a tag as-is. Duplicate names are accepted; lookups return the first.
    ///
    /// A tag whose id is already present is refused with a warning and the
    /// collection stays unchanged.
    pub fn add(&mut self, tag: Tag) {
        self.insert(tag);
    }

    /// Validate a draft, give it a fresh id and append it
    pub fn create(&mut self, draft: TagDraft) -> Result<&Tag> {
        let tag = draft.into_tag()?;
        let id = tag.id.clone();
        if !self.insert(tag) {
            bail!("Tag id {} already exists", id);
        }
        let index = self.tags.len() - 1;
        Ok(&self.tags[index])
    }

    /// Replace every tag with `id` by `tag`. Unknown ids leave the collection unchanged.
    pub fn update(&mut self, id: &str, tag: Tag) {
        let mut replaced = 0;
        for existing in self.tags.iter_mut().filter(|existing| existing.id == id) {
            *existing = tag.clone();
            replaced += 1;
        }
        if replaced == 0 {
            debug!("No tag with id {} to update", id);
        }
        self.persist();
    }

    /// Remove the tag with `id`, no-op when absent
    pub fn delete(&mut self, id: &str) {
        self.tags.retain(|tag| tag.id != id);
        self.persist();
    }

    pub fn get(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Tag> {
        find_tag_by_name(&self.tags, name)
    }

    fn insert(&mut self, tag: Tag) -> bool {
        if self.get(&tag.id).is_some() {
            warn!("Refusing to add tag {}: id {} is already in use", tag.name, tag.id);
            return false;
        }
        self.tags.push(tag);
        self.persist();
        true
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.tags) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize tags: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(TAGS_STORAGE_KEY, &json) {
            warn!("Failed to persist tags: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn stored_tags(registry: &TagRegistry<MemoryStore>) -> Vec<Tag> {
        let json = registry.store().get(TAGS_STORAGE_KEY).unwrap().expect("tags persisted");
        serde_json::from_str(&json).unwrap()
    }

    fn empty_registry() -> TagRegistry<MemoryStore> {
        TagRegistry::initialize(MemoryStore::with_value(TAGS_STORAGE_KEY, "[]"))
    }

    /// Store that reads nothing and refuses every write
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            bail!("storage unavailable")
        }
    }

    /// Store whose reads fail
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            bail!("disk on fire")
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_initialize_without_stored_value_seeds_defaults() {
        let registry = TagRegistry::initialize(MemoryStore::new());
        assert_eq!(registry.list(), default_tags().as_slice());
        assert_eq!(stored_tags(&registry), default_tags());
    }

    #[test]
    fn test_initialize_with_corrupt_value_seeds_defaults() {
        let store = MemoryStore::with_value(TAGS_STORAGE_KEY, "{not json");
        let registry = TagRegistry::initialize(store);
        assert_eq!(registry.list(), default_tags().as_slice());
        assert_eq!(stored_tags(&registry), default_tags());
    }

    #[test]
    fn test_initialize_with_wrong_shape_seeds_defaults() {
        let store = MemoryStore::with_value(TAGS_STORAGE_KEY, r#"[{"id":"1","name":"x"}]"#);
        let registry = TagRegistry::initialize(store);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_initialize_keeps_empty_stored_collection() {
        let registry = empty_registry();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_initialize_read_failure_seeds_defaults() {
        let registry = TagRegistry::initialize(BrokenStore);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_add_preserves_order_and_persists() {
        let mut registry = empty_registry();
        registry.add(Tag::new("a", "Alpha", "#FFCCCC", 1, &[]));
        registry.add(Tag::new("b", "Beta", "#CCE5FF", 2, &[]));

        let names: Vec<_> = registry.list().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
        assert_eq!(stored_tags(&registry), registry.list());
    }

    #[test]
    fn test_add_allows_duplicate_names_first_wins() {
        let mut registry = empty_registry();
        registry.add(Tag::new("a", "Client", "#FFCCCC", 1, &[]));
        registry.add(Tag::new("b", "client", "#CCE5FF", 2, &[]));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find_by_name("CLIENT").unwrap().id, "a");
    }

    #[test]
    fn test_update_replaces_whole_record() {
        let mut registry = TagRegistry::initialize(MemoryStore::new());
        let replacement = Tag::new("2", "Customer", "#CCFFCC", 1, &[]);
        registry.update("2", replacement.clone());

        assert_eq!(registry.get("2"), Some(&replacement));
        assert_eq!(registry.list()[1], replacement);
        assert_eq!(registry.list()[0].name, "Urgent");
        assert_eq!(stored_tags(&registry), registry.list());
    }

    #[test]
    fn test_add_refuses_duplicate_id() {
        let mut registry = TagRegistry::initialize(MemoryStore::new());
        registry.add(Tag::new("1", "Dup", "#CCFFCC", 2, &[]));

        let ids: Vec<_> = registry.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(registry.get("1").unwrap().name, "Urgent");
        assert_eq!(stored_tags(&registry), default_tags());
    }

    #[test]
    fn test_update_replaces_every_tag_with_id() {
        let store = MemoryStore::with_value(
            TAGS_STORAGE_KEY,
            r##"[{"id":"1","name":"A","color":"#FFCCCC","priority":1,"rules":[]},
                {"id":"2","name":"B","color":"#FFCCCC","priority":1,"rules":[]},
                {"id":"1","name":"C","color":"#FFCCCC","priority":1,"rules":[]}]"##,
        );
        let mut registry = TagRegistry::initialize(store);
        registry.update("1", Tag::new("1", "Replaced", "#CCE5FF", 2, &[]));

        let names: Vec<_> = registry.list().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Replaced", "B", "Replaced"]);
        assert_eq!(stored_tags(&registry), registry.list());
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut registry = TagRegistry::initialize(MemoryStore::new());
        registry.update("missing", Tag::new("missing", "Ghost", "#000000", 1, &[]));
        assert_eq!(registry.list(), default_tags().as_slice());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut registry = TagRegistry::initialize(MemoryStore::new());
        registry.delete("3");
        let once = registry.list().to_vec();
        registry.delete("3");

        assert_eq!(registry.list(), once.as_slice());
        assert_eq!(registry.len(), 4);
        assert!(registry.find_by_name("Follow-up").is_none());
        assert_eq!(stored_tags(&registry), once);
    }

    #[test]
    fn test_find_by_name_case_insensitive() {
        let registry = TagRegistry::initialize(MemoryStore::new());
        assert_eq!(registry.find_by_name("urgent").unwrap().id, "1");
        assert_eq!(registry.find_by_name("MEETING").unwrap().id, "4");
        assert!(registry.find_by_name("Budget").is_none());
    }

    #[test]
    fn test_create_assigns_id_and_persists() {
        let mut registry = empty_registry();
        let id = registry.create(TagDraft::new("Invoices")).unwrap().id.clone();

        assert_eq!(registry.find_by_name("invoices").unwrap().id, id);
        assert_eq!(stored_tags(&registry).len(), 1);
    }

    #[test]
    fn test_create_rejects_invalid_draft_without_change() {
        let mut registry = empty_registry();
        assert!(registry.create(TagDraft::new(" ")).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_mutations_survive_store_write_failure() {
        let mut registry = TagRegistry::initialize(ReadOnlyStore);
        assert_eq!(registry.len(), 5);

        registry.add(Tag::new("6", "Travel", "#CCFFCC", 2, &[]));
        registry.delete("1");

        assert_eq!(registry.len(), 5);
        assert!(registry.find_by_name("travel").is_some());
        assert!(registry.find_by_name("urgent").is_none());
    }
}
