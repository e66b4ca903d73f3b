//! Immutable name → ID index built by draining a paginated listing.

use crate::error::Result;
use crate::pages::{PageFn, PageWalker};
use crate::retry::RetryPolicy;
use std::collections::HashMap;

/// Trim and lowercase: the comparison format shared by index construction
/// and lookups.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Name → ID lookup table for one resource kind.
///
/// Built once, before being published for concurrent reads; never written
/// afterwards, so lookups need no locking.
pub struct NameIndex {
    ids: HashMap<String, u32>,
}

impl NameIndex {
    /// Drain the listing to completion and build the index.
    ///
    /// A batch failure (after retries) fails the build as a whole; no
    /// partially built index is ever observable.
    pub async fn build(batch: PageFn, retry: RetryPolicy, page_size: u32) -> Result<Self> {
        let mut walker = PageWalker::new(batch, retry, page_size);
        let mut ids = HashMap::new();
        while let Some(entry) = walker.next_entry().await? {
            let name = normalize(&entry.name);
            if let Some(previous) = ids.insert(name.clone(), entry.id) {
                // Upstream data-quality problem; the newest entry wins.
                tracing::warn!(name = %name, previous, id = entry.id, "duplicate name in listing");
            }
        }
        tracing::info!(entries = ids.len(), "built name index");
        Ok(Self { ids })
    }

    /// Look up the ID for `name`, normalizing the query first.
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.ids.get(&normalize(name)).copied()
    }

    /// Whether `name` is already a known entry. Handlers use this as the
    /// gate in front of spelling suggestion.
    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(&normalize(name))
    }

    /// The normalized names, e.g. as the dictionary for a
    /// [`crate::suggest::SpellingSuggester`].
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
