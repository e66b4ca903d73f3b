//! Per-key coalescing cache with a sliding TTL.

use crate::error::Result;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

struct Entry<V> {
    value: V,
    touched: Instant,
}

/// One guarded slot per key. The loader runs while the slot is held, so
/// concurrent misses for the same key coalesce into a single load while
/// unrelated keys proceed independently.
type Slot<V> = Arc<tokio::sync::Mutex<Option<Entry<V>>>>;

/// Time-expiring cache in front of an async loader.
///
/// Expiry is sliding: every successful access resets the entry's countdown.
/// Eviction is access-triggered, nothing runs on a schedule: an expired
/// value is dropped when the next access for its key observes it, and a
/// key's (empty) slot itself stays in the map once created. The key space
/// is bounded by the upstream ID space, so slots are never reaped.
pub struct ResultCache<K, V> {
    ttl: Duration,
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> ResultCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Look up `key`, invoking `loader` on a miss or an expired entry.
    ///
    /// Loader failures are never stored; the caller gets the error and the
    /// next `get_with` for the same key loads independently.
    pub async fn get_with<F, Fut>(&self, key: K, loader: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let slot = self.slot(key);
        let mut guard = slot.lock().await;

        let now = Instant::now();
        if let Some(entry) = guard.as_mut() {
            if now.duration_since(entry.touched) < self.ttl {
                entry.touched = now;
                return Ok(entry.value.clone());
            }
            // Expired: drop the stale value before reloading so it cannot
            // outlive its TTL even if the reload fails.
            *guard = None;
        }

        let value = loader().await?;
        *guard = Some(Entry {
            value: value.clone(),
            touched: Instant::now(),
        });
        Ok(value)
    }

    // The outer lock is held only to find or insert the slot, never across
    // an await.
    fn slot(&self, key: K) -> Slot<V> {
        let mut slots = self.slots.lock().expect("cache slot map poisoned");
        slots.entry(key).or_default().clone()
    }
}
