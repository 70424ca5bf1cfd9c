//! In-memory TTL cache for transformed lookup results.
//!
//! Entries expire a fixed duration after insertion. Expiry is enforced two
//! ways: a stale entry is removed when a `get` touches it, and `set` sweeps
//! every expired entry once the total count exceeds the ceiling. The ceiling
//! is approximate (the cache can transiently exceed it between sweeps); this
//! is not an LRU.
//!
//! A single reader/writer lock guards the map: reads proceed in parallel,
//! a write excludes everything else. The cache is an owned component with an
//! explicit constructor; callers inject it (via its owner) rather than
//! reaching for global state.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use std::sync::RwLock;

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    max_entries: usize,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache whose entries expire `ttl` after insertion and which
    /// sweeps expired entries whenever a `set` pushes the count past
    /// `max_entries`.
    #[must_use]
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries,
        }
    }

    /// Look up a cached value. A hit requires `age < ttl`; an entry exactly
    /// at or past the boundary counts as a miss and is removed.
    pub fn get(&self, key: &str) -> Option<V> {
        {
            let entries = self.entries.read().expect("cache lock poisoned");
            match entries.get(key) {
                Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Stale: upgrade to the write lock and drop it.
        self.entries
            .write()
            .expect("cache lock poisoned")
            .remove(key);
        None
    }

    /// Insert or overwrite a value, stamped with the current time.
    ///
    /// When the entry count exceeds the ceiling afterwards, every expired
    /// entry is swept in one pass.
    pub fn set(&self, key: String, value: V) {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
        if entries.len() > self.max_entries {
            let swept_from = entries.len();
            entries.retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
            tracing::debug!(
                before = swept_from,
                after = entries.len(),
                "cache sweep completed"
            );
        }
    }

    /// Current entry count, including not-yet-swept stale entries.
    pub fn len(&self) -> usize {
        self.entries.read().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entry_hits() {
        let cache = TtlCache::new(Duration::from_secs(60), 100);
        cache.set("hello".to_string(), 1u32);
        assert_eq!(cache.get("hello"), Some(1));
        assert_eq!(cache.get("absent"), None);
    }

    #[test]
    fn overwrite_replaces_value() {
        let cache = TtlCache::new(Duration::from_secs(60), 100);
        cache.set("key".to_string(), 1u32);
        cache.set("key".to_string(), 2u32);
        assert_eq!(cache.get("key"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn entry_at_ttl_boundary_misses_and_is_removed() {
        // Zero TTL: every entry is already at the boundary when read.
        let cache = TtlCache::new(Duration::ZERO, 100);
        cache.set("stale".to_string(), 1u32);
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.get("stale"), None);
        assert_eq!(cache.len(), 0, "stale read removes the entry");
    }

    #[test]
    fn expired_entry_misses_after_sleep() {
        let cache = TtlCache::new(Duration::from_millis(10), 100);
        cache.set("brief".to_string(), 1u32);
        assert_eq!(cache.get("brief"), Some(1));

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get("brief"), None);
    }

    #[test]
    fn sweep_fires_only_past_the_ceiling() {
        let cache = TtlCache::new(Duration::ZERO, 2);

        // At or below the ceiling nothing is swept, even though everything
        // is already expired.
        cache.set("a".to_string(), 1u32);
        cache.set("b".to_string(), 2u32);
        assert_eq!(cache.len(), 2);

        // The third insert crosses the ceiling and sweeps all expired
        // entries, including itself (zero TTL).
        cache.set("c".to_string(), 3u32);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn sweep_keeps_fresh_entries() {
        let cache = TtlCache::new(Duration::from_secs(60), 2);
        cache.set("a".to_string(), 1u32);
        cache.set("b".to_string(), 2u32);
        cache.set("c".to_string(), 3u32);

        // All fresh: the sweep removes nothing, so the count transiently
        // exceeds the ceiling.
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn parallel_reads_share_the_lock() {
        use std::sync::Arc;

        let cache = Arc::new(TtlCache::new(Duration::from_secs(60), 100));
        cache.set("shared".to_string(), 7u32);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        assert_eq!(cache.get("shared"), Some(7));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
