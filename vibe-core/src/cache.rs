use std::{
    hash::Hash,
    num::NonZeroUsize,
    time::{Duration, Instant},
};

use lru::LruCache;
use parking_lot::Mutex;

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// In-memory response cache.  Entries older than `ttl` are treated as absent
/// and evicted on lookup.
pub struct QueryCache<K: Hash + Eq, V> {
    entries: Mutex<LruCache<K, Entry<V>>>,
    ttl: Duration,
}

impl<K: Hash + Eq, V: Clone> QueryCache<K, V> {
    pub const DEFAULT_CAPACITY: usize = 128;

    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let mut entries = self.entries.lock();
        let fresh = entries
            .get(key)
            .map(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)?;
        if fresh {
            entries.get(key).map(|entry| entry.value.clone())
        } else {
            entries.pop(key);
            None
        }
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn insert_at(&self, key: K, value: V, now: Instant) {
        self.entries.lock().put(
            key,
            Entry {
                value,
                stored_at: now,
            },
        );
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_expire_after_ttl() {
        let t0 = Instant::now();
        let cache = QueryCache::new(4, Duration::from_secs(300));
        cache.insert_at("brands", 1, t0);
        assert_eq!(cache.get_at(&"brands", t0 + Duration::from_secs(299)), Some(1));
        assert_eq!(cache.get_at(&"brands", t0 + Duration::from_secs(300)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn least_recently_used_entry_is_evicted() {
        let t0 = Instant::now();
        let cache = QueryCache::new(2, Duration::from_secs(60));
        cache.insert_at("a", 1, t0);
        cache.insert_at("b", 2, t0);
        assert_eq!(cache.get_at(&"a", t0), Some(1));
        cache.insert_at("c", 3, t0);
        assert_eq!(cache.get_at(&"b", t0), None);
        assert_eq!(cache.get_at(&"a", t0), Some(1));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn zero_ttl_never_hits() {
        let cache = QueryCache::new(2, Duration::ZERO);
        cache.insert("a", 1);
        assert_eq!(cache.get(&"a"), None);
    }
}
