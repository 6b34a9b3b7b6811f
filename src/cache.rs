// SPDX-License-Identifier: MPL-2.0
//! Bounded key-value memoization with optional time-based expiry.
//!
//! This module provides the one cache abstraction behind both the listing
//! cache (no expiry, cleared only on recycle) and the retrieval caches
//! (bounded with a TTL window).
//!
//! # Design
//!
//! - **LRU eviction**: least recently used entries are evicted first
//! - **Capacity-bounded**: a ceiling always exists, even when it is
//!   practically unreachable for the workload
//! - **Optional TTL**: entries older than the window are dropped on the
//!   next access and recomputed by the caller, regardless of whether the
//!   entry was used in between
//! - **Clone-out access**: values are cloned out of the cache; callers
//!   store `Arc<_>` for large payloads

use lru::LruCache;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    inserted: Instant,
}

/// Statistics about cache behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of lookups that found a live entry.
    pub hits: u64,

    /// Number of lookups that found nothing usable.
    pub misses: u64,

    /// Number of values inserted.
    pub insertions: u64,

    /// Number of entries evicted by the capacity bound.
    pub evictions: u64,

    /// Number of entries dropped because they outlived the TTL window.
    pub expirations: u64,
}

impl CacheStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Capacity-bounded memoization cache with optional TTL.
pub struct MemoCache<K, V> {
    entries: LruCache<K, Entry<V>>,
    ttl: Option<Duration>,
    stats: CacheStats,
}

impl<K: Hash + Eq, V: Clone> MemoCache<K, V> {
    /// Creates a cache bounded to `capacity` entries with no expiry.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            ttl: None,
            stats: CacheStats::default(),
        }
    }

    /// Creates a cache bounded to `capacity` entries whose entries expire
    /// `ttl` after insertion.
    #[must_use]
    pub fn with_ttl(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            entries: LruCache::new(capacity),
            ttl: Some(ttl),
            stats: CacheStats::default(),
        }
    }

    /// Looks up a value, updating LRU order on a hit.
    ///
    /// An entry older than the TTL window is dropped and reported as a
    /// miss, so the caller recomputes it exactly once.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let expired = match self.entries.peek(key) {
            None => {
                self.stats.misses += 1;
                return None;
            }
            Some(entry) => self
                .ttl
                .is_some_and(|ttl| entry.inserted.elapsed() >= ttl),
        };

        if expired {
            self.entries.pop(key);
            self.stats.expirations += 1;
            self.stats.misses += 1;
            return None;
        }

        self.stats.hits += 1;
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Inserts a value, evicting the least recently used entry when the
    /// cache is full. Re-inserting a key restarts its TTL window.
    pub fn insert(&mut self, key: K, value: V) {
        let replacing = self.entries.contains(&key);
        if !replacing && self.entries.len() == self.entries.cap().get() {
            self.stats.evictions += 1;
        }
        self.entries.put(
            key,
            Entry {
                value,
                inserted: Instant::now(),
            },
        );
        self.stats.insertions += 1;
    }

    /// Checks for a key without updating LRU order or expiring entries.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    /// Drops every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of stored entries, live or expired.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the configured TTL window, if any.
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Returns the current cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl<K: Hash + Eq, V> std::fmt::Debug for MemoCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap().get())
            .field("ttl", &self.ttl)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn capacity(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("test capacity must be non-zero")
    }

    #[test]
    fn new_cache_is_empty() {
        let cache: MemoCache<String, u32> = MemoCache::new(capacity(4));
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert!(cache.ttl().is_none());
    }

    #[test]
    fn insert_and_get_returns_value() {
        let mut cache = MemoCache::new(capacity(4));
        cache.insert("a", 1);
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn miss_is_counted() {
        let mut cache: MemoCache<&str, u32> = MemoCache::new(capacity(4));
        assert_eq!(cache.get(&"absent"), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn capacity_bound_evicts_least_recently_used() {
        let mut cache = MemoCache::new(capacity(2));
        cache.insert("a", 1);
        cache.insert("b", 2);
        // Touch "a" so "b" becomes the eviction candidate
        let _ = cache.get(&"a");
        cache.insert("c", 3);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn replacing_a_key_does_not_count_as_eviction() {
        let mut cache = MemoCache::new(capacity(2));
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 10);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), Some(10));
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn entry_older_than_ttl_expires_on_access() {
        let mut cache = MemoCache::with_ttl(capacity(4), Duration::from_millis(10));
        cache.insert("a", 1);
        sleep(Duration::from_millis(25));

        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.stats().expirations, 1);
        assert_eq!(cache.stats().misses, 1);
        assert!(!cache.contains(&"a"));

        // The caller recomputes once; the fresh entry is served again
        cache.insert("a", 2);
        assert_eq!(cache.get(&"a"), Some(2));
    }

    #[test]
    fn entry_younger_than_ttl_is_returned_unchanged() {
        let mut cache = MemoCache::with_ttl(capacity(4), Duration::from_secs(3600));
        cache.insert("a", 7);
        assert_eq!(cache.get(&"a"), Some(7));
        assert_eq!(cache.stats().expirations, 0);
    }

    #[test]
    fn cache_without_ttl_never_expires() {
        let mut cache = MemoCache::new(capacity(4));
        cache.insert("a", 1);
        sleep(Duration::from_millis(15));
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.stats().expirations, 0);
    }

    #[test]
    fn reinserting_restarts_the_ttl_window() {
        let mut cache = MemoCache::with_ttl(capacity(4), Duration::from_millis(40));
        cache.insert("a", 1);
        sleep(Duration::from_millis(25));
        cache.insert("a", 2);
        sleep(Duration::from_millis(25));

        // 50 ms after the first insert but only 25 ms after the second
        assert_eq!(cache.get(&"a"), Some(2));
    }

    #[test]
    fn clear_removes_all_entries() {
        let mut cache = MemoCache::new(capacity(4));
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn stats_track_hit_rate() {
        let mut cache = MemoCache::new(capacity(4));
        cache.insert("a", 1);
        let _ = cache.get(&"a");
        let _ = cache.get(&"absent");

        assert!((cache.stats().hit_rate() - 50.0).abs() < 0.01);
    }

    #[test]
    fn hit_rate_is_zero_without_lookups() {
        let cache: MemoCache<&str, u32> = MemoCache::new(capacity(4));
        assert_eq!(cache.stats().hit_rate(), 0.0);
    }
}
