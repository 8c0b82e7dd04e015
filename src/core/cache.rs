//! In-memory response cache with per-entry TTL.
//!
//! Entries are keyed by the request key (`GET:<endpoint>`) and bounded by an
//! LRU so a long-running session cannot grow without limit. Expired entries
//! are dropped lazily on lookup and eagerly by [`ResponseCache::sweep_expired`].

use lru::LruCache;
use serde::Serialize;
use serde_json::Value;
use std::{
    num::NonZeroUsize,
    time::{Duration, Instant},
};
use tracing::debug;

/// A cached payload and the moment it stops being valid.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: Value,
    pub cached_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(payload: Value, ttl: Duration) -> Self {
        Self {
            payload,
            cached_at: Instant::now(),
            ttl,
        }
    }

    /// An entry is valid strictly before `cached_at + ttl`.
    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() >= self.ttl
    }

    pub fn time_until_expiry(&self) -> Duration {
        self.ttl.saturating_sub(self.cached_at.elapsed())
    }
}

/// Snapshot reported by `cache_stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub keys: Vec<String>,
}

pub struct ResponseCache {
    entries: LruCache<String, CacheEntry>,
}

impl ResponseCache {
    /// Create a cache holding at most `capacity` entries (minimum one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Return a still-valid payload, evicting the entry if it has expired.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                debug!(key, remaining = ?entry.time_until_expiry(), "cache hit");
                return Some(entry.payload.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!(key, "cache entry expired");
            self.entries.pop(key);
        }
        None
    }

    /// Insert or overwrite an entry.
    pub fn put(&mut self, key: impl Into<String>, payload: Value, ttl: Duration) {
        self.entries.put(key.into(), CacheEntry::new(payload, ttl));
    }

    /// Drop one entry; returns whether it was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.pop(key).is_some()
    }

    /// Remove every expired entry and return how many were dropped.
    pub fn sweep_expired(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.pop(key);
        }
        expired.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Sweep, then describe what is left.
    pub fn stats(&mut self) -> CacheStats {
        self.sweep_expired();
        let mut keys: Vec<String> = self.entries.iter().map(|(k, _)| k.clone()).collect();
        keys.sort();
        CacheStats {
            entries: keys.len(),
            capacity: self.capacity(),
            keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_put_and_get_within_ttl() {
        let mut cache = ResponseCache::new(10);
        cache.put("GET:/standings?year=2024", json!({"records": []}), HOUR);

        assert_eq!(
            cache.get("GET:/standings?year=2024"),
            Some(json!({"records": []}))
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_ttl_is_already_expired() {
        let mut cache = ResponseCache::new(10);
        cache.put("GET:/mlb-news", json!([1, 2, 3]), Duration::ZERO);

        assert_eq!(cache.get("GET:/mlb-news"), None);
        // The expired entry is evicted on lookup
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_overwrites_existing_entry() {
        let mut cache = ResponseCache::new(10);
        cache.put("k", json!(1), HOUR);
        cache.put("k", json!(2), HOUR);

        assert_eq!(cache.get("k"), Some(json!(2)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let mut cache = ResponseCache::new(10);
        cache.put("fresh", json!("a"), HOUR);
        cache.put("stale-1", json!("b"), Duration::ZERO);
        cache.put("stale-2", json!("c"), Duration::ZERO);

        assert_eq!(cache.sweep_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("fresh"), Some(json!("a")));
    }

    #[test]
    fn test_invalidate_and_clear() {
        let mut cache = ResponseCache::new(10);
        cache.put("a", json!(1), HOUR);
        cache.put("b", json!(2), HOUR);

        assert!(cache.invalidate("a"));
        assert!(!cache.invalidate("a"));
        assert_eq!(cache.get("a"), None);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_bound_evicts_least_recent() {
        let mut cache = ResponseCache::new(2);
        cache.put("a", json!(1), HOUR);
        cache.put("b", json!(2), HOUR);
        // Touch "a" so "b" becomes least recently used
        assert!(cache.get("a").is_some());
        cache.put("c", json!(3), HOUR);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("b"), None);
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_zero_capacity_is_clamped_to_one() {
        let cache = ResponseCache::new(0);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn test_stats_sweeps_and_sorts_keys() {
        let mut cache = ResponseCache::new(5);
        cache.put("GET:/b", json!(1), HOUR);
        cache.put("GET:/a", json!(1), HOUR);
        cache.put("GET:/gone", json!(1), Duration::ZERO);

        let stats = cache.stats();
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.capacity, 5);
        assert_eq!(stats.keys, vec!["GET:/a".to_string(), "GET:/b".to_string()]);
    }

    #[test]
    fn test_entry_time_until_expiry() {
        let entry = CacheEntry::new(json!(null), HOUR);
        assert!(!entry.is_expired());
        assert!(entry.time_until_expiry() <= HOUR);
        assert!(entry.time_until_expiry() > Duration::from_secs(3500));
    }
}
