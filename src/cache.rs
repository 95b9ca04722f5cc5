//! Time-bounded memo table.
//!
//! Entries expire a fixed duration after insertion regardless of how often
//! they are read. There is no size bound: expected key cardinality is a
//! handful of (query, limit) pairs per process, and an expired entry is simply
//! overwritten by the next insert for the same key.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, (Instant, V)>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns a copy of a live entry; expired entries read as absent.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries
            .get(key)
            .filter(|(inserted_at, _)| inserted_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, (Instant::now(), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test(start_paused = true)]
    async fn returns_value_within_window() {
        let mut cache = TtlCache::new(HOUR);
        cache.insert("rag", vec![1, 2, 3]);

        tokio::time::advance(Duration::from_secs(3599)).await;

        assert_eq!(cache.get(&"rag"), Some(vec![1, 2, 3]));
    }

    #[tokio::test(start_paused = true)]
    async fn expires_after_window() {
        let mut cache = TtlCache::new(HOUR);
        cache.insert("rag", 1);

        tokio::time::advance(HOUR).await;

        assert_eq!(cache.get(&"rag"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn reinsert_restarts_window() {
        let mut cache = TtlCache::new(HOUR);
        cache.insert("rag", 1);
        tokio::time::advance(HOUR).await;

        cache.insert("rag", 2);
        tokio::time::advance(Duration::from_secs(60)).await;

        assert_eq!(cache.get(&"rag"), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_ttl_never_hits() {
        let mut cache = TtlCache::new(Duration::ZERO);
        cache.insert("rag", 1);

        assert_eq!(cache.get(&"rag"), None);
    }

    #[test]
    fn keys_are_independent() {
        let mut cache = TtlCache::new(HOUR);
        cache.insert(("rag".to_string(), 3u8), "three");
        cache.insert(("rag".to_string(), 5u8), "five");

        assert_eq!(cache.get(&("rag".to_string(), 3)), Some("three"));
        assert_eq!(cache.get(&("rag".to_string(), 5)), Some("five"));
        assert_eq!(cache.get(&("time series".to_string(), 3)), None);
    }
}
