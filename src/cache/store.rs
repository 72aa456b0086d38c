//! Memo Store Module
//!
//! Owned HashMap storage for memoized results with lazy TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::CacheEntry;

// == Memo Store ==
/// Storage for the results of one memoized function.
#[derive(Debug)]
pub struct MemoStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Generation handed to the next inserted entry
    next_generation: u64,
}

impl<V> MemoStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_generation: 0,
        }
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// Presence is decided by the entry alone, never by the value, so any
    /// stored result (including `None` or `()`) counts as a hit. An entry
    /// past its deadline is removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let entry = self.entries.get(key)?;

        if entry.is_expired() {
            self.entries.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    // == Insert ==
    /// Stores a value that stays valid for `ttl`.
    ///
    /// An existing entry under the same key is replaced. Returns the
    /// generation of the new entry, to be handed to [`MemoStore::expire`].
    pub fn insert(&mut self, key: String, value: V, ttl: Duration) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;

        self.entries.insert(key, CacheEntry::new(value, ttl, generation));
        generation
    }

    // == Expire ==
    /// Removes `key` if it still holds the entry of `generation`.
    ///
    /// Returns true if an entry was removed. A newer entry stored under the
    /// same key is left alone.
    pub fn expire(&mut self, key: &str, generation: u64) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.generation == generation => {
                self.entries.remove(key);
                true
            }
            _ => false,
        }
    }

    // == Length ==
    /// Returns the number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Cleanup Expired ==
    /// Removes every entry past its deadline.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for MemoStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_millis(1000);

    #[test]
    fn test_store_new() {
        let store: MemoStore<String> = MemoStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_insert_and_get() {
        let mut store = MemoStore::new();

        store.insert("key1".to_string(), "value1".to_string(), TTL);

        assert_eq!(store.get("key1").as_deref(), Some("value1"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_get_nonexistent() {
        let mut store: MemoStore<u32> = MemoStore::new();
        assert!(store.get("nonexistent").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_keeps_none_value() {
        let mut store: MemoStore<Option<u32>> = MemoStore::new();

        store.insert("key".to_string(), None, TTL);

        assert_eq!(store.get("key"), Some(None));
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_overwrite() {
        let mut store = MemoStore::new();

        let first = store.insert("key1".to_string(), 1, TTL);
        let second = store.insert("key1".to_string(), 2, TTL);

        assert_ne!(first, second);
        assert_eq!(store.get("key1"), Some(2));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_lazy_expiration() {
        let mut store = MemoStore::new();
        store.insert("key1".to_string(), 1, TTL);

        tokio::time::advance(Duration::from_millis(999)).await;
        assert_eq!(store.get("key1"), Some(1));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(store.get("key1"), None);
        assert!(store.is_empty(), "Expired entry should be removed on lookup");
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_cleanup_expired() {
        let mut store = MemoStore::new();
        store.insert("key1".to_string(), 1, TTL);
        store.insert("key2".to_string(), 2, TTL * 10);

        tokio::time::advance(TTL).await;

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("key2"), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_max_ttl() {
        let mut store = MemoStore::new();
        store.insert("key1".to_string(), 1, Duration::MAX);

        tokio::time::advance(TTL * 1000).await;

        assert_eq!(store.cleanup_expired(), 0);
        assert_eq!(store.get("key1"), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_expire_matching_generation() {
        let mut store = MemoStore::new();
        let generation = store.insert("key1".to_string(), 1, TTL);

        assert!(store.expire("key1", generation));
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_expire_ignores_newer_entry() {
        let mut store = MemoStore::new();
        let stale = store.insert("key1".to_string(), 1, TTL);
        store.insert("key1".to_string(), 2, TTL);

        assert!(!store.expire("key1", stale));
        assert_eq!(store.get("key1"), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_expire_only_touches_its_key() {
        let mut store = MemoStore::new();
        let generation = store.insert("key1".to_string(), 1, TTL);
        store.insert("key2".to_string(), 2, TTL);

        assert!(store.expire("key1", generation));
        assert!(!store.expire("missing", generation));
        assert_eq!(store.get("key2"), Some(2));
        assert_eq!(store.len(), 1);
    }
}
