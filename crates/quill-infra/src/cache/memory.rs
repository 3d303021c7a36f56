//! In-memory cache - memoises derived values such as tables of contents.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::ports::{Cache, CacheError};

/// Entries kept before the oldest are evicted.
pub const DEFAULT_CAPACITY: usize = 1024;

struct CacheEntry {
    value: String,
    inserted_at: Instant,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|exp| now > exp)
    }
}

/// Bounded in-memory cache using a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryCache {
    store: RwLock<HashMap<String, CacheEntry>>,
    capacity: usize,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    fn evict(store: &mut HashMap<String, CacheEntry>, capacity: usize) {
        let now = Instant::now();
        store.retain(|_, entry| !entry.is_expired(now));

        while store.len() >= capacity {
            let Some(oldest) = store
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            store.remove(&oldest);
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read().await;
        let entry = store.get(key)?;

        if entry.is_expired(Instant::now()) {
            drop(store);
            self.store.write().await.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        if !store.contains_key(key) {
            Self::evict(&mut store, self.capacity);
        }

        let now = Instant::now();
        store.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                inserted_at: now,
                expires_at: ttl.map(|d| now + d),
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new();
        cache.set("toc:1", "[]", None).await.unwrap();
        assert_eq!(cache.get("toc:1").await, Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = InMemoryCache::new();
        cache.set("toc:1", "[]", None).await.unwrap();
        cache.delete("toc:1").await.unwrap();
        assert_eq!(cache.get("toc:1").await, None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_dropped() {
        let cache = InMemoryCache::new();
        cache
            .set("short", "v", Some(Duration::from_millis(1)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(cache.get("short").await, None);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_oldest_entry_evicted_at_capacity() {
        let cache = InMemoryCache::with_capacity(2);
        cache.set("a", "1", None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.set("b", "2", None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.set("c", "3", None).await.unwrap();

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("c").await, Some("3".to_string()));
    }
}
