//! In-memory device document cache.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

use crate::device::space::DeviceKey;

/// A parsed device document. Shared read-only between the cache and readers.
pub type DeviceDocument = Arc<Value>;

/// A thread-safe, write-once, read-many cache for one target space.
///
/// Entries are never evicted. Invalidation happens by replacing the whole
/// cache (see [`Catalog`](crate::device::Catalog)).
#[derive(Debug, Default)]
pub struct DeviceCache {
    inner: DashMap<DeviceKey, DeviceDocument>,
}

impl DeviceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &DeviceKey) -> Option<DeviceDocument> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    /// Store a document. A concurrent insert for the same key simply wins
    /// last; both callers hold an identical parse of the same file.
    pub fn insert(&self, key: DeviceKey, document: DeviceDocument) {
        self.inner.insert(key, document);
    }

    pub fn contains(&self, key: &DeviceKey) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_operations() {
        let cache = DeviceCache::new();
        let key = DeviceKey::new("d94ap");

        assert!(cache.get(&key).is_none());

        cache.insert(key.clone(), Arc::new(json!({"chips": {"soc": "A17"}})));
        let doc = cache.get(&key).unwrap();
        assert_eq!(doc["chips"]["soc"], "A17");
        assert_eq!(cache.len(), 1);

        // Overwrite keeps a single entry.
        cache.insert(key.clone(), Arc::new(json!({"chips": {"soc": "A18"}})));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key).unwrap()["chips"]["soc"], "A18");
    }

    #[test]
    fn test_concurrent_inserts_do_not_corrupt() {
        let cache = Arc::new(DeviceCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        cache.insert(DeviceKey::new("d94ap"), Arc::new(json!({"soc": "A17"})));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&DeviceKey::new("D94AP")).unwrap()["soc"], "A17");
    }
}
