// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! Integration tests for `BackendCache` trait default implementations and
//! dynamic erasure.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use parfait_backend::{
    BackendCache, CacheEntry, DynamicCacheExt, Error, Object, ObjectCacheExt, ValueLoader,
};

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

/// Minimal implementation that only provides required methods.
struct MinimalCache<K, V> {
    name: String,
    data: Mutex<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> MinimalCache<K, V> {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            data: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> BackendCache<K, V> for MinimalCache<K, V>
where
    K: Clone + Eq + std::hash::Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &K) -> Result<Option<CacheEntry<V>>, Error> {
        Ok(self.data.lock().expect("lock poisoned").get(key).cloned())
    }

    async fn get_or_load(&self, key: &K, loader: ValueLoader<V>) -> Result<CacheEntry<V>, Error> {
        let existing = self.data.lock().expect("lock poisoned").get(key).cloned();
        if let Some(entry) = existing {
            return Ok(entry);
        }
        let entry = CacheEntry::new(loader.load().await?);
        self.data.lock().expect("lock poisoned").insert(key.clone(), entry.clone());
        Ok(entry)
    }

    async fn put(&self, key: &K, entry: CacheEntry<V>) -> Result<(), Error> {
        self.data.lock().expect("lock poisoned").insert(key.clone(), entry);
        Ok(())
    }

    async fn evict(&self, key: &K) -> Result<(), Error> {
        self.data.lock().expect("lock poisoned").remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), Error> {
        self.data.lock().expect("lock poisoned").clear();
        Ok(())
    }
}

#[test]
fn default_native_handle_is_none() {
    let cache = MinimalCache::<String, i32>::new("minimal");
    assert!(cache.native_handle().is_none());
}

#[test]
fn default_len_and_is_empty_are_none() {
    let cache = MinimalCache::<String, i32>::new("minimal");
    assert_eq!(cache.len(), None);
    assert_eq!(cache.is_empty(), None);
}

#[test]
fn dynamic_cache_preserves_backend_behavior() {
    block_on(async {
        let cache = MinimalCache::<String, i32>::new("minimal").into_dynamic();

        assert_eq!(cache.name(), "minimal");
        assert!(cache.get(&"key".to_string()).await.expect("get failed").is_none());

        cache.put(&"key".to_string(), CacheEntry::new(9)).await.expect("put failed");
        let entry = cache
            .get(&"key".to_string())
            .await
            .expect("get failed")
            .expect("entry should exist");
        assert_eq!(*entry.value(), 9);

        cache.evict(&"key".to_string()).await.expect("evict failed");
        assert!(cache.get(&"key".to_string()).await.expect("get failed").is_none());
    });
}

#[test]
fn dynamic_cache_clones_share_state() {
    block_on(async {
        let cache = MinimalCache::<String, i32>::new("minimal").into_dynamic();
        let clone = cache.clone();

        cache.put(&"key".to_string(), CacheEntry::new(1)).await.expect("put failed");
        assert!(clone.get(&"key".to_string()).await.expect("get failed").is_some());

        clone.clear().await.expect("clear failed");
        assert!(cache.get(&"key".to_string()).await.expect("get failed").is_none());
    });
}

#[test]
fn get_or_load_skips_loader_when_value_is_cached() {
    block_on(async {
        let cache = MinimalCache::<String, i32>::new("minimal");
        let calls = Arc::new(AtomicUsize::new(0));

        let loader = |calls: &Arc<AtomicUsize>| {
            let calls = Arc::clone(calls);
            ValueLoader::new(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                7
            })
        };

        let entry = cache
            .get_or_load(&"key".to_string(), loader(&calls))
            .await
            .expect("get_or_load failed");
        assert_eq!(*entry.value(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let entry = cache
            .get_or_load(&"key".to_string(), loader(&calls))
            .await
            .expect("get_or_load failed");
        assert_eq!(*entry.value(), 7, "cached value should win over the loader");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    });
}

#[test]
fn get_as_narrows_object_values() {
    block_on(async {
        let cache = MinimalCache::<String, Object>::new("objects");

        cache
            .put(&"num".to_string(), CacheEntry::new(Object::new(42_u64)))
            .await
            .expect("put failed");

        let hit = cache.get_as::<u64>(&"num".to_string()).await.expect("get_as failed");
        assert_eq!(hit.as_deref(), Some(&42));

        let miss = cache.get_as::<u64>(&"absent".to_string()).await.expect("get_as failed");
        assert!(miss.is_none());

        let err = cache
            .get_as::<String>(&"num".to_string())
            .await
            .expect_err("wrong type should be an error");
        assert!(err.to_string().contains("String"));
    });
}
