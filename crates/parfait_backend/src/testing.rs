// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! Mock backend implementations for testing.
//!
//! This module provides [`MockBackend`], a configurable in-memory cache that
//! records all operations and supports failure injection for testing error
//! paths, and [`MockRegistry`], a registry whose named caches can be added
//! and removed while a tiered cache is live.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    BackendCache, BackendRegistry, CacheEntry, DynamicCache, DynamicCacheExt, Error, NativeHandle, ValueLoader,
};

/// Recorded cache operation with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOp<K, V> {
    /// A get operation was performed with the given key.
    Get(K),
    /// A get-or-load operation was performed with the given key.
    GetOrLoad(K),
    /// A put operation was performed with the given key and entry.
    Put {
        /// The key that was written.
        key: K,
        /// The cache entry that was written.
        entry: CacheEntry<V>,
    },
    /// An evict operation was performed with the given key.
    Evict(K),
    /// A clear operation was performed.
    Clear,
}

type FailPredicate<K, V> = Box<dyn Fn(&CacheOp<K, V>) -> bool + Send + Sync>;

/// A configurable mock cache backend for testing.
///
/// This backend stores values in memory and can be configured to fail
/// operations on demand, making it useful for testing error handling paths.
/// All operations are recorded for later verification, so tests can assert
/// not only what a tiered cache returned but which tiers it touched.
///
/// # Failure Injection
///
/// ```no_run
/// use parfait_backend::testing::{CacheOp, MockBackend};
/// use parfait_backend::BackendCache;
///
/// # async fn example() {
/// let cache: MockBackend<String, i32> = MockBackend::new("users");
///
/// // Fail all get operations
/// cache.fail_when(|op| matches!(op, CacheOp::Get(_)));
/// assert!(cache.get(&"key".to_string()).await.is_err());
/// # }
/// ```
pub struct MockBackend<K, V> {
    name: Arc<str>,
    data: Arc<Mutex<HashMap<K, CacheEntry<V>>>>,
    operations: Arc<Mutex<Vec<CacheOp<K, V>>>>,
    fail_when: Arc<Mutex<Option<FailPredicate<K, V>>>>,
}

impl<K, V> std::fmt::Debug for MockBackend<K, V>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend")
            .field("name", &self.name)
            .field("data", &self.data)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .finish()
    }
}

impl<K, V> Clone for MockBackend<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            data: Arc::clone(&self.data),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
        }
    }
}

impl<K, V> MockBackend<K, V> {
    /// Creates a new empty mock backend serving the given logical cache name.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            data: Arc::new(Mutex::new(HashMap::new())),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }
}

impl<K, V> MockBackend<K, V>
where
    K: Eq + Hash,
{
    /// Creates a mock backend with pre-populated data.
    #[must_use]
    pub fn with_data(name: impl Into<Arc<str>>, data: HashMap<K, CacheEntry<V>>) -> Self {
        Self {
            name: name.into(),
            data: Arc::new(Mutex::new(data)),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the number of entries in the backend.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data.lock().len()
    }

    /// Returns true if the backend contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.data.lock().contains_key(key)
    }
}

impl<K, V> MockBackend<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Reads an entry directly without recording a get operation.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<CacheEntry<V>> {
        self.data.lock().get(key).cloned()
    }
}

impl<K, V> MockBackend<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Sets a predicate that determines when operations should fail.
    ///
    /// The predicate receives the operation and returns `true` if it should
    /// fail. Failed operations are still recorded but leave the stored data
    /// untouched.
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&CacheOp<K, V>) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<CacheOp<K, V>> {
        self.operations.lock().clone()
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    fn record(&self, op: CacheOp<K, V>) {
        self.operations.lock().push(op);
    }

    fn should_fail(&self, op: &CacheOp<K, V>) -> bool {
        self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(op))
    }
}

impl<K, V> BackendCache<K, V> for MockBackend<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &K) -> Result<Option<CacheEntry<V>>, Error> {
        let op = CacheOp::Get(key.clone());
        let failed = self.should_fail(&op);
        self.record(op);
        if failed {
            return Err(Error::from_message("mock: get failed"));
        }
        Ok(self.data.lock().get(key).cloned())
    }

    async fn get_or_load(&self, key: &K, loader: ValueLoader<V>) -> Result<CacheEntry<V>, Error> {
        let op = CacheOp::GetOrLoad(key.clone());
        let failed = self.should_fail(&op);
        self.record(op);
        if failed {
            return Err(Error::from_message("mock: get_or_load failed"));
        }
        let existing = self.data.lock().get(key).cloned();
        if let Some(entry) = existing {
            return Ok(entry);
        }
        let entry = CacheEntry::new(loader.load().await?);
        self.data.lock().insert(key.clone(), entry.clone());
        Ok(entry)
    }

    async fn put(&self, key: &K, entry: CacheEntry<V>) -> Result<(), Error> {
        let op = CacheOp::Put {
            key: key.clone(),
            entry: entry.clone(),
        };
        let failed = self.should_fail(&op);
        self.record(op);
        if failed {
            return Err(Error::from_message("mock: put failed"));
        }
        self.data.lock().insert(key.clone(), entry);
        Ok(())
    }

    async fn evict(&self, key: &K) -> Result<(), Error> {
        let op = CacheOp::Evict(key.clone());
        let failed = self.should_fail(&op);
        self.record(op);
        if failed {
            return Err(Error::from_message("mock: evict failed"));
        }
        self.data.lock().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), Error> {
        let op = CacheOp::Clear;
        let failed = self.should_fail(&op);
        self.record(op);
        if failed {
            return Err(Error::from_message("mock: clear failed"));
        }
        self.data.lock().clear();
        Ok(())
    }

    fn native_handle(&self) -> Option<NativeHandle> {
        Some(Arc::new(self.clone()))
    }

    fn len(&self) -> Option<u64> {
        Some(self.data.lock().len() as u64)
    }
}

/// A mutable registry of mock caches for testing.
///
/// Caches can be registered and deregistered while tiered caches built over
/// this registry are live, which makes it easy to exercise the call-time
/// resolution behavior of the tiered facade.
pub struct MockRegistry<K, V> {
    caches: Arc<Mutex<HashMap<String, DynamicCache<K, V>>>>,
}

impl<K, V> std::fmt::Debug for MockRegistry<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRegistry").finish_non_exhaustive()
    }
}

impl<K, V> Clone for MockRegistry<K, V> {
    fn clone(&self) -> Self {
        Self {
            caches: Arc::clone(&self.caches),
        }
    }
}

impl<K, V> Default for MockRegistry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MockRegistry<K, V> {
    /// Creates a new empty mock registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            caches: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Registers a cache under its own name, replacing any previous one.
    pub fn register<C>(&self, cache: C)
    where
        C: BackendCache<K, V> + 'static,
    {
        let name = cache.name().to_owned();
        self.caches.lock().insert(name, cache.into_dynamic());
    }

    /// Removes the cache registered under `name`, returning whether one existed.
    pub fn deregister(&self, name: &str) -> bool {
        self.caches.lock().remove(name).is_some()
    }
}

impl<K, V> BackendRegistry<K, V> for MockRegistry<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
    fn get_cache(&self, name: &str) -> Option<DynamicCache<K, V>> {
        self.caches.lock().get(name).cloned()
    }

    fn cache_names(&self) -> HashSet<String> {
        self.caches.lock().keys().cloned().collect()
    }
}
