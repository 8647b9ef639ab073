// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! Registry of named in-memory caches.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

use parfait_backend::{BackendCache, BackendRegistry, DynamicCache, DynamicCacheExt};
use parking_lot::RwLock;

use crate::cache::InMemoryCache;

/// A registry of named in-memory caches.
///
/// Caches are registered explicitly and looked up by their logical name.
/// Clones of the registry share the same underlying set of caches.
///
/// # Examples
///
/// ```
/// use parfait_backend::BackendRegistry;
/// use parfait_memory::{InMemoryCache, InMemoryRegistry};
///
/// let registry = InMemoryRegistry::new();
/// registry.register(InMemoryCache::<String, i32>::new("users"));
///
/// assert!(registry.get_cache("users").is_some());
/// assert!(registry.get_cache("sessions").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryRegistry<K, V> {
    caches: Arc<RwLock<HashMap<String, DynamicCache<K, V>>>>,
}

impl<K, V> InMemoryRegistry<K, V>
where
    K: Clone + Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            caches: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a cache under its logical name.
    ///
    /// A cache previously registered under the same name is replaced.
    pub fn register(&self, cache: InMemoryCache<K, V>) {
        let name = cache.name().to_owned();
        self.caches.write().insert(name, cache.into_dynamic());
    }

    /// Removes the cache registered under the given name, if any.
    pub fn deregister(&self, name: &str) -> Option<DynamicCache<K, V>> {
        self.caches.write().remove(name)
    }
}

impl<K, V> Default for InMemoryRegistry<K, V>
where
    K: Clone + Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BackendRegistry<K, V> for InMemoryRegistry<K, V>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn get_cache(&self, name: &str) -> Option<DynamicCache<K, V>> {
        self.caches.read().get(name).cloned()
    }

    fn cache_names(&self) -> HashSet<String> {
        self.caches.read().keys().cloned().collect()
    }
}
