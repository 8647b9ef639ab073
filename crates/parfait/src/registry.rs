// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! Tiered registry composing an ordered list of backend registries.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parfait_backend::{BackendRegistry, DynamicCache, DynamicCacheExt, DynamicRegistry};
use parking_lot::RwLock;

use crate::cache::TieredCache;

/// A registry that serves tiered caches over an ordered list of backend
/// registries, fastest first.
///
/// A name resolves while at least one backend registry exposes a cache under
/// it. The resolved [`TieredCache`] spans every backend registry, including
/// ones that do not expose the name yet: tiers bind at call time, so a backend
/// registered later simply starts participating.
///
/// Facades are memoized per name, and clones of the registry share the same
/// memo and backing list. Memo entries are never evicted, not even when a
/// name stops resolving, so the table grows with the number of distinct
/// names ever resolved; entries are two `Arc` handles each, so this only
/// matters for callers resolving unbounded sets of names.
///
/// # Examples
///
/// ```
/// use parfait::{BackendRegistry, DynamicRegistryExt, TieredRegistry};
/// use parfait_memory::{InMemoryCache, InMemoryRegistry};
///
/// let l1 = InMemoryRegistry::new();
/// l1.register(InMemoryCache::<String, i32>::new("users"));
/// let l2 = InMemoryRegistry::new();
/// l2.register(InMemoryCache::<String, i32>::new("sessions"));
///
/// let registry = TieredRegistry::new([l1.into_dynamic(), l2.into_dynamic()]);
///
/// assert!(registry.cache("users").is_some());
/// assert!(registry.cache("sessions").is_some());
/// assert!(registry.cache("missing").is_none());
/// assert_eq!(registry.cache_names().len(), 2);
/// ```
pub struct TieredRegistry<K, V> {
    registries: Arc<[DynamicRegistry<K, V>]>,
    caches: Arc<RwLock<HashMap<String, TieredCache<K, V>>>>,
}

impl<K, V> Clone for TieredRegistry<K, V> {
    fn clone(&self) -> Self {
        Self {
            registries: Arc::clone(&self.registries),
            caches: Arc::clone(&self.caches),
        }
    }
}

impl<K, V> std::fmt::Debug for TieredRegistry<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieredRegistry")
            .field("tiers", &self.registries.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> TieredRegistry<K, V> {
    /// Creates a tiered registry over the given backend registries, fastest
    /// first.
    #[must_use]
    pub fn new(registries: impl IntoIterator<Item = DynamicRegistry<K, V>>) -> Self {
        Self {
            registries: registries.into_iter().collect(),
            caches: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Resolves the tiered cache for `name`.
    ///
    /// Returns `None` while no backend registry exposes a cache under `name`.
    /// Exposure is re-checked on every call, so a name stops resolving when
    /// its last backend is deregistered and resolves again once one returns.
    #[must_use]
    pub fn cache(&self, name: &str) -> Option<TieredCache<K, V>> {
        if !self.registries.iter().any(|registry| registry.get_cache(name).is_some()) {
            return None;
        }

        if let Some(cache) = self.caches.read().get(name) {
            return Some(cache.clone());
        }

        let mut caches = self.caches.write();
        let cache = caches.entry(name.to_owned()).or_insert_with(|| {
            tracing::debug!(cache = name, tiers = self.registries.len(), "building tiered cache");
            TieredCache::with_shared(Arc::from(name), Arc::clone(&self.registries))
        });
        Some(cache.clone())
    }
}

impl<K, V> BackendRegistry<K, V> for TieredRegistry<K, V>
where
    K: Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get_cache(&self, name: &str) -> Option<DynamicCache<K, V>> {
        self.cache(name).map(DynamicCacheExt::into_dynamic)
    }

    /// Returns the union of the names every backend registry exposes.
    fn cache_names(&self) -> HashSet<String> {
        self.registries.iter().flat_map(|registry| registry.cache_names()).collect()
    }
}
