// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! Tiered cache facade over an ordered list of backend registries.
//!
//! This module provides a cache that cascades reads across tiers ordered from
//! fastest to slowest, promotes hits into faster tiers, and broadcasts writes
//! to every tier.

use std::sync::Arc;

use parfait_backend::{
    BackendCache, BackendRegistry, CacheEntry, DynamicCache, DynamicRegistry, Error, NativeHandle,
    ValueLoader,
};

/// A cache that layers several backends behind a single logical name.
///
/// The cache is built from an ordered list of backend registries, fastest
/// first. A registry participates in an operation only while it exposes a
/// cache under this cache's name; registries that do not are skipped, so tiers
/// can come and go between calls.
///
/// Reads cascade: each tier is consulted in order and the first hit wins. The
/// hit is then copied into every faster tier that was consulted and missed, so
/// subsequent reads resolve earlier. Writes (`put`, `evict`, `clear`) are
/// broadcast to every participating tier in order.
///
/// Clones share the same tier list and are cheap.
///
/// # Examples
///
/// ```
/// use parfait::{BackendCache, CacheEntry, DynamicRegistryExt, TieredCache};
/// use parfait_memory::{InMemoryCache, InMemoryRegistry};
/// # futures::executor::block_on(async {
///
/// let l1 = InMemoryRegistry::new();
/// l1.register(InMemoryCache::<String, i32>::new("users"));
/// let l2 = InMemoryRegistry::new();
/// l2.register(InMemoryCache::<String, i32>::new("users"));
///
/// let cache = TieredCache::new("users", [l1.into_dynamic(), l2.into_dynamic()]);
///
/// cache.put(&"key".to_string(), CacheEntry::new(42)).await?;
/// let value = cache.get(&"key".to_string()).await?;
/// assert_eq!(*value.unwrap().value(), 42);
/// # Ok::<(), parfait::Error>(())
/// # });
/// ```
pub struct TieredCache<K, V> {
    name: Arc<str>,
    registries: Arc<[DynamicRegistry<K, V>]>,
}

impl<K, V> Clone for TieredCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            registries: Arc::clone(&self.registries),
        }
    }
}

impl<K, V> std::fmt::Debug for TieredCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieredCache")
            .field("name", &self.name)
            .field("tiers", &self.registries.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> TieredCache<K, V> {
    /// Creates a tiered cache over the given registries, fastest first.
    ///
    /// The registries are consulted lazily. A registry that does not expose a
    /// cache under `name` at the time of a call is skipped for that call, so
    /// it is fine to construct the facade before every backend is registered.
    #[must_use]
    pub fn new(
        name: impl Into<Arc<str>>,
        registries: impl IntoIterator<Item = DynamicRegistry<K, V>>,
    ) -> Self {
        Self {
            name: name.into(),
            registries: registries.into_iter().collect(),
        }
    }

    /// Creates a tiered cache sharing an already-built registry list.
    pub(crate) fn with_shared(name: Arc<str>, registries: Arc<[DynamicRegistry<K, V>]>) -> Self {
        Self { name, registries }
    }

    /// Returns the number of registries backing this cache.
    ///
    /// This counts configured registries, not the tiers currently exposing
    /// a cache under this name.
    #[must_use]
    pub fn tier_count(&self) -> usize {
        self.registries.len()
    }

    /// Resolves the fastest tier currently exposing this cache's name.
    fn first_tier(&self) -> Option<DynamicCache<K, V>> {
        self.registries.iter().find_map(|registry| registry.get_cache(&self.name))
    }
}

impl<K, V> TieredCache<K, V>
where
    K: Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Copies a hit into the faster tiers that missed before it was found.
    ///
    /// Promotion is best-effort: a tier that fails to accept the copy is
    /// logged and skipped, and the hit is still returned to the caller.
    async fn promote(&self, key: &K, entry: &CacheEntry<V>, missed: &[DynamicCache<K, V>]) {
        for cache in missed {
            if let Err(error) = cache.put(key, entry.clone()).await {
                tracing::warn!(
                    cache = %self.name,
                    %error,
                    "failed to promote entry into faster tier"
                );
            }
        }
    }
}

impl<K, V> BackendCache<K, V> for TieredCache<K, V>
where
    K: Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    /// Cascades the lookup across tiers, promoting the first hit into every
    /// faster tier that missed.
    ///
    /// A tier error aborts the whole lookup; promotion failures do not.
    async fn get(&self, key: &K) -> Result<Option<CacheEntry<V>>, Error> {
        let mut missed = Vec::new();

        for registry in self.registries.iter() {
            let Some(cache) = registry.get_cache(&self.name) else {
                continue;
            };
            if let Some(entry) = cache.get(key).await? {
                self.promote(key, &entry, &missed).await;
                return Ok(Some(entry));
            }
            missed.push(cache);
        }

        Ok(None)
    }

    /// Delegates to the fastest tier currently exposing this cache's name.
    ///
    /// Only that one tier is consulted: slower tiers are not checked on a
    /// miss and the loaded value is not copied anywhere else. When no tier
    /// exposes the name, the loader runs and its value is returned uncached.
    async fn get_or_load(&self, key: &K, loader: ValueLoader<V>) -> Result<CacheEntry<V>, Error> {
        match self.first_tier() {
            Some(cache) => cache.get_or_load(key, loader).await,
            None => Ok(CacheEntry::new(loader.load().await?)),
        }
    }

    /// Stores the entry in every participating tier, fastest first.
    ///
    /// A tier error aborts the broadcast; slower tiers are left untouched.
    async fn put(&self, key: &K, entry: CacheEntry<V>) -> Result<(), Error> {
        for registry in self.registries.iter() {
            if let Some(cache) = registry.get_cache(&self.name) {
                cache.put(key, entry.clone()).await?;
            }
        }
        Ok(())
    }

    /// Removes the key from every participating tier, fastest first.
    async fn evict(&self, key: &K) -> Result<(), Error> {
        for registry in self.registries.iter() {
            if let Some(cache) = registry.get_cache(&self.name) {
                cache.evict(key).await?;
            }
        }
        Ok(())
    }

    /// Clears every participating tier, fastest first.
    async fn clear(&self) -> Result<(), Error> {
        for registry in self.registries.iter() {
            if let Some(cache) = registry.get_cache(&self.name) {
                cache.clear().await?;
            }
        }
        Ok(())
    }

    fn native_handle(&self) -> Option<NativeHandle> {
        self.first_tier().and_then(|cache| cache.native_handle())
    }

    fn len(&self) -> Option<u64> {
        self.first_tier().and_then(|cache| cache.len())
    }
}

/// Unit tests for internal promotion behavior.
///
/// Public API tests are in `tests/cache.rs`.
#[cfg(test)]
mod tests {
    use super::*;
    use parfait_backend::DynamicRegistryExt;
    use parfait_backend::testing::{CacheOp, MockBackend, MockRegistry};

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        futures::executor::block_on(f)
    }

    fn tier(backend: &MockBackend<String, i32>) -> DynamicRegistry<String, i32> {
        let registry = MockRegistry::new();
        registry.register(backend.clone());
        registry.into_dynamic()
    }

    #[test]
    fn hit_in_slow_tier_is_promoted_into_faster_tiers() {
        block_on(async {
            let l1 = MockBackend::<String, i32>::new("users");
            let l2 = MockBackend::<String, i32>::new("users");
            let l3 = MockBackend::<String, i32>::new("users");
            l3.put(&"key".to_string(), CacheEntry::new(7)).await.expect("put failed");

            let cache = TieredCache::new("users", [tier(&l1), tier(&l2), tier(&l3)]);

            let entry = cache
                .get(&"key".to_string())
                .await
                .expect("get failed")
                .expect("entry should exist");
            assert_eq!(*entry.value(), 7);

            assert!(l1.contains_key(&"key".to_string()));
            assert!(l2.contains_key(&"key".to_string()));
        });
    }

    #[test]
    fn hit_in_fastest_tier_promotes_nothing() {
        block_on(async {
            let l1 = MockBackend::<String, i32>::new("users");
            let l2 = MockBackend::<String, i32>::new("users");
            l1.put(&"key".to_string(), CacheEntry::new(1)).await.expect("put failed");
            l2.clear_operations();
            l1.clear_operations();

            let cache = TieredCache::new("users", [tier(&l1), tier(&l2)]);
            cache.get(&"key".to_string()).await.expect("get failed");

            assert_eq!(l2.operations(), vec![], "slower tier must not be touched");
            assert_eq!(l1.operations(), vec![CacheOp::Get("key".to_string())]);
        });
    }

    #[test]
    fn promotion_failure_is_swallowed() {
        block_on(async {
            let l1 = MockBackend::<String, i32>::new("users");
            let l2 = MockBackend::<String, i32>::new("users");
            l2.put(&"key".to_string(), CacheEntry::new(3)).await.expect("put failed");
            l1.fail_when(|op| matches!(op, CacheOp::Put { .. }));

            let cache = TieredCache::new("users", [tier(&l1), tier(&l2)]);

            let entry = cache
                .get(&"key".to_string())
                .await
                .expect("promotion failure must not surface")
                .expect("entry should exist");
            assert_eq!(*entry.value(), 3);
            assert!(!l1.contains_key(&"key".to_string()));
        });
    }

    #[test]
    fn promotion_skips_tiers_behind_the_hit() {
        block_on(async {
            let l1 = MockBackend::<String, i32>::new("users");
            let l2 = MockBackend::<String, i32>::new("users");
            let l3 = MockBackend::<String, i32>::new("users");
            l2.put(&"key".to_string(), CacheEntry::new(5)).await.expect("put failed");

            let cache = TieredCache::new("users", [tier(&l1), tier(&l2), tier(&l3)]);
            cache.get(&"key".to_string()).await.expect("get failed");

            assert!(l1.contains_key(&"key".to_string()));
            assert!(!l3.contains_key(&"key".to_string()), "tiers behind the hit stay untouched");
        });
    }

    #[test]
    fn debug_output_names_the_cache() {
        let cache = TieredCache::<String, i32>::new("users", []);
        let debug = format!("{cache:?}");
        assert!(debug.contains("TieredCache"));
        assert!(debug.contains("users"));
    }
}
