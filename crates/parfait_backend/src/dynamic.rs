// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! Dynamic cache wrapper for type erasure.

use std::fmt::Debug;
use std::sync::Arc;

use crate::backend::DynBackendCache;
use crate::{BackendCache, CacheEntry, Error, NativeHandle, ValueLoader};

/// Extension trait for converting any `BackendCache` into a [`DynamicCache`].
///
/// This trait is automatically implemented for all types that implement
/// `BackendCache`.
pub trait DynamicCacheExt<K, V>: Sized {
    /// Converts this cache backend into a `DynamicCache`.
    fn into_dynamic(self) -> DynamicCache<K, V>;
}

impl<K, V, T> DynamicCacheExt<K, V> for T
where
    T: BackendCache<K, V> + 'static,
{
    fn into_dynamic(self) -> DynamicCache<K, V> {
        DynamicCache::new(self)
    }
}

/// A clonable cache backend handle with type erasure.
///
/// `DynamicCache` wraps a trait object in an `Arc` to enable cloning while
/// maintaining dynamic dispatch. Registries hand out `DynamicCache` so a
/// tiered cache can hold a homogeneous ordered collection over heterogeneous
/// backend implementations.
pub struct DynamicCache<K, V>(Arc<DynBackendCache<'static, K, V>>);

impl<K, V> DynamicCache<K, V> {
    /// Creates a new dynamic cache from any `BackendCache` implementation.
    pub(crate) fn new<T>(backend: T) -> Self
    where
        T: BackendCache<K, V> + Send + Sync + 'static,
    {
        Self(DynBackendCache::new_arc(backend))
    }
}

impl<K, V> Debug for DynamicCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicCache").finish()
    }
}

impl<K, V> Clone for DynamicCache<K, V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<K, V> BackendCache<K, V> for DynamicCache<K, V>
where
    K: Sync,
    V: Send,
{
    fn name(&self) -> &str {
        self.0.name()
    }

    async fn get(&self, key: &K) -> Result<Option<CacheEntry<V>>, Error> {
        self.0.get(key).await
    }

    async fn get_or_load(&self, key: &K, loader: ValueLoader<V>) -> Result<CacheEntry<V>, Error> {
        self.0.get_or_load(key, loader).await
    }

    async fn put(&self, key: &K, entry: CacheEntry<V>) -> Result<(), Error> {
        self.0.put(key, entry).await
    }

    async fn evict(&self, key: &K) -> Result<(), Error> {
        self.0.evict(key).await
    }

    async fn clear(&self) -> Result<(), Error> {
        self.0.clear().await
    }

    fn native_handle(&self) -> Option<NativeHandle> {
        self.0.native_handle()
    }

    fn len(&self) -> Option<u64> {
        self.0.len()
    }

    fn is_empty(&self) -> Option<bool> {
        self.0.is_empty()
    }
}
