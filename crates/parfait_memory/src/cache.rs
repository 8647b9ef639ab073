// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! In-memory cache backend implementation using moka.

use std::hash::Hash;
use std::sync::Arc;

use moka::future::Cache;
use parfait_backend::{BackendCache, CacheEntry, Error, NativeHandle, ValueLoader};

use crate::builder::InMemoryCacheBuilder;

/// moka shares a single load failure among all concurrent waiters; this
/// wrapper turns the shared handle back into an error chain.
#[derive(Debug)]
struct SharedLoadError(Arc<Error>);

impl std::fmt::Display for SharedLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SharedLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}

/// An in-memory cache backend backed by moka.
///
/// This backend provides concurrent access, automatic eviction based on
/// capacity, and single-flight get-or-load semantics (the loader runs at most
/// once even under concurrent misses for the same key).
///
/// # Examples
///
/// ```
/// use parfait_backend::{BackendCache, CacheEntry};
/// use parfait_memory::InMemoryCache;
/// # futures::executor::block_on(async {
///
/// let cache = InMemoryCache::<String, i32>::new("users");
///
/// cache.put(&"key".to_string(), CacheEntry::new(42)).await?;
/// let value = cache.get(&"key".to_string()).await?;
/// assert_eq!(*value.unwrap().value(), 42);
/// # Ok::<(), parfait_backend::Error>(())
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    name: Arc<str>,
    inner: Cache<K, CacheEntry<V>>,
}

impl<K, V> InMemoryCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new unbounded in-memory cache serving the given logical name.
    ///
    /// The cache will use the default eviction policy (`TinyLFU`).
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::builder(name).build()
    }

    /// Creates a new in-memory cache with a maximum capacity.
    ///
    /// Once the capacity is reached, entries will be evicted using the
    /// `TinyLFU` policy (combination of LRU eviction and LFU admission).
    #[must_use]
    pub fn with_capacity(name: impl Into<Arc<str>>, max_capacity: u64) -> Self {
        Self::builder(name).max_capacity(max_capacity).build()
    }

    /// Creates a new builder for configuring an in-memory cache.
    ///
    /// The builder provides access to additional configuration options such
    /// as time-to-live, time-to-idle, and initial capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use parfait_memory::InMemoryCache;
    /// use std::time::Duration;
    ///
    /// let cache = InMemoryCache::<String, i32>::builder("users")
    ///     .max_capacity(1000)
    ///     .time_to_live(Duration::from_secs(300))
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder(name: impl Into<Arc<str>>) -> InMemoryCacheBuilder<K, V> {
        InMemoryCacheBuilder::new(name)
    }

    /// Constructs an `InMemoryCache` from a builder.
    pub(crate) fn from_builder(builder: &InMemoryCacheBuilder<K, V>) -> Self {
        let mut moka_builder = Cache::builder().name(&builder.name);

        if let Some(capacity) = builder.max_capacity {
            moka_builder = moka_builder.max_capacity(capacity);
        }

        if let Some(capacity) = builder.initial_capacity {
            moka_builder = moka_builder.initial_capacity(capacity);
        }

        if let Some(ttl) = builder.time_to_live {
            moka_builder = moka_builder.time_to_live(ttl);
        }

        if let Some(tti) = builder.time_to_idle {
            moka_builder = moka_builder.time_to_idle(tti);
        }

        Self {
            name: Arc::clone(&builder.name),
            inner: moka_builder.build(),
        }
    }
}

impl<K, V> BackendCache<K, V> for InMemoryCache<K, V>
where
    K: Clone + Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &K) -> Result<Option<CacheEntry<V>>, Error> {
        Ok(self.inner.get(key).await)
    }

    async fn get_or_load(&self, key: &K, loader: ValueLoader<V>) -> Result<CacheEntry<V>, Error> {
        self.inner
            .try_get_with(key.clone(), async move { loader.load().await.map(CacheEntry::new) })
            .await
            .map_err(|source| Error::from_source(SharedLoadError(source)))
    }

    async fn put(&self, key: &K, entry: CacheEntry<V>) -> Result<(), Error> {
        self.inner.insert(key.clone(), entry).await;
        Ok(())
    }

    async fn evict(&self, key: &K) -> Result<(), Error> {
        self.inner.invalidate(key).await;
        Ok(())
    }

    async fn clear(&self) -> Result<(), Error> {
        self.inner.invalidate_all();
        Ok(())
    }

    fn native_handle(&self) -> Option<NativeHandle> {
        Some(Arc::new(self.inner.clone()))
    }

    fn len(&self) -> Option<u64> {
        Some(self.inner.entry_count())
    }
}
