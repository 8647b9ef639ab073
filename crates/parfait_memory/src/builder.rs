// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! Builder for configuring in-memory caches.
//!
//! The builder keeps moka out of the public API: callers pick capacity and
//! expiry knobs here, and `InMemoryCache` translates them into a moka
//! configuration at build time.

use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::InMemoryCache;

/// Builder for an [`InMemoryCache`].
///
/// Every cache serves a logical name, so the name is taken up front; the
/// remaining knobs are optional. Leaving them all unset yields an unbounded
/// cache with no time-based expiry.
///
/// # Examples
///
/// ```
/// use parfait_memory::InMemoryCache;
/// use std::time::Duration;
///
/// let cache = InMemoryCache::<String, i32>::builder("users")
///     .max_capacity(1000)
///     .initial_capacity(100)
///     .time_to_live(Duration::from_secs(300))
///     .time_to_idle(Duration::from_secs(60))
///     .build();
/// ```
#[derive(Debug)]
pub struct InMemoryCacheBuilder<K, V> {
    pub(crate) name: Arc<str>,
    pub(crate) max_capacity: Option<u64>,
    pub(crate) initial_capacity: Option<usize>,
    pub(crate) time_to_live: Option<Duration>,
    pub(crate) time_to_idle: Option<Duration>,
    _phantom: PhantomData<(K, V)>,
}

impl<K, V> InMemoryCacheBuilder<K, V> {
    /// Creates a builder for a cache serving the given logical name.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            max_capacity: None,
            initial_capacity: None,
            time_to_live: None,
            time_to_idle: None,
            _phantom: PhantomData,
        }
    }

    /// Bounds the cache at `capacity` entries.
    ///
    /// When the bound is hit, moka's `TinyLFU` policy decides which entries
    /// to admit and which to evict. Unset means unbounded.
    #[must_use]
    pub fn max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    /// Pre-allocates internal storage for roughly `capacity` entries.
    ///
    /// Purely a sizing hint for the initial population; the cache grows past
    /// it as needed.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Expires entries `duration` after insertion, whether or not they are
    /// being read.
    #[must_use]
    pub fn time_to_live(mut self, duration: Duration) -> Self {
        self.time_to_live = Some(duration);
        self
    }

    /// Expires entries after `duration` without a read or write.
    ///
    /// Each access restarts the idle timer, so hot entries never expire this
    /// way.
    #[must_use]
    pub fn time_to_idle(mut self, duration: Duration) -> Self {
        self.time_to_idle = Some(duration);
        self
    }

    /// Builds the configured [`InMemoryCache`].
    #[must_use]
    pub fn build(self) -> InMemoryCache<K, V>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        InMemoryCache::from_builder(&self)
    }
}
