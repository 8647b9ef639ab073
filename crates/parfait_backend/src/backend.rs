// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! The core trait for cache storage backends.
//!
//! [`BackendCache`] defines the capability set every cache backend exposes.
//! This trait is designed for composition: implement the storage operations,
//! then use `parfait` to layer several backends into one tiered cache.

use std::any::Any;
use std::sync::Arc;

use crate::{CacheEntry, Error, ValueLoader};

/// A backend-specific escape hatch for introspection and debugging.
///
/// Backends typically hand out a clone of their underlying store; callers
/// downcast it back to the concrete type they expect.
pub type NativeHandle = Arc<dyn Any + Send + Sync>;

/// Trait for a single named cache backend.
///
/// Implement this trait to plug a storage backend into the tiered facade.
/// The five core methods are required: `name`, `get`, `get_or_load`, `put`,
/// `evict` and `clear`. The rest have default implementations:
/// - `native_handle`: returns `None` (no escape hatch)
/// - `len`: returns `None` (not all backends track size)
/// - `is_empty`: delegates to `len`
///
/// Absence and presence are distinguished through `Option<CacheEntry<V>>`;
/// a present empty value is `Some`, never `None`.
#[dynosaur::dynosaur(pub(crate) DynBackendCache = dyn(box) BackendCache, bridge(none))]
pub trait BackendCache<K, V>: Send + Sync {
    /// Returns the logical cache name this backend instance serves.
    fn name(&self) -> &str;

    /// Gets a value, returning an error if the operation fails.
    fn get(&self, key: &K) -> impl Future<Output = Result<Option<CacheEntry<V>>, Error>> + Send;

    /// Gets a value, or computes and stores it on miss.
    ///
    /// The backend performs the lookup and, on miss, invokes the loader at
    /// most once and stores its result itself. Loader failures propagate and
    /// nothing is stored.
    fn get_or_load(&self, key: &K, loader: ValueLoader<V>) -> impl Future<Output = Result<CacheEntry<V>, Error>> + Send;

    /// Unconditionally upserts a value, returning an error if the operation fails.
    fn put(&self, key: &K, entry: CacheEntry<V>) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes a value; removing an absent key is a no-op.
    fn evict(&self, key: &K) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes all entries from this backend's view of the named cache.
    fn clear(&self) -> impl Future<Output = Result<(), Error>> + Send;

    /// Returns the backend's native handle, if it exposes one.
    fn native_handle(&self) -> Option<NativeHandle> {
        None
    }

    /// Returns the number of entries, if supported.
    ///
    /// Returns `None` for implementations that don't track size.
    fn len(&self) -> Option<u64> {
        None
    }

    /// Returns `true` if the cache contains no entries.
    ///
    /// Returns `None` for implementations that don't track size.
    fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }
}
