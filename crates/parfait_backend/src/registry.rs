// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! The capability set of a registry of named caches.

use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;

use crate::DynamicCache;

/// Trait for a collection of named cache backends.
///
/// A registry resolves a logical cache name to a backend cache, or reports
/// that it exposes no cache under that name. "Not exposed here" is an
/// expected condition, never an error; fallible resolution belongs to the
/// individual cache operations, not to the registry lookup.
pub trait BackendRegistry<K, V>: Send + Sync {
    /// Resolves `name` to this registry's cache, if it exposes one.
    fn get_cache(&self, name: &str) -> Option<DynamicCache<K, V>>;

    /// Returns the names of all caches this registry knows, deduplicated and
    /// in no particular order.
    fn cache_names(&self) -> HashSet<String>;
}

/// Extension trait for converting any `BackendRegistry` into a
/// [`DynamicRegistry`].
///
/// This trait is automatically implemented for all types that implement
/// `BackendRegistry`.
pub trait DynamicRegistryExt<K, V>: Sized {
    /// Converts this registry into a `DynamicRegistry`.
    fn into_dynamic(self) -> DynamicRegistry<K, V>;
}

impl<K, V, R> DynamicRegistryExt<K, V> for R
where
    R: BackendRegistry<K, V> + 'static,
{
    fn into_dynamic(self) -> DynamicRegistry<K, V> {
        DynamicRegistry::new(self)
    }
}

/// A clonable registry handle with type erasure.
///
/// The tiered facade holds its ordered backend list as `DynamicRegistry`
/// values so registries of different concrete types can share one tier list.
pub struct DynamicRegistry<K, V>(Arc<dyn BackendRegistry<K, V>>);

impl<K, V> DynamicRegistry<K, V> {
    /// Creates a new dynamic registry from any `BackendRegistry` implementation.
    pub(crate) fn new<R>(registry: R) -> Self
    where
        R: BackendRegistry<K, V> + 'static,
    {
        Self(Arc::new(registry))
    }
}

impl<K, V> Debug for DynamicRegistry<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicRegistry").finish()
    }
}

impl<K, V> Clone for DynamicRegistry<K, V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<K, V> BackendRegistry<K, V> for DynamicRegistry<K, V> {
    fn get_cache(&self, name: &str) -> Option<DynamicCache<K, V>> {
        self.0.get_cache(name)
    }

    fn cache_names(&self) -> HashSet<String> {
        self.0.cache_names()
    }
}
