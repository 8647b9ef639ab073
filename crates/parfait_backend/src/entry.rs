// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

use std::ops::Deref;

/// A present cached value.
///
/// A read result of `Option<CacheEntry<V>>` distinguishes *absent*
/// (`None`) from *present* (`Some`), including present empty or unit-like
/// values. Backends store and hand back whole entries; the tiered facade
/// never looks inside them.
///
/// # Examples
///
/// ```
/// use parfait_backend::CacheEntry;
///
/// let entry = CacheEntry::new(42);
/// assert_eq!(*entry.value(), 42);
///
/// // A present empty value is still present.
/// let empty = CacheEntry::new(String::new());
/// assert_eq!(empty.value(), "");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry<V> {
    value: V,
}

impl<V> CacheEntry<V> {
    /// Creates a new cache entry holding the given value.
    pub fn new(value: V) -> Self {
        Self { value }
    }

    /// Returns a reference to the cached value.
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry and returns the inner value.
    #[must_use]
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V> Deref for CacheEntry<V> {
    type Target = V;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<V> From<V> for CacheEntry<V> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}
