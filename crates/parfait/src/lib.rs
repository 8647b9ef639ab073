// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Tiered caching facade with cascading reads and broadcast writes.
//!
//! This crate composes backend caches into tiers ordered from fastest to
//! slowest behind a single logical name:
//! - [`TieredCache`] cascades reads across tiers, stops at the first hit, and
//!   copies it into the faster tiers that missed
//! - Writes (`put`, `evict`, `clear`) are broadcast to every tier
//! - [`TieredRegistry`] resolves tiered caches by name over a set of backend
//!   registries, binding tiers at call time
//!
//! # Examples
//!
//! ## Two-Tier Cache
//!
//! ```
//! use parfait::{BackendCache, CacheEntry, DynamicRegistryExt, TieredCache};
//! use parfait_memory::{InMemoryCache, InMemoryRegistry};
//! # futures::executor::block_on(async {
//!
//! let l1 = InMemoryRegistry::new();
//! l1.register(InMemoryCache::<String, i32>::new("users"));
//! let l2 = InMemoryRegistry::new();
//! l2.register(InMemoryCache::<String, i32>::new("users"));
//!
//! let cache = TieredCache::new("users", [l1.into_dynamic(), l2.into_dynamic()]);
//!
//! cache.put(&"key".to_string(), CacheEntry::new(42)).await?;
//! let value = cache.get(&"key".to_string()).await?;
//! assert_eq!(*value.unwrap().value(), 42);
//! # Ok::<(), parfait::Error>(())
//! # });
//! ```
//!
//! ## Resolving Caches Through a Registry
//!
//! ```
//! use parfait::{DynamicRegistryExt, TieredRegistry};
//! use parfait_memory::{InMemoryCache, InMemoryRegistry};
//!
//! let backends = InMemoryRegistry::new();
//! backends.register(InMemoryCache::<String, String>::new("sessions"));
//!
//! let registry = TieredRegistry::new([backends.into_dynamic()]);
//! assert!(registry.cache("sessions").is_some());
//! ```

pub mod cache;
pub mod registry;

#[doc(inline)]
pub use cache::TieredCache;
#[doc(inline)]
pub use parfait_backend::{
    BackendCache, BackendRegistry, CacheEntry, DynamicCache, DynamicCacheExt, DynamicRegistry,
    DynamicRegistryExt, Error, Object, ObjectCacheExt, Result, ValueLoader,
};
#[doc(inline)]
pub use registry::TieredRegistry;

#[cfg(feature = "test-util")]
#[doc(inline)]
pub use parfait_backend::testing::{CacheOp, MockBackend, MockRegistry};
