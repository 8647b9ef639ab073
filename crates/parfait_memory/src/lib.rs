// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! High-performance in-memory cache backend backed by moka.
//!
//! This crate provides [`InMemoryCache`], a concurrent in-memory backend using
//! moka's `TinyLFU` eviction algorithm, and [`InMemoryRegistry`], a registry
//! of named in-memory caches. Use [`InMemoryCacheBuilder`] to configure
//! capacity, TTL, and TTI without exposing moka types directly. Eviction and
//! expiration are entirely this backend's concern; the tiered facade never
//! sees them.
//!
//! # Quick Start
//!
//! ```
//! use parfait_backend::{BackendCache, CacheEntry};
//! use parfait_memory::InMemoryCache;
//!
//! # futures::executor::block_on(async {
//! let cache = InMemoryCache::<String, i32>::new("users");
//!
//! cache.put(&"key".to_string(), CacheEntry::new(42)).await?;
//! let value = cache.get(&"key".to_string()).await?;
//! assert_eq!(*value.unwrap().value(), 42);
//! # Ok::<(), parfait_backend::Error>(())
//! # });
//! ```

pub mod builder;
pub mod cache;
pub mod registry;

#[doc(inline)]
pub use builder::InMemoryCacheBuilder;
#[doc(inline)]
pub use cache::InMemoryCache;
#[doc(inline)]
pub use registry::InMemoryRegistry;
