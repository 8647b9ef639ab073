// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Capability traits consumed by the parfait tiered cache facade.
//!
//! This crate defines the two capability sets a tiered cache orchestrates over:
//! [`BackendCache`], the interface of a single named cache, and
//! [`BackendRegistry`], the interface of a collection of named caches. It also
//! provides the supporting vocabulary types: [`CacheEntry`] for present values,
//! [`ValueLoader`] for deferred get-or-load computations, [`Object`] for
//! type-erased values, and [`Error`] for fallible operations.
//!
//! # Overview
//!
//! The backend abstraction separates storage concerns from orchestration.
//! Implement [`BackendCache`] for your storage backend and [`BackendRegistry`]
//! for whatever owns its named caches, then use `parfait` to compose several
//! of them into one logical cache with cascade-and-promote read semantics.
//!
//! # Implementing a Backend Cache
//!
//! Implement all required methods of [`BackendCache`]:
//!
//! ```
//! use parfait_backend::{BackendCache, CacheEntry, Error, ValueLoader};
//! use std::collections::HashMap;
//! use std::sync::RwLock;
//!
//! struct SimpleCache<K, V> {
//!     name: String,
//!     data: RwLock<HashMap<K, CacheEntry<V>>>,
//! }
//!
//! impl<K, V> BackendCache<K, V> for SimpleCache<K, V>
//! where
//!     K: Clone + Eq + std::hash::Hash + Send + Sync,
//!     V: Clone + Send + Sync,
//! {
//!     fn name(&self) -> &str {
//!         &self.name
//!     }
//!
//!     async fn get(&self, key: &K) -> Result<Option<CacheEntry<V>>, Error> {
//!         Ok(self.data.read().unwrap().get(key).cloned())
//!     }
//!
//!     async fn get_or_load(&self, key: &K, loader: ValueLoader<V>) -> Result<CacheEntry<V>, Error> {
//!         let cached = self.data.read().unwrap().get(key).cloned();
//!         if let Some(entry) = cached {
//!             return Ok(entry);
//!         }
//!         let entry = CacheEntry::new(loader.load().await?);
//!         self.data.write().unwrap().insert(key.clone(), entry.clone());
//!         Ok(entry)
//!     }
//!
//!     async fn put(&self, key: &K, entry: CacheEntry<V>) -> Result<(), Error> {
//!         self.data.write().unwrap().insert(key.clone(), entry);
//!         Ok(())
//!     }
//!
//!     async fn evict(&self, key: &K) -> Result<(), Error> {
//!         self.data.write().unwrap().remove(key);
//!         Ok(())
//!     }
//!
//!     async fn clear(&self) -> Result<(), Error> {
//!         self.data.write().unwrap().clear();
//!         Ok(())
//!     }
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! [`DynamicCache`] wraps any `BackendCache` in a clonable, type-erased
//! container. Registries hand out `DynamicCache` handles so that heterogeneous
//! storage backends can share one tier list.

pub(crate) mod backend;
mod dynamic;
mod entry;
pub mod error;
mod loader;
mod object;
mod registry;
#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[doc(inline)]
pub use backend::{BackendCache, NativeHandle};
#[doc(inline)]
pub use dynamic::{DynamicCache, DynamicCacheExt};
#[doc(inline)]
pub use entry::CacheEntry;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use loader::ValueLoader;
#[doc(inline)]
pub use object::{Object, ObjectCacheExt};
#[doc(inline)]
pub use registry::{BackendRegistry, DynamicRegistry, DynamicRegistryExt};
