// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! Tiered Registry Example
//!
//! Resolves caches by name over several backend registries and shows how
//! names bind to tiers at call time.

use parfait::{BackendCache, BackendRegistry, CacheEntry, DynamicRegistryExt, TieredRegistry};
use parfait_memory::{InMemoryCache, InMemoryRegistry};

fn main() {
    futures::executor::block_on(async {
        let fast = InMemoryRegistry::new();
        fast.register(InMemoryCache::<String, String>::new("users"));

        let slow = InMemoryRegistry::new();
        slow.register(InMemoryCache::<String, String>::new("users"));
        slow.register(InMemoryCache::<String, String>::new("sessions"));

        let registry = TieredRegistry::new([fast.clone().into_dynamic(), slow.into_dynamic()]);

        println!("known caches: {:?}", registry.cache_names());

        // "users" spans both tiers; "sessions" only exists in the slow one,
        // which is fine: the facade skips tiers without the name.
        let users = registry.cache("users").expect("cache should resolve");
        users
            .put(&"user:1".to_string(), CacheEntry::new("Alice".to_string()))
            .await
            .expect("put failed");

        let sessions = registry.cache("sessions").expect("cache should resolve");
        sessions
            .put(&"sess:1".to_string(), CacheEntry::new("token".to_string()))
            .await
            .expect("put failed");

        // A name nobody exposes does not resolve until a backend registers it.
        assert!(registry.cache("tokens").is_none());
        fast.register(InMemoryCache::<String, String>::new("tokens"));
        println!("tokens resolves now: {}", registry.cache("tokens").is_some());
    });
}
