// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! Multi-Tier Cache Example
//!
//! Builds a two-tier cache over in-memory backends and shows how a hit in
//! the slow tier is promoted into the fast tier on the way out.

use parfait::{BackendCache, BackendRegistry, CacheEntry, DynamicRegistryExt, TieredCache};
use parfait_memory::{InMemoryCache, InMemoryRegistry};

fn main() {
    futures::executor::block_on(async {
        // A small, fast tier and an unbounded, slower one.
        let fast = InMemoryRegistry::new();
        fast.register(InMemoryCache::<String, String>::with_capacity("users", 1_000));

        let slow = InMemoryRegistry::new();
        let slow_backing = InMemoryCache::<String, String>::new("users");
        slow.register(slow_backing.clone());

        let cache = TieredCache::new("users", [fast.clone().into_dynamic(), slow.into_dynamic()]);

        // Writes land in every tier.
        let key = "user:123".to_string();
        cache
            .put(&key, CacheEntry::new("Alice".to_string()))
            .await
            .expect("put failed");

        // Simulate the fast tier losing the entry.
        let fast_cache = fast.get_cache("users").expect("cache should resolve");
        fast_cache.evict(&key).await.expect("evict failed");

        // The read falls through to the slow tier and promotes the hit.
        let entry = cache.get(&key).await.expect("get failed").expect("entry should exist");
        println!("resolved {} -> {}", key, entry.value());

        let promoted = fast_cache.get(&key).await.expect("get failed");
        println!("fast tier has the entry again: {}", promoted.is_some());
    });
}
