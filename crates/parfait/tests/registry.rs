// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! Integration tests for the tiered registry.

use parfait::{
    BackendCache, BackendRegistry, CacheEntry, DynamicRegistry, DynamicRegistryExt, TieredRegistry,
};
use parfait_backend::testing::{MockBackend, MockRegistry};

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

fn tier<K, V>(backend: &MockBackend<K, V>) -> DynamicRegistry<K, V>
where
    K: Clone + Eq + std::hash::Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let registry = MockRegistry::new();
    registry.register(backend.clone());
    registry.into_dynamic()
}

#[test]
fn resolves_names_exposed_by_any_backend() {
    let users = MockBackend::<String, i32>::new("users");
    let sessions = MockBackend::<String, i32>::new("sessions");

    let registry = TieredRegistry::new([tier(&users), tier(&sessions)]);

    assert!(registry.cache("users").is_some());
    assert!(registry.cache("sessions").is_some());
    assert!(registry.cache("missing").is_none());
}

#[test]
fn cache_names_unions_backend_names() {
    let l1 = MockRegistry::<String, i32>::new();
    l1.register(MockBackend::new("users"));
    l1.register(MockBackend::new("sessions"));
    let l2 = MockRegistry::<String, i32>::new();
    l2.register(MockBackend::new("users"));
    l2.register(MockBackend::new("tokens"));

    let registry = TieredRegistry::new([l1.into_dynamic(), l2.into_dynamic()]);

    let names = registry.cache_names();
    assert_eq!(names.len(), 3);
    assert!(names.contains("users"));
    assert!(names.contains("sessions"));
    assert!(names.contains("tokens"));
}

#[test]
fn resolved_cache_spans_every_tier() {
    block_on(async {
        let l1 = MockBackend::<String, i32>::new("users");
        let l2 = MockBackend::<String, i32>::new("users");

        let registry = TieredRegistry::new([tier(&l1), tier(&l2)]);
        let cache = registry.cache("users").expect("cache should resolve");
        assert_eq!(cache.name(), "users");
        assert_eq!(cache.tier_count(), 2);

        cache.put(&"key".to_string(), CacheEntry::new(6)).await.expect("put failed");
        assert!(l1.contains_key(&"key".to_string()));
        assert!(l2.contains_key(&"key".to_string()));
    });
}

#[test]
fn partially_exposed_names_still_resolve() {
    block_on(async {
        let l1 = MockBackend::<String, i32>::new("sessions");
        let l2 = MockBackend::<String, i32>::new("users");

        let registry = TieredRegistry::new([tier(&l1), tier(&l2)]);
        let cache = registry.cache("users").expect("one exposing backend is enough");

        cache.put(&"key".to_string(), CacheEntry::new(1)).await.expect("put failed");
        assert!(!l1.contains_key(&"key".to_string()), "non-exposing tier stays untouched");
        assert!(l2.contains_key(&"key".to_string()));
    });
}

#[test]
fn name_resolution_follows_backend_registration() {
    block_on(async {
        let backends = MockRegistry::<String, i32>::new();
        let registry = TieredRegistry::new([backends.clone().into_dynamic()]);

        assert!(registry.cache("users").is_none());

        backends.register(MockBackend::new("users"));
        let cache = registry.cache("users").expect("cache should resolve after registration");
        cache.put(&"key".to_string(), CacheEntry::new(1)).await.expect("put failed");

        // Deregistration makes the name unresolvable again, even though a
        // facade was already built for it.
        assert!(backends.deregister("users"));
        assert!(registry.cache("users").is_none());

        // And it comes back once a backend reappears under the name.
        backends.register(MockBackend::new("users"));
        assert!(registry.cache("users").is_some());
    });
}

#[test]
fn resolving_twice_reaches_the_same_tiers() {
    block_on(async {
        let l1 = MockBackend::<String, i32>::new("users");

        let registry = TieredRegistry::new([tier(&l1)]);

        let first = registry.cache("users").expect("cache should resolve");
        first.put(&"key".to_string(), CacheEntry::new(3)).await.expect("put failed");

        let second = registry.cache("users").expect("cache should resolve");
        let entry = second
            .get(&"key".to_string())
            .await
            .expect("get failed")
            .expect("entry should exist");
        assert_eq!(*entry.value(), 3);
    });
}

#[test]
fn tiered_registries_nest() {
    block_on(async {
        let inner_fast = MockBackend::<String, i32>::new("users");
        let inner_slow = MockBackend::<String, i32>::new("users");
        let inner = TieredRegistry::new([tier(&inner_fast), tier(&inner_slow)]);

        let outer_fast = MockBackend::<String, i32>::new("users");
        let outer = TieredRegistry::new([tier(&outer_fast), inner.into_dynamic()]);

        let cache = outer.cache("users").expect("cache should resolve");
        cache.put(&"key".to_string(), CacheEntry::new(5)).await.expect("put failed");

        assert!(outer_fast.contains_key(&"key".to_string()));
        assert!(inner_fast.contains_key(&"key".to_string()));
        assert!(inner_slow.contains_key(&"key".to_string()));

        inner_slow.clear_operations();
        let entry = cache
            .get(&"key".to_string())
            .await
            .expect("get failed")
            .expect("entry should exist");
        assert_eq!(*entry.value(), 5);
        assert_eq!(inner_slow.operations(), vec![], "hit in the outer tier short-circuits");
    });
}

#[test]
fn registry_works_with_in_memory_backends() {
    block_on(async {
        use parfait_memory::{InMemoryCache, InMemoryRegistry};

        let fast = InMemoryRegistry::new();
        fast.register(InMemoryCache::<String, i32>::new("users"));
        let slow = InMemoryRegistry::new();
        slow.register(InMemoryCache::<String, i32>::new("users"));
        slow.register(InMemoryCache::<String, i32>::new("sessions"));

        let registry = TieredRegistry::new([fast.into_dynamic(), slow.into_dynamic()]);
        assert_eq!(registry.cache_names().len(), 2);

        let cache = registry.cache("users").expect("cache should resolve");
        cache.put(&"key".to_string(), CacheEntry::new(1)).await.expect("put failed");
        let entry = cache
            .get(&"key".to_string())
            .await
            .expect("get failed")
            .expect("entry should exist");
        assert_eq!(*entry.value(), 1);
    });
}
