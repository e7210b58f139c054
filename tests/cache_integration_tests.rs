//! Integration Tests for the public cache API
//!
//! Drives every variant through the shared `Cache` trait and checks the
//! scenario runner, simulator and report end to end.

use slotcache::cache::{
    ArcCache, BufferPool, Level, LfuCache, LruCache, TtlCache, TwoLevelCache, WriteCache,
    EMPTY_KEY,
};
use slotcache::report::RunReport;
use slotcache::store::BackingStore;
use slotcache::workload::{simulate, Workload};
use slotcache::{scenarios, Cache, CacheError};

// == Helper Functions ==

fn all_variants(capacity: usize) -> Vec<Box<dyn Cache>> {
    vec![
        Box::new(LruCache::lru(capacity)),
        Box::new(LfuCache::lfu(capacity)),
        Box::new(TtlCache::ttl(capacity, 1_000)),
        Box::new(ArcCache::new(capacity / 2, capacity - capacity / 2)),
        Box::new(TwoLevelCache::new(1, capacity - 1)),
        Box::new(WriteCache::write_back(capacity, BackingStore::new(64))),
        Box::new(WriteCache::write_through(capacity, BackingStore::new(64))),
    ]
}

// == Trait-Level Tests ==

#[test]
fn test_every_variant_hits_after_put() {
    for mut cache in all_variants(4) {
        cache.put(7, 70, 0).unwrap();
        assert_eq!(cache.get(7, 1).unwrap(), 70, "variant {}", cache.name());
        assert_eq!(cache.stats().hits, 1, "variant {}", cache.name());
    }
}

#[test]
fn test_every_variant_respects_capacity() {
    for mut cache in all_variants(4) {
        for key in 0..20 {
            let _ = cache.put(key, key, key as u64);
            assert!(cache.len() <= cache.capacity(), "variant {}", cache.name());
        }
    }
}

#[test]
fn test_key_variants_reject_sentinel() {
    let mut caches: Vec<Box<dyn Cache>> = vec![
        Box::new(LruCache::lru(2)),
        Box::new(ArcCache::new(1, 1)),
        Box::new(TwoLevelCache::new(1, 1)),
    ];
    for cache in caches.iter_mut() {
        assert_eq!(cache.put(EMPTY_KEY, 1, 0), Err(CacheError::InvalidKey(EMPTY_KEY)));
        assert!(cache.is_empty());
    }
}

#[test]
fn test_variant_names_are_distinct() {
    let names: Vec<&str> = all_variants(4).iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec!["lru", "lfu", "ttl", "arc", "two_level", "write_back", "write_through"]
    );
}

// == Canonical Scenario ==

#[test]
fn test_lru_canonical_example() {
    let mut cache = LruCache::lru(3);

    cache.put(10, 100, 1).unwrap();
    cache.put(20, 200, 2).unwrap();
    cache.put(30, 300, 3).unwrap();
    assert_eq!(cache.len(), cache.capacity());

    let evicted = cache.put(40, 400, 4).unwrap().unwrap();
    assert_eq!(evicted.key, 10);
    assert_eq!(cache.get(10, 5), Err(CacheError::NotFound(10)));
    assert_eq!(cache.get(20, 6), Ok(200));
}

#[test]
fn test_ttl_miss_once_ttl_elapsed() {
    let mut cache = TtlCache::ttl(3, 5);
    cache.put(1, 10, 100).unwrap();

    for now in 100..105 {
        assert_eq!(cache.get(1, now), Ok(10));
    }
    assert_eq!(cache.get(1, 105), Err(CacheError::Expired(1)));
    assert_eq!(cache.get(1, 106), Err(CacheError::NotFound(1)));
}

// == Variant Interplay ==

#[test]
fn test_two_level_round_trip_between_levels() {
    let mut cache = TwoLevelCache::new(2, 2);

    for key in 1..=4 {
        cache.put(key, key * 10, key as u64).unwrap();
    }
    assert_eq!(cache.level_of(1), Some(Level::L2));
    assert_eq!(cache.lookup(1, 5).unwrap(), (10, Level::L2));
    assert_eq!(cache.lookup(1, 6).unwrap(), (10, Level::L1));
    assert_eq!(cache.level_hits(), (1, 1));
}

#[test]
fn test_write_back_store_consistent_after_flush() {
    let mut cache = WriteCache::write_back(3, BackingStore::new(16));

    for addr in 0..10 {
        cache.put(addr, addr * 3, addr as u64).unwrap();
    }
    cache.flush().unwrap();

    let store = cache.into_store();
    for addr in 0..10 {
        assert_eq!(store.peek(addr), Some(addr * 3));
    }
}

#[test]
fn test_write_through_and_back_agree_after_flush() {
    let mut back = WriteCache::write_back(2, BackingStore::new(16));
    let mut through = WriteCache::write_through(2, BackingStore::new(16));

    for (now, addr) in [3, 5, 3, 7, 9, 5].into_iter().enumerate() {
        back.put(addr, addr + now as i64, now as u64).unwrap();
        through.put(addr, addr + now as i64, now as u64).unwrap();
    }
    back.flush().unwrap();

    for addr in 0..16 {
        assert_eq!(back.store().peek(addr), through.store().peek(addr));
    }
    assert!(through.store().writes() > back.store().writes());
}

#[test]
fn test_buffer_pool_full_then_recovers() {
    let mut pool = BufferPool::new(2, BackingStore::new(8));

    pool.pin(0, 0).unwrap();
    pool.pin(1, 1).unwrap();
    assert_eq!(pool.pin(2, 2), Err(CacheError::Full(2)));

    pool.unpin(0, false).unwrap();
    assert!(pool.pin(2, 3).is_ok());
    assert!(!pool.is_resident(0));
    assert_eq!(pool.stats().evictions, 1);
}

// == Runner ==

#[test]
fn test_scenarios_all_pass() {
    let outcomes = scenarios::run_all();
    assert_eq!(outcomes.len(), 8);
    assert!(scenarios::failed(&outcomes).is_empty());
}

#[test]
fn test_simulation_report_serializes() {
    let workload = Workload::skewed(300, 16, 2, 70);
    let simulations: Vec<_> = all_variants(4)
        .iter_mut()
        .map(|cache| simulate(cache.as_mut(), &workload).unwrap())
        .collect();

    for sim in &simulations {
        assert_eq!(sim.stats.hits + sim.stats.misses, 300, "variant {}", sim.variant);
        assert!(sim.hit_rate > 0.0);
    }

    let report = RunReport::new(scenarios::run_all(), simulations);
    assert!(report.scenarios_passed());

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["simulations"].as_array().unwrap().len(), 7);
    assert_eq!(json["scenarios"].as_array().unwrap().len(), 8);
}
