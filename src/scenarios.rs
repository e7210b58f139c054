//! Scenario Suites
//!
//! Fixed self-check scenarios, one suite per cache variant. Each suite runs a
//! handful of checks and reports how many passed.

use serde::Serialize;
use tracing::warn;

use crate::cache::{
    ArcCache, BufferPool, Level, LfuCache, LruCache, TtlCache, TwoLevelCache, WriteCache,
};
use crate::error::CacheError;
use crate::store::BackingStore;

// == Scenario Outcome ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    pub variant: &'static str,
    pub passed: u32,
    pub total: u32,
}

impl ScenarioOutcome {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

// Tallies checks for one suite.
struct Checks {
    variant: &'static str,
    passed: u32,
    total: u32,
}

impl Checks {
    fn new(variant: &'static str) -> Self {
        Self {
            variant,
            passed: 0,
            total: 0,
        }
    }

    fn check(&mut self, name: &str, ok: bool) {
        self.total += 1;
        if ok {
            self.passed += 1;
        } else {
            warn!(variant = self.variant, check = name, "scenario check failed");
        }
    }

    fn finish(self) -> ScenarioOutcome {
        ScenarioOutcome {
            variant: self.variant,
            passed: self.passed,
            total: self.total,
        }
    }
}

// == LRU ==
pub fn lru_suite() -> ScenarioOutcome {
    let mut checks = Checks::new("lru");
    let mut cache = LruCache::lru(3);

    let _ = cache.put(10, 100, 1);
    let _ = cache.put(20, 200, 2);
    let _ = cache.put(30, 300, 3);
    checks.check("fills to capacity", cache.len() == 3);

    let evicted = cache.put(40, 400, 4);
    checks.check(
        "evicts oldest",
        matches!(evicted, Ok(Some(ev)) if ev.key == 10),
    );
    checks.check("evicted key misses", cache.get(10, 5) == Err(CacheError::NotFound(10)));
    checks.check("survivor hits", cache.get(20, 6) == Ok(200));

    let _ = cache.put(20, 222, 7);
    checks.check("update keeps count", cache.len() == 3 && cache.peek(20) == Some(222));
    checks.finish()
}

// == LFU ==
pub fn lfu_suite() -> ScenarioOutcome {
    let mut checks = Checks::new("lfu");
    let mut cache = LfuCache::lfu(3);

    let _ = cache.put(1, 10, 0);
    let _ = cache.put(2, 20, 0);
    let _ = cache.put(3, 30, 0);
    let _ = cache.get(1, 0);
    let _ = cache.get(1, 0);
    let _ = cache.get(3, 0);

    let evicted = cache.put(4, 40, 0);
    checks.check("evicts least frequent", matches!(evicted, Ok(Some(ev)) if ev.key == 2));
    checks.check("frequent key survives", cache.get(1, 0) == Ok(10));
    checks.check("new key has frequency one", cache.slots().any(|s| s.key == 4 && s.meta == 1));

    let evicted = cache.put(5, 50, 0);
    checks.check("newest key is next victim", matches!(evicted, Ok(Some(ev)) if ev.key == 4));
    checks.finish()
}

// == TTL ==
pub fn ttl_suite() -> ScenarioOutcome {
    let mut checks = Checks::new("ttl");
    let mut cache = TtlCache::ttl(2, 10);

    let _ = cache.put(1, 10, 0);
    checks.check("live before expiry", cache.get(1, 9) == Ok(10));
    checks.check("expired at boundary", cache.get(1, 10) == Err(CacheError::Expired(1)));
    checks.check("expired slot reclaimed", cache.is_empty());

    let _ = cache.put(2, 20, 20);
    let _ = cache.put(3, 30, 25);
    let reused = cache.put(4, 40, 31);
    checks.check("expired slot reused without eviction", reused == Ok(None));
    checks.check("purge removes remaining dead slots", cache.purge_expired(100) == 2);
    checks.finish()
}

// == ARC ==
pub fn arc_suite() -> ScenarioOutcome {
    let mut checks = Checks::new("arc");
    let mut cache = ArcCache::new(2, 2);

    let _ = cache.put(1, 10);
    checks.check("miss inserts into recent", cache.in_recent(1));

    let _ = cache.get(1);
    checks.check("second touch promotes", cache.in_frequent(1) && !cache.in_recent(1));

    let _ = cache.put(2, 20);
    let _ = cache.put(3, 30);
    let evicted = cache.put(4, 40);
    checks.check("recent evicts index zero", matches!(evicted, Ok(Some(ev)) if ev.key == 2));

    let _ = cache.get(3);
    let _ = cache.get(4);
    checks.check(
        "frequent evicts index zero",
        !cache.in_frequent(1) && cache.in_frequent(3) && cache.in_frequent(4),
    );
    checks.finish()
}

// == Two-Level ==
pub fn two_level_suite() -> ScenarioOutcome {
    let mut checks = Checks::new("two_level");
    let mut cache = TwoLevelCache::new(1, 2);

    let _ = cache.put(1, 10, 1);
    let _ = cache.put(2, 20, 2);
    checks.check("l1 victim demoted", cache.level_of(1) == Some(Level::L2));
    checks.check("l2 hit promotes", cache.lookup(1, 3) == Ok((10, Level::L2)));
    checks.check("promoted key now in l1", cache.level_of(1) == Some(Level::L1));
    checks.check("miss reported", cache.get(9, 4) == Err(CacheError::NotFound(9)));
    checks.finish()
}

// == Write-Back ==
pub fn write_back_suite() -> ScenarioOutcome {
    let mut checks = Checks::new("write_back");
    let mut cache = WriteCache::write_back(2, BackingStore::new(8));

    let _ = cache.put(1, 11, 1);
    checks.check("write marks dirty", cache.is_dirty(1));
    checks.check("store untouched", cache.store().peek(1) == Some(0));

    let _ = cache.put(2, 22, 2);
    let _ = cache.put(3, 33, 3);
    checks.check("dirty victim written back", cache.store().peek(1) == Some(11));
    checks.check("flush writes remaining", cache.flush() == Ok(2));
    checks.check("flush clears dirty bits", cache.dirty_count() == 0);
    checks.finish()
}

// == Write-Through ==
pub fn write_through_suite() -> ScenarioOutcome {
    let mut checks = Checks::new("write_through");
    let mut cache = WriteCache::write_through(2, BackingStore::new(8));

    let _ = cache.put(1, 11, 1);
    checks.check("store updated immediately", cache.store().peek(1) == Some(11));
    checks.check("slot stays clean", !cache.is_dirty(1));
    checks.check("read hits cache", cache.get(1, 2) == Ok(11));
    checks.check("flush has nothing to do", cache.flush() == Ok(0));
    checks.finish()
}

// == Buffer Pool ==
pub fn buffer_pool_suite() -> ScenarioOutcome {
    let mut checks = Checks::new("buffer_pool");
    let mut pool = BufferPool::new(2, BackingStore::new(8));

    let _ = pool.pin(1, 0);
    let _ = pool.pin(2, 1);
    checks.check("all pinned is full", pool.pin(3, 2) == Err(CacheError::Full(2)));

    let _ = pool.write(1, 99);
    let _ = pool.unpin(1, false);
    checks.check("unpinned frame evictable", pool.pin(3, 3).is_ok());
    checks.check("dirty page written back", pool.store().peek(1) == Some(99));
    checks.check("evicted page cannot be unpinned", pool.unpin(1, false) == Err(CacheError::NotFound(1)));
    checks.finish()
}

// == Run All ==
/// Runs every suite in a fixed order.
pub fn run_all() -> Vec<ScenarioOutcome> {
    vec![
        lru_suite(),
        lfu_suite(),
        ttl_suite(),
        arc_suite(),
        two_level_suite(),
        write_back_suite(),
        write_through_suite(),
        buffer_pool_suite(),
    ]
}

/// Returns the suites with at least one failed check.
pub fn failed(outcomes: &[ScenarioOutcome]) -> Vec<&ScenarioOutcome> {
    outcomes.iter().filter(|o| !o.all_passed()).collect()
}
