//! Two-Level Cache Module
//!
//! A small L1 in front of a larger L2, both LRU. Levels are exclusive: an L2
//! hit moves the entry up into L1 and L1's victim moves down into L2.

use serde::Serialize;
use tracing::debug;

use crate::cache::fixed::LruCache;
use crate::cache::slot::Eviction;
use crate::cache::{Cache, CacheStats, EMPTY_KEY};
use crate::error::{CacheError, Result};

/// Level that served a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    L1,
    L2,
}

// == Two-Level Cache ==
#[derive(Debug, Clone)]
pub struct TwoLevelCache {
    l1: LruCache,
    l2: LruCache,
    stats: CacheStats,
    l1_hits: u64,
    l2_hits: u64,
}

impl TwoLevelCache {
    // == Constructor ==
    pub fn new(l1_capacity: usize, l2_capacity: usize) -> Self {
        Self {
            l1: LruCache::lru(l1_capacity),
            l2: LruCache::lru(l2_capacity),
            stats: CacheStats::new(),
            l1_hits: 0,
            l2_hits: 0,
        }
    }

    // == Lookup ==
    /// Retrieves `key` and reports which level held it.
    pub fn lookup(&mut self, key: i64, now: u64) -> Result<(i64, Level)> {
        if self.l1.contains(key) {
            let value = self.l1.get(key, now)?;
            self.l1_hits += 1;
            self.stats.record_hit();
            return Ok((value, Level::L1));
        }

        match self.l2.remove(key) {
            Ok(value) => {
                self.install(key, value, now)?;
                self.l2_hits += 1;
                self.stats.record_hit();
                debug!(key, "promoted from l2");
                Ok((value, Level::L2))
            }
            Err(err) if err.is_miss() => {
                self.stats.record_miss();
                Err(CacheError::NotFound(key))
            }
            Err(err) => Err(err),
        }
    }

    // == Get ==
    pub fn get(&mut self, key: i64, now: u64) -> Result<i64> {
        self.lookup(key, now).map(|(value, _)| value)
    }

    // == Put ==
    /// Stores `value` in L1, dropping any stale L2 copy.
    ///
    /// Returns the entry that left the cache entirely, if any.
    pub fn put(&mut self, key: i64, value: i64, now: u64) -> Result<Option<Eviction>> {
        if key == EMPTY_KEY {
            return Err(CacheError::InvalidKey(key));
        }
        match self.l2.remove(key) {
            Ok(_) => {}
            Err(err) if err.is_miss() => {}
            Err(err) => return Err(err),
        }
        self.install(key, value, now)
    }

    // Inserts into L1 and cascades L1's victim down into L2.
    fn install(&mut self, key: i64, value: i64, now: u64) -> Result<Option<Eviction>> {
        match self.l1.put(key, value, now) {
            Ok(None) => Ok(None),
            Ok(Some(demoted)) => {
                debug!(key = demoted.key, "demoted to l2");
                self.demote(demoted, now)
            }
            // L1 has no slots, so the entry lives in L2 only
            Err(CacheError::Full(_)) => {
                let dropped = self.l2.put(key, value, now)?;
                if dropped.is_some() {
                    self.stats.record_eviction();
                }
                Ok(dropped)
            }
            Err(err) => Err(err),
        }
    }

    // Moves an L1 victim into L2. A victim L2 cannot hold leaves the cache.
    fn demote(&mut self, demoted: Eviction, now: u64) -> Result<Option<Eviction>> {
        match self.l2.put(demoted.key, demoted.value, now) {
            Ok(dropped) => {
                if dropped.is_some() {
                    self.stats.record_eviction();
                }
                Ok(dropped)
            }
            Err(CacheError::Full(_)) => {
                self.stats.record_eviction();
                debug!(key = demoted.key, "l2 has no slots, dropped");
                Ok(Some(demoted))
            }
            Err(err) => Err(err),
        }
    }

    // == Inspection ==
    /// Returns the level currently holding `key`.
    pub fn level_of(&self, key: i64) -> Option<Level> {
        if self.l1.contains(key) {
            Some(Level::L1)
        } else if self.l2.contains(key) {
            Some(Level::L2)
        } else {
            None
        }
    }

    pub fn l1(&self) -> &LruCache {
        &self.l1
    }

    pub fn l2(&self) -> &LruCache {
        &self.l2
    }

    /// Returns `(l1_hits, l2_hits)`.
    pub fn level_hits(&self) -> (u64, u64) {
        (self.l1_hits, self.l2_hits)
    }

    pub fn len(&self) -> usize {
        self.l1.len() + self.l2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.l1.capacity() + self.l2.capacity()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.len());
        stats
    }
}

impl Cache for TwoLevelCache {
    fn name(&self) -> &'static str {
        "two_level"
    }

    fn get(&mut self, key: i64, now: u64) -> Result<i64> {
        TwoLevelCache::get(self, key, now)
    }

    fn put(&mut self, key: i64, value: i64, now: u64) -> Result<Option<Eviction>> {
        TwoLevelCache::put(self, key, value, now)
    }

    fn len(&self) -> usize {
        TwoLevelCache::len(self)
    }

    fn capacity(&self) -> usize {
        TwoLevelCache::capacity(self)
    }

    fn stats(&self) -> CacheStats {
        TwoLevelCache::stats(self)
    }
}
