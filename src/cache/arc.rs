//! ARC Cache Module
//!
//! Simplified adaptive replacement: a "recent" list for keys seen once and a
//! "frequent" list for keys touched at least twice. There are no ghost lists
//! and the split between the two lists is fixed at construction.

use tracing::debug;

use crate::cache::list::FixedList;
use crate::cache::slot::Eviction;
use crate::cache::{Cache, CacheStats, EMPTY_KEY};
use crate::error::{CacheError, Result};

// == ARC Cache ==
#[derive(Debug, Clone)]
pub struct ArcCache {
    /// Keys seen once, oldest at index 0
    recent: FixedList,
    /// Keys seen at least twice, least recently used at index 0
    frequent: FixedList,
    stats: CacheStats,
}

impl ArcCache {
    // == Constructor ==
    pub fn new(recent_capacity: usize, frequent_capacity: usize) -> Self {
        Self {
            recent: FixedList::new(recent_capacity),
            frequent: FixedList::new(frequent_capacity),
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Retrieves `key`, promoting it to the frequent list on its second touch.
    pub fn get(&mut self, key: i64) -> Result<i64> {
        if let Some(i) = self.frequent.position(key) {
            let value = self.frequent.value_at(i);
            self.frequent.move_to_back(i);
            self.stats.record_hit();
            return Ok(value);
        }

        if let Some(i) = self.recent.position(key) {
            let value = self.recent.value_at(i);
            self.promote(i);
            self.stats.record_hit();
            return Ok(value);
        }

        self.stats.record_miss();
        Err(CacheError::NotFound(key))
    }

    // == Put ==
    /// Stores `value` under `key`.
    ///
    /// A new key enters the recent list. A put on a key already in the recent
    /// list counts as its second touch and promotes it.
    pub fn put(&mut self, key: i64, value: i64) -> Result<Option<Eviction>> {
        if key == EMPTY_KEY {
            return Err(CacheError::InvalidKey(key));
        }

        if let Some(i) = self.frequent.position(key) {
            self.frequent.set_value(i, value);
            self.frequent.move_to_back(i);
            return Ok(None);
        }

        if let Some(i) = self.recent.position(key) {
            self.recent.set_value(i, value);
            return Ok(self.promote(i));
        }

        if self.recent.capacity() == 0 {
            return Err(CacheError::Full(0));
        }

        Ok(self
            .recent
            .push_back(key, value)
            .map(|(k, v)| self.evicted("recent", k, v)))
    }

    // Moves recent[index] to the back of frequent, evicting frequent[0] if full.
    fn promote(&mut self, index: usize) -> Option<Eviction> {
        let (key, value) = self.recent.remove_at(index);
        self.frequent
            .push_back(key, value)
            .map(|(k, v)| self.evicted("frequent", k, v))
    }

    fn evicted(&mut self, list: &'static str, key: i64, value: i64) -> Eviction {
        self.stats.record_eviction();
        debug!(list, evicted_key = key, "arc eviction");
        Eviction { slot: 0, key, value }
    }

    // == Membership ==
    pub fn in_recent(&self, key: i64) -> bool {
        self.recent.contains(key)
    }

    pub fn in_frequent(&self, key: i64) -> bool {
        self.frequent.contains(key)
    }

    pub fn recent(&self) -> &FixedList {
        &self.recent
    }

    pub fn frequent(&self) -> &FixedList {
        &self.frequent
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.recent.len() + self.frequent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.recent.capacity() + self.frequent.capacity()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.len());
        stats
    }
}

impl Cache for ArcCache {
    fn name(&self) -> &'static str {
        "arc"
    }

    // Ordering is positional, so the logical clock is unused.
    fn get(&mut self, key: i64, _now: u64) -> Result<i64> {
        ArcCache::get(self, key)
    }

    fn put(&mut self, key: i64, value: i64, _now: u64) -> Result<Option<Eviction>> {
        ArcCache::put(self, key, value)
    }

    fn len(&self) -> usize {
        ArcCache::len(self)
    }

    fn capacity(&self) -> usize {
        ArcCache::capacity(self)
    }

    fn stats(&self) -> CacheStats {
        ArcCache::stats(self)
    }
}
