//! Fixed Cache Module
//!
//! Generic fixed-capacity associative cache. One slot table, one pluggable
//! eviction policy, O(capacity) scans for every operation.

use tracing::debug;

use crate::cache::policy::{EvictionPolicy, Lfu, Lru, Ttl};
use crate::cache::slot::{Eviction, Slot, SlotTable};
use crate::cache::{Cache, CacheStats, EMPTY_KEY};
use crate::error::{CacheError, Result};

/// Fixed cache evicting the least recently used slot.
pub type LruCache = FixedCache<Lru>;
/// Fixed cache evicting the least frequently used slot.
pub type LfuCache = FixedCache<Lfu>;
/// Fixed cache whose slots expire after a fixed number of ticks.
pub type TtlCache = FixedCache<Ttl>;

// == Fixed Cache ==
/// Capacity-bounded cache over parallel key/value/metadata arrays.
#[derive(Debug, Clone)]
pub struct FixedCache<P: EvictionPolicy> {
    /// Slot storage
    table: SlotTable,
    /// Metadata rules and victim comparator
    policy: P,
    /// Performance statistics
    stats: CacheStats,
}

impl FixedCache<Lru> {
    pub fn lru(capacity: usize) -> Self {
        Self::new(capacity, Lru)
    }
}

impl FixedCache<Lfu> {
    pub fn lfu(capacity: usize) -> Self {
        Self::new(capacity, Lfu)
    }
}

impl FixedCache<Ttl> {
    pub fn ttl(capacity: usize, ttl: u64) -> Self {
        Self::new(capacity, Ttl::new(ttl))
    }
}

impl<P: EvictionPolicy> FixedCache<P> {
    // == Constructor ==
    /// Creates an empty cache with `capacity` slots.
    pub fn new(capacity: usize, policy: P) -> Self {
        Self {
            table: SlotTable::new(capacity),
            policy,
            stats: CacheStats::new(),
        }
    }

    // == Find ==
    /// Returns the slot index holding `key`, ignoring expiry.
    pub fn find(&self, key: i64) -> Option<usize> {
        self.table.find(key)
    }

    // == Get ==
    /// Retrieves the value for `key` at logical time `now`.
    ///
    /// A hit updates the slot's metadata through the policy. An expired slot
    /// is reclaimed and reported as `Expired`.
    pub fn get(&mut self, key: i64, now: u64) -> Result<i64> {
        let Some(index) = self.table.find(key) else {
            self.stats.record_miss();
            return Err(CacheError::NotFound(key));
        };

        if self.policy.is_expired(self.table.meta(index), now) {
            self.table.clear(index);
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!(policy = self.policy.name(), key, now, "slot expired on read");
            return Err(CacheError::Expired(key));
        }

        let meta = self.policy.touch(self.table.meta(index), now);
        self.table.set_meta(index, meta);
        self.stats.record_hit();
        Ok(self.table.value(index))
    }

    // == Put ==
    /// Stores `value` under `key` at logical time `now`.
    ///
    /// Expired slots are reclaimed first. An existing key is updated in place.
    /// Otherwise the first free slot is used, and failing that the policy's
    /// victim is evicted and returned.
    pub fn put(&mut self, key: i64, value: i64, now: u64) -> Result<Option<Eviction>> {
        if key == EMPTY_KEY {
            return Err(CacheError::InvalidKey(key));
        }

        self.purge_expired(now);

        if let Some(index) = self.table.find(key) {
            let meta = self.policy.refresh(self.table.meta(index), now);
            self.table.occupy(index, key, value, meta);
            return Ok(None);
        }

        if let Some(index) = self.table.free_slot() {
            self.table.occupy(index, key, value, self.policy.admit(now));
            return Ok(None);
        }

        let policy = &self.policy;
        let Some(index) = self.table.victim(|a, b| policy.ranks_before(a, b), |_| true) else {
            return Err(CacheError::Full(self.table.capacity()));
        };

        let evicted_meta = self.table.meta(index);
        let (evicted_key, evicted_value) = self
            .table
            .clear(index)
            .ok_or(CacheError::Full(self.table.capacity()))?;
        self.table.occupy(index, key, value, self.policy.admit(now));
        self.stats.record_eviction();
        debug!(
            policy = self.policy.name(),
            slot = index,
            evicted_key,
            evicted_meta,
            key,
            "evicted slot"
        );

        Ok(Some(Eviction {
            slot: index,
            key: evicted_key,
            value: evicted_value,
        }))
    }

    // == Peek ==
    /// Returns the stored value without touching metadata or statistics.
    pub fn peek(&self, key: i64) -> Option<i64> {
        self.table.find(key).map(|i| self.table.value(i))
    }

    // == Remove ==
    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: i64) -> Result<i64> {
        self.table
            .find(key)
            .and_then(|i| self.table.clear(i))
            .map(|(_, value)| value)
            .ok_or(CacheError::NotFound(key))
    }

    // == Purge Expired ==
    /// Reclaims every slot whose metadata the policy considers expired.
    ///
    /// Returns the number of slots reclaimed.
    pub fn purge_expired(&mut self, now: u64) -> usize {
        let mut removed = 0;
        for index in 0..self.table.capacity() {
            if self.table.is_occupied(index) && self.policy.is_expired(self.table.meta(index), now)
            {
                self.table.clear(index);
                self.stats.record_expiration();
                removed += 1;
            }
        }
        if removed > 0 {
            debug!(policy = self.policy.name(), removed, now, "purged expired slots");
        }
        removed
    }

    // == Contains ==
    pub fn contains(&self, key: i64) -> bool {
        self.table.find(key).is_some()
    }

    // == Clear ==
    /// Empties every slot. Statistics are kept.
    pub fn clear(&mut self) {
        self.table.clear_all();
    }

    // == Length ==
    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Iterates occupied slots in index order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.table.slots()
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.table.len());
        stats
    }
}

impl<P: EvictionPolicy> Cache for FixedCache<P> {
    fn name(&self) -> &'static str {
        self.policy.name()
    }

    fn get(&mut self, key: i64, now: u64) -> Result<i64> {
        FixedCache::get(self, key, now)
    }

    fn put(&mut self, key: i64, value: i64, now: u64) -> Result<Option<Eviction>> {
        FixedCache::put(self, key, value, now)
    }

    fn len(&self) -> usize {
        FixedCache::len(self)
    }

    fn capacity(&self) -> usize {
        FixedCache::capacity(self)
    }

    fn stats(&self) -> CacheStats {
        FixedCache::stats(self)
    }
}
