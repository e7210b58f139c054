//! Write Policy Module
//!
//! LRU slot cache in front of a [`BackingStore`] with a parallel dirty-bit
//! array. Write-through updates the store on every put; write-back defers the
//! store write until the slot is evicted or flushed.

use serde::Serialize;
use tracing::debug;

use crate::cache::fixed::LruCache;
use crate::cache::slot::{Eviction, Slot};
use crate::cache::{Cache, CacheStats};
use crate::error::Result;
use crate::store::BackingStore;

/// When a cached write reaches the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// On eviction or explicit flush
    Back,
    /// Immediately, on every put
    Through,
}

// == Write Cache ==
#[derive(Debug, Clone)]
pub struct WriteCache {
    cache: LruCache,
    /// `dirty[i]` is set while slot `i` holds a value the store has not seen
    dirty: Vec<bool>,
    store: BackingStore,
    mode: WriteMode,
    write_backs: u64,
}

impl WriteCache {
    // == Constructor ==
    pub fn new(capacity: usize, store: BackingStore, mode: WriteMode) -> Self {
        Self {
            cache: LruCache::lru(capacity),
            dirty: vec![false; capacity],
            store,
            mode,
            write_backs: 0,
        }
    }

    pub fn write_back(capacity: usize, store: BackingStore) -> Self {
        Self::new(capacity, store, WriteMode::Back)
    }

    pub fn write_through(capacity: usize, store: BackingStore) -> Self {
        Self::new(capacity, store, WriteMode::Through)
    }

    // == Get ==
    /// Reads `addr`, loading it from the store into a clean slot on a miss.
    pub fn get(&mut self, addr: i64, now: u64) -> Result<i64> {
        self.store.check(addr)?;
        match self.cache.get(addr, now) {
            Ok(value) => Ok(value),
            Err(err) if err.is_miss() => {
                let value = self.store.read(addr)?;
                self.allocate(addr, value, now, false)?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }

    // == Put ==
    /// Writes `value` to `addr` according to the write mode.
    pub fn put(&mut self, addr: i64, value: i64, now: u64) -> Result<Option<Eviction>> {
        self.store.check(addr)?;
        let evicted = self.allocate(addr, value, now, self.mode == WriteMode::Back)?;
        if self.mode == WriteMode::Through {
            self.store.write(addr, value)?;
        }
        Ok(evicted)
    }

    // Places the entry in a slot, writing back a dirty victim first.
    fn allocate(
        &mut self,
        addr: i64,
        value: i64,
        now: u64,
        dirty: bool,
    ) -> Result<Option<Eviction>> {
        let evicted = self.cache.put(addr, value, now)?;

        if let Some(ev) = evicted {
            if self.dirty[ev.slot] {
                self.store.write(ev.key, ev.value)?;
                self.write_backs += 1;
                debug!(addr = ev.key, slot = ev.slot, "wrote back dirty victim");
            }
            self.dirty[ev.slot] = false;
        }

        if let Some(index) = self.cache.find(addr) {
            self.dirty[index] = dirty;
        }
        Ok(evicted)
    }

    // == Flush ==
    /// Writes every dirty slot to the store and clears its dirty bit.
    ///
    /// Returns the number of slots written.
    pub fn flush(&mut self) -> Result<usize> {
        let pending: Vec<Slot> = self
            .cache
            .slots()
            .filter(|slot| self.dirty[slot.index])
            .collect();

        for slot in &pending {
            self.store.write(slot.key, slot.value)?;
            self.dirty[slot.index] = false;
            self.write_backs += 1;
        }
        if !pending.is_empty() {
            debug!(flushed = pending.len(), "flushed dirty slots");
        }
        Ok(pending.len())
    }

    // == Inspection ==
    pub fn is_dirty(&self, addr: i64) -> bool {
        self.cache.find(addr).is_some_and(|i| self.dirty[i])
    }

    pub fn dirty_count(&self) -> usize {
        self.cache.slots().filter(|s| self.dirty[s.index]).count()
    }

    pub fn contains(&self, addr: i64) -> bool {
        self.cache.contains(addr)
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    pub fn store(&self) -> &BackingStore {
        &self.store
    }

    pub fn into_store(self) -> BackingStore {
        self.store
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.cache.stats();
        stats.write_backs = self.write_backs;
        stats
    }
}

impl Cache for WriteCache {
    fn name(&self) -> &'static str {
        match self.mode {
            WriteMode::Back => "write_back",
            WriteMode::Through => "write_through",
        }
    }

    fn get(&mut self, key: i64, now: u64) -> Result<i64> {
        WriteCache::get(self, key, now)
    }

    fn put(&mut self, key: i64, value: i64, now: u64) -> Result<Option<Eviction>> {
        WriteCache::put(self, key, value, now)
    }

    fn len(&self) -> usize {
        WriteCache::len(self)
    }

    fn capacity(&self) -> usize {
        WriteCache::capacity(self)
    }

    fn stats(&self) -> CacheStats {
        WriteCache::stats(self)
    }
}
