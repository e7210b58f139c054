//! Buffer Pool Module
//!
//! Page frames over a [`BackingStore`]. A pinned frame cannot be evicted, so
//! when every frame is pinned a new page cannot be brought in.

use tracing::debug;

use crate::cache::slot::SlotTable;
use crate::cache::CacheStats;
use crate::error::{CacheError, Result};
use crate::store::BackingStore;

// == Buffer Pool ==
/// Fixed set of frames. Frame metadata is the last pin time; the victim is the
/// least recently pinned frame with a zero pin count.
#[derive(Debug, Clone)]
pub struct BufferPool {
    /// Page ids, page data and last-used times
    frames: SlotTable,
    pins: Vec<u32>,
    dirty: Vec<bool>,
    store: BackingStore,
    stats: CacheStats,
}

impl BufferPool {
    // == Constructor ==
    pub fn new(frames: usize, store: BackingStore) -> Self {
        Self {
            frames: SlotTable::new(frames),
            pins: vec![0; frames],
            dirty: vec![false; frames],
            store,
            stats: CacheStats::new(),
        }
    }

    // == Pin ==
    /// Pins `page` into a frame and returns the frame index.
    ///
    /// A non-resident page is loaded into a free frame or into the least
    /// recently used unpinned frame, writing that frame back first if dirty.
    pub fn pin(&mut self, page: i64, now: u64) -> Result<usize> {
        self.store.check(page)?;

        if let Some(frame) = self.frames.find(page) {
            self.pins[frame] += 1;
            self.frames.set_meta(frame, now);
            self.stats.record_hit();
            return Ok(frame);
        }
        self.stats.record_miss();

        let frame = match self.frames.free_slot() {
            Some(frame) => frame,
            None => {
                let pins = &self.pins;
                let frame = self
                    .frames
                    .victim(|a, b| a < b, |i| pins[i] == 0)
                    .ok_or(CacheError::Full(self.frames.capacity()))?;
                self.evict(frame)?;
                frame
            }
        };

        let data = self.store.read(page)?;
        self.frames.occupy(frame, page, data, now);
        self.pins[frame] = 1;
        self.dirty[frame] = false;
        Ok(frame)
    }

    fn evict(&mut self, frame: usize) -> Result<()> {
        let page = self.frames.key(frame);
        if self.dirty[frame] {
            self.store.write(page, self.frames.value(frame))?;
            self.dirty[frame] = false;
            self.stats.record_write_back();
        }
        self.frames.clear(frame);
        self.stats.record_eviction();
        debug!(page, frame, "evicted page");
        Ok(())
    }

    // Resolves a resident page to its frame, requiring at least one pin.
    fn pinned_frame(&self, page: i64) -> Result<usize> {
        let frame = self.frames.find(page).ok_or(CacheError::NotFound(page))?;
        if self.pins[frame] == 0 {
            return Err(CacheError::NotPinned(page));
        }
        Ok(frame)
    }

    // == Unpin ==
    /// Drops one pin on `page`, marking the frame dirty if `is_dirty`.
    pub fn unpin(&mut self, page: i64, is_dirty: bool) -> Result<()> {
        let frame = self.pinned_frame(page)?;
        self.pins[frame] -= 1;
        self.dirty[frame] |= is_dirty;
        Ok(())
    }

    // == Read / Write ==
    pub fn read(&self, page: i64) -> Result<i64> {
        let frame = self.pinned_frame(page)?;
        Ok(self.frames.value(frame))
    }

    pub fn write(&mut self, page: i64, value: i64) -> Result<()> {
        let frame = self.pinned_frame(page)?;
        self.frames.set_value(frame, value);
        self.dirty[frame] = true;
        Ok(())
    }

    // == Flush All ==
    /// Writes every dirty frame, pinned or not, back to the store.
    pub fn flush_all(&mut self) -> Result<usize> {
        let mut flushed = 0;
        for frame in 0..self.frames.capacity() {
            if self.frames.is_occupied(frame) && self.dirty[frame] {
                self.store.write(self.frames.key(frame), self.frames.value(frame))?;
                self.dirty[frame] = false;
                self.stats.record_write_back();
                flushed += 1;
            }
        }
        Ok(flushed)
    }

    // == Inspection ==
    pub fn pin_count(&self, page: i64) -> Option<u32> {
        self.frames.find(page).map(|frame| self.pins[frame])
    }

    pub fn is_resident(&self, page: i64) -> bool {
        self.frames.find(page).is_some()
    }

    pub fn store(&self) -> &BackingStore {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.frames.capacity()
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.frames.len());
        stats
    }
}
