//! Cache Module
//!
//! Fixed-capacity slot caches. Every variant stores entries in flat arrays
//! and finds them by linear scan.

mod arc;
mod buffer_pool;
mod fixed;
mod list;
mod policy;
mod slot;
mod stats;
mod two_level;
mod write;


// Re-export public types
pub use arc::ArcCache;
pub use buffer_pool::BufferPool;
pub use fixed::{FixedCache, LfuCache, LruCache, TtlCache};
pub use list::FixedList;
pub use policy::{EvictionPolicy, Lfu, Lru, Ttl};
pub use slot::{Eviction, Slot, SlotTable};
pub use stats::CacheStats;
pub use two_level::{Level, TwoLevelCache};
pub use write::{WriteCache, WriteMode};

use crate::error::Result;

// == Public Constants ==
/// Key value marking an unoccupied slot
pub const EMPTY_KEY: i64 = -1;

// == Cache Trait ==
/// Operations shared by every key/value cache variant.
///
/// `now` is a caller-supplied logical clock. Variants that order entries
/// positionally ignore it.
pub trait Cache {
    /// Variant name used in reports
    fn name(&self) -> &'static str;

    /// Looks up `key`; a miss is `NotFound` or `Expired`.
    fn get(&mut self, key: i64, now: u64) -> Result<i64>;

    /// Stores `value` under `key`, returning the entry evicted to make room.
    fn put(&mut self, key: i64, value: i64, now: u64) -> Result<Option<Eviction>>;

    fn len(&self) -> usize;

    fn capacity(&self) -> usize;

    fn stats(&self) -> CacheStats;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
