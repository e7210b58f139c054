//! Eviction Policy Module
//!
//! Policies decide what a slot's metadata means and which slot loses when the
//! table is full. Victim selection is a comparator over metadata.

// == Eviction Policy ==
/// Metadata rules plugged into [`FixedCache`](crate::cache::FixedCache).
pub trait EvictionPolicy {
    /// Short policy name used in reports and logs.
    fn name(&self) -> &'static str;

    /// Metadata for a freshly inserted slot.
    fn admit(&self, now: u64) -> u64;

    /// Metadata after a successful `get`.
    fn touch(&self, meta: u64, now: u64) -> u64;

    /// Metadata after `put` overwrites an existing key.
    fn refresh(&self, meta: u64, now: u64) -> u64 {
        self.touch(meta, now)
    }

    /// Whether a slot with this metadata is dead at `now`.
    fn is_expired(&self, _meta: u64, _now: u64) -> bool {
        false
    }

    /// True if metadata `a` should be evicted before `b`.
    fn ranks_before(&self, a: u64, b: u64) -> bool {
        a < b
    }
}

// == LRU ==
/// Least recently used: metadata is the last access time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lru;

impl EvictionPolicy for Lru {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn admit(&self, now: u64) -> u64 {
        now
    }

    fn touch(&self, _meta: u64, now: u64) -> u64 {
        now
    }
}

// == LFU ==
/// Least frequently used: metadata is the access count.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lfu;

impl EvictionPolicy for Lfu {
    fn name(&self) -> &'static str {
        "lfu"
    }

    fn admit(&self, _now: u64) -> u64 {
        1
    }

    fn touch(&self, meta: u64, _now: u64) -> u64 {
        meta.saturating_add(1)
    }
}

// == TTL ==
/// Time to live: metadata is the absolute expiry tick.
///
/// A slot is dead once `expiry <= now`. When nothing has expired and the table
/// is full, the slot closest to expiry is evicted.
#[derive(Debug, Clone, Copy)]
pub struct Ttl {
    /// Lifetime in logical ticks
    pub ttl: u64,
}

impl Ttl {
    pub fn new(ttl: u64) -> Self {
        Self { ttl }
    }
}

impl EvictionPolicy for Ttl {
    fn name(&self) -> &'static str {
        "ttl"
    }

    fn admit(&self, now: u64) -> u64 {
        now.saturating_add(self.ttl)
    }

    // Reads do not extend a lifetime.
    fn touch(&self, meta: u64, _now: u64) -> u64 {
        meta
    }

    fn refresh(&self, _meta: u64, now: u64) -> u64 {
        self.admit(now)
    }

    fn is_expired(&self, meta: u64, now: u64) -> bool {
        meta <= now
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_metadata_is_time() {
        let lru = Lru;
        assert_eq!(lru.admit(5), 5);
        assert_eq!(lru.touch(5, 9), 9);
        assert_eq!(lru.refresh(9, 12), 12);
        assert!(!lru.is_expired(0, u64::MAX));
    }

    #[test]
    fn test_lfu_metadata_counts() {
        let lfu = Lfu;
        assert_eq!(lfu.admit(100), 1);
        assert_eq!(lfu.touch(1, 100), 2);
        assert_eq!(lfu.refresh(2, 100), 3);
        assert_eq!(lfu.touch(u64::MAX, 0), u64::MAX);
    }

    #[test]
    fn test_ttl_expiry_boundary() {
        let ttl = Ttl::new(10);
        let expiry = ttl.admit(5);
        assert_eq!(expiry, 15);
        assert!(!ttl.is_expired(expiry, 14));
        assert!(ttl.is_expired(expiry, 15));
        assert!(ttl.is_expired(expiry, 16));
    }

    #[test]
    fn test_ttl_touch_keeps_expiry_refresh_resets() {
        let ttl = Ttl::new(10);
        assert_eq!(ttl.touch(15, 12), 15);
        assert_eq!(ttl.refresh(15, 12), 22);
    }

    #[test]
    fn test_default_comparator_prefers_minimum() {
        assert!(Lru.ranks_before(1, 2));
        assert!(!Lfu.ranks_before(2, 2));
    }
}
