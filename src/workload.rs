//! Workload Module
//!
//! Deterministic access traces and a driver that replays them against any
//! [`Cache`] variant.

use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{Cache, CacheStats};
use crate::error::{CacheError, Result};

/// Multiplier spreading cold accesses across the cold key range.
const COLD_STRIDE: usize = 7919;

// == Workload ==
/// Fixed sequence of keys to access, one per logical tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    keys: Vec<i64>,
}

impl Workload {
    pub fn new(keys: Vec<i64>) -> Self {
        Self { keys }
    }

    /// Builds a trace where `hot_percent` of every hundred accesses cycle
    /// through keys `0..hot_keys` and the rest stride across
    /// `hot_keys..key_space`.
    pub fn skewed(length: usize, key_space: usize, hot_keys: usize, hot_percent: u8) -> Self {
        if key_space == 0 {
            return Self::new(Vec::new());
        }
        let hot_keys = hot_keys.min(key_space);
        let cold_space = key_space - hot_keys;

        let keys = (0..length)
            .map(|i| {
                let hot = hot_keys > 0 && (i % 100) < usize::from(hot_percent);
                if hot || cold_space == 0 {
                    (i % hot_keys.max(1)) as i64
                } else {
                    (hot_keys + (i * COLD_STRIDE) % cold_space) as i64
                }
            })
            .collect();
        Self::new(keys)
    }

    pub fn keys(&self) -> &[i64] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// == Simulation Report ==
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub variant: String,
    pub accesses: usize,
    /// Misses whose fill was refused because no slot could be evicted
    pub failed_puts: u64,
    pub hit_rate: f64,
    pub stats: CacheStats,
}

// == Simulate ==
/// Replays `workload` against `cache`: every access is a get at tick `i`, and
/// a miss fills the key with `key * 10` (wrapping).
pub fn simulate(cache: &mut dyn Cache, workload: &Workload) -> Result<SimReport> {
    let mut failed_puts = 0;

    for (i, &key) in workload.keys().iter().enumerate() {
        let now = i as u64;
        match cache.get(key, now) {
            Ok(_) => {}
            Err(err) if err.is_miss() => match cache.put(key, key.wrapping_mul(10), now) {
                Ok(_) => {}
                Err(CacheError::Full(capacity)) => {
                    failed_puts += 1;
                    warn!(variant = cache.name(), key, capacity, "fill refused, cache full");
                }
                Err(err) => return Err(err),
            },
            Err(err) => return Err(err),
        }
    }

    let stats = cache.stats();
    debug!(variant = cache.name(), hits = stats.hits, misses = stats.misses, "simulation done");

    Ok(SimReport {
        variant: cache.name().to_string(),
        accesses: workload.len(),
        failed_puts,
        hit_rate: stats.hit_rate(),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{LfuCache, LruCache};

    #[test]
    fn test_skewed_is_deterministic() {
        let a = Workload::skewed(500, 32, 4, 80);
        let b = Workload::skewed(500, 32, 4, 80);
        assert_eq!(a, b);
        assert_eq!(a.len(), 500);
    }

    #[test]
    fn test_skewed_stays_in_key_space() {
        let workload = Workload::skewed(1000, 20, 5, 50);
        assert!(workload.keys().iter().all(|&k| (0..20).contains(&k)));
        assert!(workload.keys().iter().any(|&k| k >= 5));
    }

    #[test]
    fn test_skewed_hot_share() {
        let workload = Workload::skewed(1000, 32, 4, 80);
        let hot = workload.keys().iter().filter(|&&k| k < 4).count();
        assert_eq!(hot, 800);
    }

    #[test]
    fn test_skewed_edge_cases() {
        assert!(Workload::skewed(10, 0, 0, 50).is_empty());
        // every key is hot when there is no cold range
        let all_hot = Workload::skewed(10, 3, 3, 0);
        assert!(all_hot.keys().iter().all(|&k| k < 3));
    }

    #[test]
    fn test_simulate_counts_every_access() {
        let workload = Workload::new(vec![1, 2, 1, 3, 1, 2]);
        let mut cache = LruCache::lru(2);

        let report = simulate(&mut cache, &workload).unwrap();
        assert_eq!(report.variant, "lru");
        assert_eq!(report.accesses, 6);
        assert_eq!(report.stats.hits + report.stats.misses, 6);
        assert_eq!(report.stats.hits, 2);
        assert_eq!(report.failed_puts, 0);
    }

    #[test]
    fn test_simulate_fills_with_derived_value() {
        let workload = Workload::new(vec![7]);
        let mut cache = LfuCache::lfu(1);

        simulate(&mut cache, &workload).unwrap();
        assert_eq!(cache.peek(7), Some(70));
    }

    #[test]
    fn test_simulate_large_keys_wrap_fill_value() {
        let key = i64::MAX / 2;
        let workload = Workload::new(vec![key, key]);
        let mut cache = LruCache::lru(1);

        let report = simulate(&mut cache, &workload).unwrap();
        assert_eq!(report.stats.hits, 1);
        assert_eq!(cache.peek(key), Some(key.wrapping_mul(10)));
    }

    #[test]
    fn test_simulate_zero_capacity_counts_failed_puts() {
        let workload = Workload::new(vec![1, 2, 3]);
        let mut cache = LruCache::lru(0);

        let report = simulate(&mut cache, &workload).unwrap();
        assert_eq!(report.failed_puts, 3);
        assert_eq!(report.hit_rate, 0.0);
    }
}
