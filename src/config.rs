//! Configuration Module
//!
//! Handles loading and validating simulation parameters from environment variables.

use std::env;
use std::str::FromStr;

use crate::error::{CacheError, Result};

/// Output format for the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown report format '{}'",
                other
            ))),
        }
    }
}

/// Simulation configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Slot count for the LRU, LFU, TTL and write caches
    pub cache_capacity: usize,
    /// Two-level cache: L1 slots
    pub l1_capacity: usize,
    /// Two-level cache: L2 slots
    pub l2_capacity: usize,
    /// ARC recent list size
    pub arc_recent: usize,
    /// ARC frequent list size
    pub arc_frequent: usize,
    /// TTL cache lifetime in logical ticks
    pub ttl_ticks: u64,
    /// Backing store size in words
    pub store_size: usize,
    /// Number of accesses in the simulated workload
    pub workload_length: usize,
    /// Distinct keys the workload draws from
    pub key_space: usize,
    /// Keys in the hot set
    pub hot_keys: usize,
    /// Share of accesses hitting the hot set, 0..=100
    pub hot_percent: u8,
    pub report_format: ReportFormat,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Slots per single-level cache (default: 8)
    /// - `L1_CAPACITY` / `L2_CAPACITY` - Two-level sizes (default: 2 / 8)
    /// - `ARC_RECENT` / `ARC_FREQUENT` - ARC list sizes (default: 4 / 4)
    /// - `TTL_TICKS` - TTL lifetime (default: 64)
    /// - `STORE_SIZE` - Backing store words (default: 64)
    /// - `WORKLOAD_LENGTH` - Simulated accesses (default: 1000)
    /// - `KEY_SPACE` - Distinct keys (default: 32)
    /// - `HOT_KEYS` - Hot set size (default: 4)
    /// - `HOT_PERCENT` - Hot access share (default: 80)
    /// - `REPORT_FORMAT` - `text` or `json` (default: text)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: env_or("CACHE_CAPACITY", defaults.cache_capacity),
            l1_capacity: env_or("L1_CAPACITY", defaults.l1_capacity),
            l2_capacity: env_or("L2_CAPACITY", defaults.l2_capacity),
            arc_recent: env_or("ARC_RECENT", defaults.arc_recent),
            arc_frequent: env_or("ARC_FREQUENT", defaults.arc_frequent),
            ttl_ticks: env_or("TTL_TICKS", defaults.ttl_ticks),
            store_size: env_or("STORE_SIZE", defaults.store_size),
            workload_length: env_or("WORKLOAD_LENGTH", defaults.workload_length),
            key_space: env_or("KEY_SPACE", defaults.key_space),
            hot_keys: env_or("HOT_KEYS", defaults.hot_keys),
            hot_percent: env_or("HOT_PERCENT", defaults.hot_percent),
            report_format: env_or("REPORT_FORMAT", defaults.report_format),
        }
    }

    /// Rejects combinations the simulator cannot run.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("CACHE_CAPACITY", self.cache_capacity),
            ("L1_CAPACITY", self.l1_capacity),
            ("L2_CAPACITY", self.l2_capacity),
            ("ARC_RECENT", self.arc_recent),
            ("ARC_FREQUENT", self.arc_frequent),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, size)| *size == 0) {
            return Err(CacheError::InvalidConfig(format!(
                "{} must be at least 1",
                name
            )));
        }
        if self.hot_percent > 100 {
            return Err(CacheError::InvalidConfig(format!(
                "HOT_PERCENT {} exceeds 100",
                self.hot_percent
            )));
        }
        if self.hot_keys > self.key_space {
            return Err(CacheError::InvalidConfig(format!(
                "HOT_KEYS {} exceeds KEY_SPACE {}",
                self.hot_keys, self.key_space
            )));
        }
        if self.key_space > self.store_size {
            return Err(CacheError::InvalidConfig(format!(
                "KEY_SPACE {} exceeds STORE_SIZE {}",
                self.key_space, self.store_size
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 8,
            l1_capacity: 2,
            l2_capacity: 8,
            arc_recent: 4,
            arc_frequent: 4,
            ttl_ticks: 64,
            store_size: 64,
            workload_length: 1000,
            key_space: 32,
            hot_keys: 4,
            hot_percent: 80,
            report_format: ReportFormat::Text,
        }
    }
}
