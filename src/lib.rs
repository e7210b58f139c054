//! slotcache - Fixed-capacity cache simulators
//!
//! Parallel-array caches with LRU, LFU, TTL, ARC, two-level, write-back and
//! buffer-pool behavior, plus scenario suites and a workload simulator.

pub mod cache;
pub mod config;
pub mod error;
pub mod report;
pub mod scenarios;
pub mod store;
pub mod workload;

pub use cache::Cache;
pub use config::Config;
pub use error::{CacheError, Result};
