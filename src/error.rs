//! Error types for the cache simulators
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for every cache variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not present in the cache
    #[error("Key not found: {0}")]
    NotFound(i64),

    /// Key was present but its TTL elapsed; the slot has been reclaimed
    #[error("Key expired: {0}")]
    Expired(i64),

    /// No slot can be evicted (zero capacity or every frame pinned)
    #[error("Cache full: no evictable slot among {0} slots")]
    Full(usize),

    /// The reserved empty-slot sentinel was used as a key
    #[error("Invalid key: {0} is reserved for empty slots")]
    InvalidKey(i64),

    /// Backing store address outside `0..size`
    #[error("Address {addr} out of range for store of size {size}")]
    AddressOutOfRange { addr: i64, size: usize },

    /// Unpin, read or write on a page whose pin count is zero
    #[error("Page not pinned: {0}")]
    NotPinned(i64),

    /// Configuration value rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CacheError {
    /// Returns true for the two lookup-miss variants.
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheError::NotFound(_) | CacheError::Expired(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
