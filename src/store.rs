//! Backing Store Module
//!
//! Flat word-addressed memory standing behind the write and buffer-pool caches.
//! Addresses are cache keys.

use crate::error::{CacheError, Result};

// == Backing Store ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackingStore {
    words: Vec<i64>,
    reads: u64,
    writes: u64,
}

impl BackingStore {
    // == Constructor ==
    /// Creates a store of `size` words, all zero.
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![0; size],
            reads: 0,
            writes: 0,
        }
    }

    /// Resolves `addr` to an index, rejecting anything outside `0..size`.
    pub fn check(&self, addr: i64) -> Result<usize> {
        usize::try_from(addr)
            .ok()
            .filter(|&i| i < self.words.len())
            .ok_or(CacheError::AddressOutOfRange {
                addr,
                size: self.words.len(),
            })
    }

    // == Read ==
    pub fn read(&mut self, addr: i64) -> Result<i64> {
        let index = self.check(addr)?;
        self.reads += 1;
        Ok(self.words[index])
    }

    // == Write ==
    pub fn write(&mut self, addr: i64, value: i64) -> Result<()> {
        let index = self.check(addr)?;
        self.writes += 1;
        self.words[index] = value;
        Ok(())
    }

    /// Reads a word without counting the access.
    pub fn peek(&self, addr: i64) -> Option<i64> {
        self.check(addr).ok().map(|i| self.words[i])
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn size(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_starts_zeroed() {
        let mut store = BackingStore::new(4);
        assert_eq!(store.size(), 4);
        assert_eq!(store.read(3).unwrap(), 0);
        assert_eq!(store.reads(), 1);
    }

    #[test]
    fn test_write_then_read() {
        let mut store = BackingStore::new(4);
        store.write(2, 42).unwrap();
        assert_eq!(store.read(2).unwrap(), 42);
        assert_eq!(store.writes(), 1);
        assert_eq!(store.peek(2), Some(42));
    }

    #[test]
    fn test_out_of_range() {
        let mut store = BackingStore::new(4);
        assert_eq!(
            store.read(4),
            Err(CacheError::AddressOutOfRange { addr: 4, size: 4 })
        );
        assert!(store.write(-2, 1).is_err());
        assert_eq!(store.peek(-1), None);
        assert_eq!(store.writes(), 0);
    }
}
