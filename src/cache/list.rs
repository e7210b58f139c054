//! Fixed List Module
//!
//! Fixed-capacity ordered list backed by parallel key/value arrays.
//!
//! Entries are kept in arrival order:
//! - Index 0 = oldest (next to evict)
//! - Index `len - 1` = newest

use crate::cache::EMPTY_KEY;

// == Fixed List ==
#[derive(Debug, Clone)]
pub struct FixedList {
    keys: Vec<i64>,
    vals: Vec<i64>,
    len: usize,
}

impl FixedList {
    // == Constructor ==
    /// Creates an empty list holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            keys: vec![EMPTY_KEY; capacity],
            vals: vec![0; capacity],
            len: 0,
        }
    }

    // == Position ==
    /// Returns the index of `key`, scanning from the oldest entry.
    pub fn position(&self, key: i64) -> Option<usize> {
        self.keys[..self.len].iter().position(|&k| k == key)
    }

    pub fn value_at(&self, index: usize) -> i64 {
        self.vals[index]
    }

    pub fn set_value(&mut self, index: usize, value: i64) {
        self.vals[index] = value;
    }

    // == Push Back ==
    /// Appends an entry as the newest.
    ///
    /// If the list is full the entry at index 0 is evicted first and returned.
    /// A zero-capacity list hands the pushed entry straight back.
    pub fn push_back(&mut self, key: i64, value: i64) -> Option<(i64, i64)> {
        if self.keys.is_empty() {
            return Some((key, value));
        }
        let evicted = if self.is_full() {
            Some(self.remove_at(0))
        } else {
            None
        };
        self.keys[self.len] = key;
        self.vals[self.len] = value;
        self.len += 1;
        evicted
    }

    // == Remove At ==
    /// Removes the entry at `index`, shifting newer entries left.
    pub fn remove_at(&mut self, index: usize) -> (i64, i64) {
        let entry = (self.keys[index], self.vals[index]);
        for i in index..self.len - 1 {
            self.keys[i] = self.keys[i + 1];
            self.vals[i] = self.vals[i + 1];
        }
        self.len -= 1;
        self.keys[self.len] = EMPTY_KEY;
        self.vals[self.len] = 0;
        entry
    }

    // == Move To Back ==
    /// Makes the entry at `index` the newest.
    pub fn move_to_back(&mut self, index: usize) {
        let (key, value) = self.remove_at(index);
        self.keys[self.len] = key;
        self.vals[self.len] = value;
        self.len += 1;
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.keys.len()
    }

    pub fn capacity(&self) -> usize {
        self.keys.len()
    }

    // == Contains ==
    pub fn contains(&self, key: i64) -> bool {
        self.position(key).is_some()
    }

    /// Iterates `(key, value)` pairs from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.keys[..self.len]
            .iter()
            .copied()
            .zip(self.vals[..self.len].iter().copied())
    }
}
