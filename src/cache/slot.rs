//! Slot Table Module
//!
//! Fixed-capacity parallel arrays of keys, values and per-slot metadata.
//! Every lookup is a linear scan; there is no hash index.

use serde::Serialize;

use crate::cache::EMPTY_KEY;

// == Slot View ==
/// Read-only view of one occupied slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    /// Position in the table
    pub index: usize,
    /// Stored key (never `EMPTY_KEY`)
    pub key: i64,
    /// Stored value
    pub value: i64,
    /// Policy metadata: timestamp, frequency or expiry
    pub meta: u64,
}

// == Eviction ==
/// Entry removed from a slot to make room for another key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Eviction {
    /// Slot the entry occupied (reused by the incoming key)
    pub slot: usize,
    pub key: i64,
    pub value: i64,
}

// == Slot Table ==
/// Parallel-array storage shared by the slot-based cache variants.
///
/// Invariant: `keys[i] == EMPTY_KEY` iff slot `i` is unoccupied.
#[derive(Debug, Clone)]
pub struct SlotTable {
    keys: Vec<i64>,
    vals: Vec<i64>,
    meta: Vec<u64>,
    occupied: usize,
}

impl SlotTable {
    // == Constructor ==
    /// Creates a table with `capacity` empty slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            keys: vec![EMPTY_KEY; capacity],
            vals: vec![0; capacity],
            meta: vec![0; capacity],
            occupied: 0,
        }
    }

    // == Find ==
    /// Returns the slot index holding `key`.
    pub fn find(&self, key: i64) -> Option<usize> {
        if key == EMPTY_KEY {
            return None;
        }
        self.keys.iter().position(|&k| k == key)
    }

    // == Free Slot ==
    /// Returns the first unoccupied slot.
    pub fn free_slot(&self) -> Option<usize> {
        self.keys.iter().position(|&k| k == EMPTY_KEY)
    }

    // == Occupy ==
    /// Writes an entry into slot `index`, replacing whatever was there.
    pub fn occupy(&mut self, index: usize, key: i64, value: i64, meta: u64) {
        debug_assert_ne!(key, EMPTY_KEY);
        if self.keys[index] == EMPTY_KEY {
            self.occupied += 1;
        }
        self.keys[index] = key;
        self.vals[index] = value;
        self.meta[index] = meta;
    }

    // == Clear ==
    /// Resets slot `index` to empty and returns the entry it held.
    pub fn clear(&mut self, index: usize) -> Option<(i64, i64)> {
        let key = self.keys[index];
        if key == EMPTY_KEY {
            return None;
        }
        let value = self.vals[index];
        self.keys[index] = EMPTY_KEY;
        self.vals[index] = 0;
        self.meta[index] = 0;
        self.occupied -= 1;
        Some((key, value))
    }

    // == Clear All ==
    pub fn clear_all(&mut self) {
        self.keys.fill(EMPTY_KEY);
        self.vals.fill(0);
        self.meta.fill(0);
        self.occupied = 0;
    }

    // == Victim ==
    /// Picks the occupied, eligible slot whose metadata ranks first.
    ///
    /// Ties go to the lowest index (first found).
    pub fn victim<R, E>(&self, ranks_before: R, eligible: E) -> Option<usize>
    where
        R: Fn(u64, u64) -> bool,
        E: Fn(usize) -> bool,
    {
        let mut best: Option<usize> = None;
        for i in 0..self.keys.len() {
            if self.keys[i] == EMPTY_KEY || !eligible(i) {
                continue;
            }
            match best {
                Some(b) if !ranks_before(self.meta[i], self.meta[b]) => {}
                _ => best = Some(i),
            }
        }
        best
    }

    // == Accessors ==
    pub fn key(&self, index: usize) -> i64 {
        self.keys[index]
    }

    pub fn value(&self, index: usize) -> i64 {
        self.vals[index]
    }

    pub fn set_value(&mut self, index: usize, value: i64) {
        self.vals[index] = value;
    }

    pub fn meta(&self, index: usize) -> u64 {
        self.meta[index]
    }

    pub fn set_meta(&mut self, index: usize, meta: u64) {
        self.meta[index] = meta;
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.keys[index] != EMPTY_KEY
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    pub fn capacity(&self) -> usize {
        self.keys.len()
    }

    // == Slots ==
    /// Iterates the occupied slots in index order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.keys
            .iter()
            .enumerate()
            .filter(|&(_, &k)| k != EMPTY_KEY)
            .map(move |(i, &k)| Slot {
                index: i,
                key: k,
                value: self.vals[i],
                meta: self.meta[i],
            })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new_is_empty() {
        let table = SlotTable::new(4);
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert_eq!(table.free_slot(), Some(0));
        assert_eq!(table.find(EMPTY_KEY), None);
    }

    #[test]
    fn test_occupy_and_find() {
        let mut table = SlotTable::new(3);
        table.occupy(0, 10, 100, 1);
        table.occupy(1, 20, 200, 2);

        assert_eq!(table.find(20), Some(1));
        assert_eq!(table.find(30), None);
        assert_eq!(table.free_slot(), Some(2));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_occupy_in_place_keeps_count() {
        let mut table = SlotTable::new(2);
        table.occupy(0, 10, 100, 1);
        table.occupy(0, 10, 111, 5);

        assert_eq!(table.len(), 1);
        assert_eq!(table.value(0), 111);
        assert_eq!(table.meta(0), 5);
    }

    #[test]
    fn test_clear_returns_key() {
        let mut table = SlotTable::new(2);
        table.occupy(1, 7, 70, 0);

        assert_eq!(table.clear(1), Some((7, 70)));
        assert!(!table.is_occupied(1));
        assert_eq!(table.len(), 0);
        assert_eq!(table.clear(1), None);
    }

    #[test]
    fn test_victim_minimum_first_found() {
        let mut table = SlotTable::new(4);
        table.occupy(0, 1, 0, 5);
        table.occupy(1, 2, 0, 2);
        table.occupy(2, 3, 0, 2);
        table.occupy(3, 4, 0, 9);

        assert_eq!(table.victim(|a, b| a < b, |_| true), Some(1));
    }

    #[test]
    fn test_victim_respects_eligibility() {
        let mut table = SlotTable::new(3);
        table.occupy(0, 1, 0, 1);
        table.occupy(1, 2, 0, 2);
        table.occupy(2, 3, 0, 3);

        assert_eq!(table.victim(|a, b| a < b, |i| i != 0), Some(1));
        assert_eq!(table.victim(|a, b| a < b, |_| false), None);
    }

    #[test]
    fn test_slots_iterates_occupied() {
        let mut table = SlotTable::new(3);
        table.occupy(2, 30, 300, 3);
        table.occupy(0, 10, 100, 1);

        let keys: Vec<i64> = table.slots().map(|s| s.key).collect();
        assert_eq!(keys, vec![10, 30]);
    }
}
