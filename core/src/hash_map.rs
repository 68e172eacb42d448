//! Fixed-capacity open-addressing map with linear probing.
//!
//! No hash function is applied internally: keys go straight through
//! `key mod capacity`. This is a deliberate precondition on the caller —
//! the engine feeds this table the state fingerprints produced by
//! [`crate::SearchState::expand`], which must already be close to uniformly
//! distributed over the 64-bit key space (Zobrist-style incremental
//! fingerprints qualify). Adding a secondary hash here would change probe
//! behavior and invalidate the capacity-sizing guidance.
//!
//! Faster than a general-purpose map for this workload: the table is sized
//! once (well above the live key count, ≥16× recommended), cleared per turn,
//! and never grows.

use crate::error::EngineError;
use crate::Hash;

/// Result of probing for a key: the slot the key occupies, or the vacant
/// slot where it would be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Occupied(u32),
    Vacant(u32),
}

impl Probe {
    /// The probed slot, occupied or not.
    #[must_use]
    pub fn slot(self) -> u32 {
        match self {
            Self::Occupied(slot) | Self::Vacant(slot) => slot,
        }
    }
}

/// Open-addressing table mapping pre-mixed 64-bit keys to small values.
#[derive(Debug, Clone)]
pub struct OpenHashMap<V> {
    capacity: u32,
    valid: Vec<bool>,
    data: Vec<(Hash, V)>,
}

impl<V: Copy + Default> OpenHashMap<V> {
    /// Allocate a table. Even capacities are bumped to the next odd number
    /// so that `key mod capacity` does not discard the low bit.
    #[must_use]
    pub fn new(capacity: u32) -> Self {
        let capacity = if capacity % 2 == 0 {
            capacity + 1
        } else {
            capacity
        };
        Self {
            capacity,
            valid: vec![false; capacity as usize],
            data: vec![(0, V::default()); capacity as usize],
        }
    }

    /// Effective (odd) capacity.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Probe for `key`, linearly scanning occupied slots from
    /// `key mod capacity` until the key or an empty slot is found.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::HashTableFull`] if the probe sequence wraps the
    /// whole table without finding either — the table was sized too small
    /// for the keys pushed into it.
    pub fn get_index(&self, key: Hash) -> Result<Probe, EngineError> {
        #[allow(clippy::cast_possible_truncation)]
        let mut i = (key % u64::from(self.capacity)) as u32;
        for _ in 0..self.capacity {
            if !self.valid[i as usize] {
                return Ok(Probe::Vacant(i));
            }
            if self.data[i as usize].0 == key {
                return Ok(Probe::Occupied(i));
            }
            i += 1;
            if i == self.capacity {
                i = 0;
            }
        }
        Err(EngineError::HashTableFull {
            capacity: self.capacity,
        })
    }

    /// Write `(key, value)` into `slot` unconditionally, marking it occupied.
    pub fn set(&mut self, slot: u32, key: Hash, value: V) {
        self.valid[slot as usize] = true;
        self.data[slot as usize] = (key, value);
    }

    /// Read the value stored in an occupied `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not occupied.
    #[must_use]
    pub fn get(&self, slot: u32) -> V {
        assert!(self.valid[slot as usize], "read of vacant slot {slot}");
        self.data[slot as usize].1
    }

    /// Reset occupancy in O(capacity). Backing storage is retained.
    pub fn clear(&mut self) {
        self.valid.fill(false);
    }
}
