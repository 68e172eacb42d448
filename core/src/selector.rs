//! Bounded, deduplicating candidate admission for one turn.
//!
//! The selector keeps at most `beam_width` live candidates, merging
//! candidates with equal fingerprints (lower cost wins) and evicting the
//! current worst candidate once the beam is full. Two phases:
//!
//! - **filling** — fewer than `beam_width` distinct candidates seen; costs
//!   tracked in a scratch array and scanned linearly;
//! - **full** — a [`SegTree`] over `(cost, slot)` acts as an erasable
//!   priority structure whose global aggregate is the current worst slot.
//!
//! The tree is built lazily at the moment the beam first fills, from the
//! scratch costs; pre-capacity the linear policy is cheaper.

use crate::config::BeamConfig;
use crate::error::EngineError;
use crate::hash_map::{OpenHashMap, Probe};
use crate::segtree::{Monoid, SegTree};
use crate::{Cost, Hash};

/// One proposed transition: ephemeral, produced during expansion, consumed
/// when the tree is updated for the next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<A> {
    /// Opaque transition record; the engine only passes it back to the state.
    pub action: A,
    /// Cost after taking `action`; lower is better.
    pub cost: Cost,
    /// Fingerprint of the resulting state.
    pub hash: Hash,
    /// Leaf index of the node this candidate extends.
    pub parent: u32,
}

/// A beam slot's cost, tagged with its slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostSlot {
    pub cost: Cost,
    pub index: u32,
}

/// "Pick the worst": maximum cost, ties toward the larger slot index.
/// The global aggregate is the eviction target once the beam is full.
pub enum WorstCost {}

impl Monoid for WorstCost {
    type S = CostSlot;

    fn identity() -> CostSlot {
        CostSlot {
            cost: Cost::MIN,
            index: 0,
        }
    }

    fn combine(a: &CostSlot, b: &CostSlot) -> CostSlot {
        if (a.cost, a.index) >= (b.cost, b.index) {
            *a
        } else {
            *b
        }
    }
}

/// Counters accumulated across a run; folded into
/// [`crate::SearchStats`] by the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectorCounters {
    /// Total candidates offered via `push`, finished ones included.
    pub pushed: u64,
    /// Candidates that matched an existing slot's fingerprint.
    pub merged: u64,
    /// Candidates rejected by cost, against the beam's worst or against the
    /// slot they collided with.
    pub pruned: u64,
    /// Worst-slot evictions after the beam filled.
    pub evicted: u64,
}

/// The bounded, deduplicated beam for a single turn.
pub struct Selector<A> {
    beam_width: usize,
    candidates: Vec<Candidate<A>>,
    hash_to_index: OpenHashMap<u32>,
    costs: Vec<CostSlot>,
    /// `Some` once the beam has filled; its presence is the phase switch.
    worst: Option<SegTree<WorstCost>>,
    finished: Vec<Candidate<A>>,
    counters: SelectorCounters,
}

impl<A: Copy> Selector<A> {
    /// Allocate backing storage once from the configuration.
    #[must_use]
    pub fn new(config: &BeamConfig) -> Self {
        let beam_width = config.beam_width;
        #[allow(clippy::cast_possible_truncation)]
        let costs = (0..beam_width)
            .map(|i| CostSlot {
                cost: 0,
                index: i as u32,
            })
            .collect();
        Self {
            beam_width,
            candidates: Vec::with_capacity(beam_width),
            hash_to_index: OpenHashMap::new(config.hash_map_capacity),
            costs,
            worst: None,
            finished: Vec::new(),
            counters: SelectorCounters::default(),
        }
    }

    /// Offer a candidate to the beam.
    ///
    /// `finished` marks a candidate whose transition reaches a goal state:
    /// it is appended to a side list unconditionally, bypassing cost pruning
    /// (turn-minimizing problems admit a goal at any cost).
    ///
    /// Non-finished candidates go through cost cut, fingerprint dedup
    /// (lower cost kept), and worst-slot eviction as described in the module
    /// docs. Equal fingerprints are assumed to mean equal states; a true
    /// 64-bit collision silently merges two distinct states, which is the
    /// documented risk of fingerprint dedup and is not corrected here.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::HashTableFull`] if the dedup table's probe
    /// sequence wraps; the run cannot continue with a saturated table.
    pub fn push(&mut self, candidate: Candidate<A>, finished: bool) -> Result<(), EngineError> {
        self.counters.pushed += 1;
        if finished {
            self.finished.push(candidate);
            return Ok(());
        }
        let cost = candidate.cost;
        if let Some(worst) = &self.worst {
            if cost >= worst.all_prod().cost {
                // Cannot beat the worst kept candidate.
                self.counters.pruned += 1;
                return Ok(());
            }
        }
        let probe = self.hash_to_index.get_index(candidate.hash)?;
        if let Probe::Occupied(slot) = probe {
            let j = self.hash_to_index.get(slot) as usize;
            // The table entry may be stale: its slot can have been evicted
            // and rewritten with a different fingerprint since the key was
            // recorded. Only a live match counts as a duplicate.
            if self.candidates[j].hash == candidate.hash {
                self.counters.merged += 1;
                if cost < self.slot_cost(j) {
                    self.candidates[j] = candidate;
                    self.set_slot_cost(j, cost);
                } else {
                    self.counters.pruned += 1;
                }
                return Ok(());
            }
        }
        let slot = probe.slot();
        if let Some(worst) = self.worst.as_mut() {
            // Full: overwrite the current worst slot.
            let j = worst.all_prod().index;
            self.hash_to_index.set(slot, candidate.hash, j);
            self.candidates[j as usize] = candidate;
            worst.set(j as usize, CostSlot { cost, index: j });
            self.counters.evicted += 1;
        } else {
            #[allow(clippy::cast_possible_truncation)]
            let j = self.candidates.len() as u32;
            self.hash_to_index.set(slot, candidate.hash, j);
            self.costs[j as usize].cost = cost;
            self.candidates.push(candidate);
            if self.candidates.len() == self.beam_width {
                // The beam just filled: switch from linear scans to the tree.
                self.worst = Some(SegTree::from_vec(self.costs.clone()));
            }
        }
        Ok(())
    }

    /// The current live candidate set.
    #[must_use]
    pub fn select(&self) -> &[Candidate<A>] {
        &self.candidates
    }

    /// Whether any goal-reaching candidate was pushed this turn.
    #[must_use]
    pub fn have_finished(&self) -> bool {
        !self.finished.is_empty()
    }

    /// Goal-reaching candidates in insertion order. When several goals are
    /// found in the same turn, callers take the first — an arbitrary but
    /// deterministic tie-break that must be preserved for reproducibility.
    #[must_use]
    pub fn finished_candidates(&self) -> &[Candidate<A>] {
        &self.finished
    }

    /// The minimum-cost live candidate.
    ///
    /// # Panics
    ///
    /// Panics if no candidate has been pushed this turn; the driver checks
    /// for an empty beam before calling this.
    #[must_use]
    pub fn best_candidate(&self) -> &Candidate<A> {
        assert!(!self.candidates.is_empty(), "no live candidates");
        let mut best = 0;
        for i in 1..self.candidates.len() {
            if self.slot_cost(i) < self.slot_cost(best) {
                best = i;
            }
        }
        &self.candidates[best]
    }

    /// Reset for the next turn, reusing backing storage. Cumulative counters
    /// are retained.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.finished.clear();
        self.hash_to_index.clear();
        self.worst = None;
    }

    /// Cumulative admission counters.
    #[must_use]
    pub fn counters(&self) -> SelectorCounters {
        self.counters
    }

    fn slot_cost(&self, j: usize) -> Cost {
        match &self.worst {
            Some(worst) => worst.get(j).cost,
            None => self.costs[j].cost,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn set_slot_cost(&mut self, j: usize, cost: Cost) {
        match self.worst.as_mut() {
            Some(worst) => worst.set(
                j,
                CostSlot {
                    cost,
                    index: j as u32,
                },
            ),
            None => self.costs[j].cost = cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::cast_possible_truncation)]
    fn config(beam_width: usize) -> BeamConfig {
        BeamConfig::new(10, beam_width, 100, (beam_width * 16) as u32).unwrap()
    }

    fn cand(cost: Cost, hash: Hash) -> Candidate<u8> {
        Candidate {
            action: 0,
            cost,
            hash,
            parent: 0,
        }
    }

    #[test]
    fn width_bound_holds_under_pressure() {
        // Strictly improving costs with distinct hashes: every push after
        // the fill evicts and takes a fresh dedup slot, so stay under the
        // table's capacity (4 * 16 bumped odd = 65).
        let mut selector = Selector::new(&config(4));
        for i in 0..60u64 {
            #[allow(clippy::cast_possible_wrap)]
            selector
                .push(cand(100 - i as Cost, i.wrapping_mul(0x9e37_79b9_7f4a_7c15)), false)
                .unwrap();
            assert!(selector.select().len() <= 4);
        }
        assert_eq!(selector.select().len(), 4);
    }

    #[test]
    fn equal_hash_keeps_lower_cost() {
        let mut selector = Selector::new(&config(8));
        selector.push(cand(10, 555), false).unwrap();
        selector.push(cand(7, 555), false).unwrap();
        selector.push(cand(9, 555), false).unwrap();
        let live = selector.select();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].cost, 7);
    }

    #[test]
    fn full_beam_evicts_current_worst() {
        let mut selector = Selector::new(&config(2));
        selector.push(cand(10, 1), false).unwrap();
        selector.push(cand(20, 2), false).unwrap();
        // Beats the worst (20): evicts it.
        selector.push(cand(15, 3), false).unwrap();
        let costs: Vec<Cost> = selector.select().iter().map(|c| c.cost).collect();
        assert!(costs.contains(&10) && costs.contains(&15));
        // Cannot beat the worst (15): dropped.
        selector.push(cand(30, 4), false).unwrap();
        let costs: Vec<Cost> = selector.select().iter().map(|c| c.cost).collect();
        assert!(costs.contains(&10) && costs.contains(&15));
    }

    #[test]
    fn finished_bypasses_pruning_and_preserves_order() {
        let mut selector = Selector::new(&config(1));
        selector.push(cand(1, 10), false).unwrap();
        // Worse than everything live, but finished is exempt from the cut.
        selector.push(cand(1_000_000, 11), true).unwrap();
        selector.push(cand(5, 12), true).unwrap();
        assert!(selector.have_finished());
        let finished = selector.finished_candidates();
        assert_eq!(finished.len(), 2);
        assert_eq!(finished[0].cost, 1_000_000, "first pushed wins");
    }

    #[test]
    fn dedup_keeps_per_hash_minimum_while_filling() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(11);
        // 30 distinct hashes against width 64: the beam never fills, so
        // every repeat goes through the merge path rather than eviction.
        let mut selector = Selector::new(&config(64));
        let mut reference: Vec<(Hash, Cost)> = Vec::new();
        for _ in 0..300 {
            let hash: Hash = rng.gen_range(0..30);
            let cost: Cost = rng.gen_range(0..10_000);
            selector.push(cand(cost, hash), false).unwrap();
            match reference.iter_mut().find(|(h, _)| *h == hash) {
                Some(entry) => entry.1 = entry.1.min(cost),
                None => reference.push((hash, cost)),
            }
        }
        assert_eq!(selector.select().len(), reference.len());
        for c in selector.select() {
            let (_, min_cost) = reference.iter().find(|(h, _)| *h == c.hash).unwrap();
            assert_eq!(c.cost, *min_cost);
        }
    }

    #[test]
    fn best_candidate_matches_linear_scan_in_both_phases() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(13);
        for width in [3usize, 8, 16] {
            // Oversized dedup table: admissions here are about cost order,
            // not table pressure.
            let roomy = BeamConfig::new(10, width, 100, 2053).unwrap();
            let mut selector = Selector::new(&roomy);
            for _ in 0..200 {
                let hash: Hash = rng.gen();
                let cost: Cost = rng.gen_range(0..10_000);
                selector.push(cand(cost, hash), false).unwrap();
                let best = selector.best_candidate().cost;
                let live_min = selector.select().iter().map(|c| c.cost).min().unwrap();
                assert_eq!(best, live_min);
            }
        }
    }

    #[test]
    fn clear_reuses_storage_for_next_turn() {
        let mut selector = Selector::new(&config(2));
        selector.push(cand(1, 1), false).unwrap();
        selector.push(cand(2, 2), false).unwrap();
        selector.clear();
        assert!(selector.select().is_empty());
        assert!(!selector.have_finished());
        selector.push(cand(3, 1), false).unwrap();
        assert_eq!(selector.select().len(), 1);
    }
}
