//! Spaceship routing as a beam-search domain.
//!
//! The ship starts at the origin with zero velocity; each tick it adjusts
//! each velocity component by at most one, then drifts. One search turn
//! commits one target visit, so a run over `n` targets takes exactly `n`
//! turns. Expansion prefers table-backed short moves (up to
//! [`MAX_TICKS`](crate::moves::MAX_TICKS) ticks) and falls back to a greedy
//! steered flight when no short move reaches any remaining target.
//!
//! Costs pack three concerns into one `i64`: the tick count of the new hop in
//! the high half, the parent's low half carried over as a running tiebreak,
//! and the bounding-box extent of the still-unvisited targets as a spread
//! penalty. Fingerprints XOR a per-target Zobrist key over the remaining set
//! with the packed position index and velocity.

use std::collections::{BTreeSet, HashMap};

use beamline_core::{
    BeamConfig, Candidate, Cost, EngineError, Hash, SearchState, Selector,
};
use rand::Rng;

use crate::input::Problem;
use crate::moves::{MoveTable, MAX_TICKS};
use crate::physics::fly;

const TICK_SHIFT: i64 = 1 << 32;

/// Immutable per-instance data: target coordinates, their indices, and the
/// Zobrist keys used to fingerprint remaining-target sets.
pub struct SpaceshipProblem {
    idx_to_target: Vec<(i64, i64)>,
    target_idx: HashMap<(i64, i64), u32>,
    zobrist: Vec<u64>,
    has_origin: bool,
}

impl SpaceshipProblem {
    /// Index `0` is reserved for the origin; targets take `1..=n` in input
    /// order.
    pub fn new(problem: &Problem, rng: &mut impl Rng) -> Self {
        let mut idx_to_target = vec![(0, 0)];
        let mut target_idx = HashMap::new();
        target_idx.insert((0, 0), 0u32);
        let mut zobrist = vec![0u64];
        for &point in &problem.targets {
            target_idx.insert(point, idx_to_target.len() as u32);
            idx_to_target.push(point);
            zobrist.push(rng.gen());
        }
        Self {
            idx_to_target,
            target_idx,
            zobrist,
            has_origin: problem.has_origin,
        }
    }

    /// Number of targets to visit (the origin excluded).
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.idx_to_target.len() - 1
    }

    #[must_use]
    pub fn has_origin(&self) -> bool {
        self.has_origin
    }

    /// Coordinates of the target at `idx` (`0` is the origin).
    #[must_use]
    pub fn target(&self, idx: u32) -> (i64, i64) {
        self.idx_to_target[idx as usize]
    }

    #[must_use]
    pub fn index_of(&self, point: (i64, i64)) -> Option<u32> {
        self.target_idx.get(&point).copied()
    }

    /// Engine sizing for this instance: one turn per target, tour and dedup
    /// capacities scaled from the beam width.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfig`] when the instance has no targets or the
    /// width is degenerate.
    pub fn search_config(&self, beam_width: usize) -> Result<BeamConfig, EngineError> {
        BeamConfig::new(
            self.target_count(),
            beam_width,
            30 * beam_width,
            (32 * 30 * beam_width) as u32,
        )
    }

    fn fingerprint(
        &self,
        pos_idx: u32,
        vel: (i64, i64),
        remaining: &BTreeSet<u32>,
        skip: Option<u32>,
    ) -> Hash {
        let mut acc = u64::from(pos_idx) << 32;
        for &idx in remaining {
            if Some(idx) == skip {
                continue;
            }
            acc ^= self.zobrist[idx as usize];
        }
        let packed = vel.0.wrapping_shl(32).wrapping_add(vel.1) as u64;
        acc ^ packed
    }
}

/// One committed hop: which target was visited and the total velocity change
/// accumulated while flying there. Position is index-addressed so the record
/// stays small and exactly reversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub from: u32,
    pub to: u32,
    pub dvx: i32,
    pub dvy: i32,
}

/// The single live search state the engine drives along the frontier tree.
pub struct SpaceshipState<'a> {
    problem: &'a SpaceshipProblem,
    moves: &'a MoveTable,
    remaining: BTreeSet<u32>,
    pos_idx: u32,
    pos: (i64, i64),
    vel: (i64, i64),
}

impl<'a> SpaceshipState<'a> {
    #[must_use]
    pub fn new(problem: &'a SpaceshipProblem, moves: &'a MoveTable) -> Self {
        Self {
            problem,
            moves,
            remaining: (1..=problem.target_count() as u32).collect(),
            pos_idx: 0,
            pos: (0, 0),
            vel: (0, 0),
        }
    }

    #[must_use]
    pub fn position(&self) -> (i64, i64) {
        self.pos
    }

    #[must_use]
    pub fn velocity(&self) -> (i64, i64) {
        self.vel
    }

    #[must_use]
    pub fn remaining(&self) -> &BTreeSet<u32> {
        &self.remaining
    }

    /// Bounding-box extent of the remaining targets with `skip` excluded;
    /// zero when `skip` is the last one. Penalizes leaving the unvisited set
    /// spread out.
    fn extent_without(&self, skip: u32) -> i64 {
        let mut min_x = i64::MAX;
        let mut max_x = i64::MIN;
        let mut min_y = i64::MAX;
        let mut max_y = i64::MIN;
        let mut seen = false;
        for &idx in &self.remaining {
            if idx == skip {
                continue;
            }
            let (x, y) = self.problem.target(idx);
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
            seen = true;
        }
        if seen {
            (max_x - min_x) + (max_y - min_y)
        } else {
            0
        }
    }

    fn child_cost(parent_cost: Cost, ticks: i64, extent: i64) -> Cost {
        parent_cost % TICK_SHIFT + ticks * TICK_SHIFT + extent
    }
}

impl SearchState for SpaceshipState<'_> {
    type Action = Hop;

    fn make_initial_node(&self) -> (Cost, Hash) {
        (
            0,
            self.problem
                .fingerprint(self.pos_idx, self.vel, &self.remaining, None),
        )
    }

    fn expand(
        &self,
        cost: Cost,
        _hash: Hash,
        parent: u32,
        selector: &mut Selector<Hop>,
    ) -> Result<(), EngineError> {
        // Short moves first, shortest tick counts first. Once some target is
        // reachable, keep scanning three more tick counts for alternatives,
        // then stop.
        let mut find_idx = MAX_TICKS;
        for i in 0..MAX_TICKS {
            let ticks = i + 1;
            let mut found = false;
            for &next in &self.remaining {
                let target = self.problem.target(next);
                let dif_x = target.0 - self.pos.0 - ticks as i64 * self.vel.0;
                let dif_y = target.1 - self.pos.1 - ticks as i64 * self.vel.1;
                let xs = self.moves.reachable(ticks, dif_x);
                if xs.is_empty() {
                    continue;
                }
                let ys = self.moves.reachable(ticks, dif_y);
                if ys.is_empty() {
                    continue;
                }
                let extent = self.extent_without(next);
                let child_cost = Self::child_cost(cost, i as i64, extent);
                for mx in xs {
                    for my in ys {
                        let vel = (self.vel.0 + mx.final_vel, self.vel.1 + my.final_vel);
                        let hash =
                            self.problem
                                .fingerprint(next, vel, &self.remaining, Some(next));
                        selector.push(
                            Candidate {
                                action: Hop {
                                    from: self.pos_idx,
                                    to: next,
                                    dvx: mx.final_vel as i32,
                                    dvy: my.final_vel as i32,
                                },
                                cost: child_cost,
                                hash,
                                parent,
                            },
                            false,
                        )?;
                        found = true;
                    }
                }
            }
            if found {
                find_idx = find_idx.min(i);
            }
            if i == find_idx + 3 {
                return Ok(());
            }
        }
        if find_idx != MAX_TICKS {
            return Ok(());
        }

        // Nothing in short-move range: steer greedily to each target, keeping
        // only flights no longer than the best one seen so far.
        let mut min_ticks = i64::MAX;
        for &next in &self.remaining {
            let target = self.problem.target(next);
            let rel = (target.0 - self.pos.0, target.1 - self.pos.1);
            let Some((ticks, end_vel)) = fly(rel, self.vel, min_ticks) else {
                continue;
            };
            min_ticks = ticks;
            let extent = self.extent_without(next);
            let hash = self
                .problem
                .fingerprint(next, end_vel, &self.remaining, Some(next));
            selector.push(
                Candidate {
                    action: Hop {
                        from: self.pos_idx,
                        to: next,
                        dvx: (end_vel.0 - self.vel.0) as i32,
                        dvy: (end_vel.1 - self.vel.1) as i32,
                    },
                    cost: Self::child_cost(cost, ticks, extent),
                    hash,
                    parent,
                },
                false,
            )?;
        }
        Ok(())
    }

    fn move_forward(&mut self, action: Hop) {
        self.pos_idx = action.to;
        self.pos = self.problem.target(action.to);
        self.vel.0 += i64::from(action.dvx);
        self.vel.1 += i64::from(action.dvy);
        self.remaining.remove(&action.to);
    }

    fn move_backward(&mut self, action: Hop) {
        self.remaining.insert(action.to);
        self.pos_idx = action.from;
        self.pos = self.problem.target(action.from);
        self.vel.0 -= i64::from(action.dvx);
        self.vel.1 -= i64::from(action.dvy);
    }
}
