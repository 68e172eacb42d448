//! Euler-tour representation of the live frontier.
//!
//! The frontier tree is stored as a pre-order walk: a balanced sequence of
//! Forward/Backward bracket pairs with Leaf markers nested inside. Walking
//! the tour while applying and reversing actions on a single shared state
//! object reaches every leaf without cloning state per node, so the memory
//! overhead is O(search depth) rather than O(beam width × state size).
//!
//! All rebuild passes are explicit iterative scans — tour length scales
//! with beam width × depth, so recursion is off the table.

use crate::config::BeamConfig;
use crate::contract::SearchState;
use crate::error::EngineError;
use crate::selector::{Candidate, Selector};
use crate::{Cost, Hash};

/// One entry of the tour. `Forward`/`Backward` are the matched enter/exit
/// brackets of an internal edge; `Leaf` carries the frontier slot reached by
/// its action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TourEntry<A> {
    Forward(A),
    Backward(A),
    Leaf(u32, A),
}

/// Cost and fingerprint of one live beam slot. Slot indices are recycled
/// turn to turn, not globally unique.
#[derive(Debug, Clone, Copy)]
struct LeafNode {
    cost: Cost,
    hash: Hash,
}

/// The frontier tree: one shared mutable state, the current tour, the
/// per-turn leaf table, per-parent candidate buckets, and the settled path
/// of actions already committed and removed from the tour.
///
/// All buffers are sized once from [`BeamConfig`] and reused across turns.
pub struct EulerTree<S: SearchState> {
    state: S,
    curr_tour: Vec<TourEntry<S::Action>>,
    next_tour: Vec<TourEntry<S::Action>>,
    leaves: Vec<LeafNode>,
    buckets: Vec<Vec<(S::Action, Cost, Hash)>>,
    settled: Vec<S::Action>,
}

impl<S: SearchState> EulerTree<S> {
    /// Take ownership of the run's state and allocate the tour buffers.
    pub fn new(state: S, config: &BeamConfig) -> Self {
        let mut buckets = Vec::new();
        buckets.resize_with(config.beam_width, Vec::new);
        Self {
            state,
            curr_tour: Vec::with_capacity(config.tour_capacity),
            next_tour: Vec::with_capacity(config.tour_capacity),
            leaves: Vec::with_capacity(config.beam_width),
            buckets,
            settled: Vec::new(),
        }
    }

    /// Walk the tour in order, driving the shared state, and expand every
    /// leaf into `selector`. On the first turn (empty tour) the initial node
    /// is expanded once with parent id 0.
    ///
    /// # Errors
    ///
    /// Propagates admission failures from [`SearchState::expand`].
    pub fn dfs(&mut self, selector: &mut Selector<S::Action>) -> Result<(), EngineError> {
        if self.curr_tour.is_empty() {
            let (cost, hash) = self.state.make_initial_node();
            return self.state.expand(cost, hash, 0, selector);
        }
        let Self {
            state,
            curr_tour,
            leaves,
            ..
        } = self;
        for entry in curr_tour.iter() {
            match *entry {
                TourEntry::Forward(action) => state.move_forward(action),
                TourEntry::Backward(action) => state.move_backward(action),
                TourEntry::Leaf(leaf, action) => {
                    state.move_forward(action);
                    let node = leaves[leaf as usize];
                    state.expand(node.cost, node.hash, leaf, selector)?;
                    state.move_backward(action);
                }
            }
        }
        Ok(())
    }

    /// Rebuild the tour for the next turn from the surviving candidates.
    ///
    /// Dead branches (leaves whose bucket is empty) are dropped along with
    /// their bracketing pair, and any Forward/Backward pair left empty by
    /// the drop is collapsed so vestigial brackets never accumulate. While
    /// the tour's root remains a single unbranched path shared by every
    /// survivor, that prefix is moved onto the settled path (and applied to
    /// the live state once, permanently), bounding tour growth when the
    /// search stays effectively linear.
    ///
    /// Surviving candidates become the new leaf table in first-seen order
    /// of their parents, then insertion order within a parent.
    pub fn update(&mut self, candidates: &[Candidate<S::Action>]) {
        self.leaves.clear();

        if self.curr_tour.is_empty() {
            // First turn: every candidate hangs off the root.
            #[allow(clippy::cast_possible_truncation)]
            for candidate in candidates {
                self.curr_tour.push(TourEntry::Leaf(
                    self.leaves.len() as u32,
                    candidate.action,
                ));
                self.leaves.push(LeafNode {
                    cost: candidate.cost,
                    hash: candidate.hash,
                });
            }
            return;
        }

        for candidate in candidates {
            self.buckets[candidate.parent as usize].push((
                candidate.action,
                candidate.cost,
                candidate.hash,
            ));
        }

        // Settle the common prefix: while the front entry is the Forward of
        // the tour's outermost bracket, the whole frontier still descends
        // from that one edge, so commit it and drop the pair.
        let mut head = 0;
        loop {
            let Some(TourEntry::Forward(action)) = self.curr_tour.get(head).copied() else {
                break;
            };
            let matched = matches!(
                self.curr_tour.last(),
                Some(TourEntry::Backward(back)) if *back == action
            );
            if !matched {
                break;
            }
            self.state.move_forward(action);
            self.settled.push(action);
            self.curr_tour.pop();
            head += 1;
        }

        // Re-emit the remainder, grafting surviving children under their
        // parent leaves and dropping branches nothing survived from.
        for idx in head..self.curr_tour.len() {
            let entry = self.curr_tour[idx];
            match entry {
                TourEntry::Leaf(leaf, action) => {
                    let bucket = &mut self.buckets[leaf as usize];
                    if bucket.is_empty() {
                        continue;
                    }
                    self.next_tour.push(TourEntry::Forward(action));
                    #[allow(clippy::cast_possible_truncation)]
                    for &(child_action, cost, hash) in bucket.iter() {
                        self.next_tour
                            .push(TourEntry::Leaf(self.leaves.len() as u32, child_action));
                        self.leaves.push(LeafNode { cost, hash });
                    }
                    bucket.clear();
                    self.next_tour.push(TourEntry::Backward(action));
                }
                TourEntry::Forward(action) => {
                    self.next_tour.push(TourEntry::Forward(action));
                }
                TourEntry::Backward(action) => {
                    if matches!(self.next_tour.last(), Some(TourEntry::Forward(_))) {
                        // Everything under this edge died: collapse the pair.
                        self.next_tour.pop();
                    } else {
                        self.next_tour.push(TourEntry::Backward(action));
                    }
                }
            }
        }

        std::mem::swap(&mut self.curr_tour, &mut self.next_tour);
        self.next_tour.clear();
    }

    /// Root-to-leaf action sequence for `parent`: the settled path followed
    /// by a stack-based replay of the tour.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a live leaf; the driver only passes parents
    /// taken from this turn's candidates.
    #[must_use]
    pub fn calculate_path(&self, parent: u32, turn: usize) -> Vec<S::Action> {
        let mut path = Vec::with_capacity(self.settled.len() + turn);
        path.extend_from_slice(&self.settled);
        if self.curr_tour.is_empty() {
            // Turn 0: the candidate's own action is appended by the caller.
            return path;
        }
        for entry in &self.curr_tour {
            match *entry {
                TourEntry::Forward(action) => path.push(action),
                TourEntry::Backward(_) => {
                    path.pop();
                }
                TourEntry::Leaf(leaf, action) => {
                    if leaf == parent {
                        path.push(action);
                        return path;
                    }
                }
            }
        }
        unreachable!("leaf {parent} is not present in the tour")
    }

    /// The shared traversal state. Between turns it rests at the settled
    /// position (the node all surviving branches descend from).
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Number of actions already committed and removed from the tour.
    #[must_use]
    pub fn settled_len(&self) -> usize {
        self.settled.len()
    }

    /// Current tour length in entries.
    #[must_use]
    pub fn tour_len(&self) -> usize {
        self.curr_tour.len()
    }

    /// Number of live leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }
}
