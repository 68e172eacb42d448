//! The contract between the engine and domain-specific transition logic.

use crate::error::EngineError;
use crate::selector::Selector;
use crate::{Cost, Hash};

/// A problem's transition, cost, and fingerprint logic.
///
/// The engine owns exactly one instance for the whole run and drives it
/// along the frontier tree by applying and reversing actions in place —
/// implementations are never cloned per node, which is what keeps the
/// engine's memory O(search depth).
///
/// # Contract
///
/// - `move_forward` and `move_backward` are exact inverses; the engine
///   guarantees they are called in strictly nested pairs per traversal path,
///   never out of order and never unmatched.
/// - Fingerprints pushed from `expand` must be well mixed over the 64-bit
///   space (e.g. Zobrist-style), because the dedup table applies no hash of
///   its own; see [`crate::hash_map`].
/// - `expand` may push zero candidates only for a true dead end. A turn in
///   which *no* live leaf yields a candidate aborts the run
///   ([`EngineError::EmptyBeam`]).
pub trait SearchState {
    /// Fixed-size, reversible transition record. The engine never inspects
    /// it, only passes it back to `move_forward`/`move_backward`.
    type Action: Copy + PartialEq;

    /// Cost and fingerprint of the start configuration.
    fn make_initial_node(&self) -> (Cost, Hash);

    /// Enumerate every legal transition from the *currently live* state
    /// (the engine has already positioned it), pushing one [`Candidate`] per
    /// transition into `selector`. Goal-reaching transitions are pushed with
    /// `finished = true`.
    ///
    /// `cost` and `hash` are the live node's own cost and fingerprint;
    /// `parent` is its leaf index, to be recorded on each pushed candidate.
    ///
    /// # Errors
    ///
    /// Propagates selector admission failures
    /// ([`EngineError::HashTableFull`]).
    ///
    /// [`Candidate`]: crate::selector::Candidate
    fn expand(
        &self,
        cost: Cost,
        hash: Hash,
        parent: u32,
        selector: &mut Selector<Self::Action>,
    ) -> Result<(), EngineError>;

    /// Apply a transition's effect on the live state.
    fn move_forward(&mut self, action: Self::Action);

    /// Exactly invert [`SearchState::move_forward`] for the same action.
    fn move_backward(&mut self, action: Self::Action);
}
