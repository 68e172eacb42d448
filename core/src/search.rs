//! Search entry point and turn loop.

use crate::config::BeamConfig;
use crate::contract::SearchState;
use crate::error::EngineError;
use crate::selector::Selector;
use crate::tree::EulerTree;

/// Run totals, folded from the selector's admission counters and the
/// tree's final shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Turns executed, including the returning one.
    pub turns: usize,
    /// Total candidates offered to the selector.
    pub candidates_pushed: u64,
    /// Candidates that matched a kept fingerprint.
    pub duplicates_merged: u64,
    /// Candidates rejected by cost comparison.
    pub pruned_by_cost: u64,
    /// Worst-slot evictions after the beam filled.
    pub evictions: u64,
    /// Actions committed to the settled path.
    pub settled_len: usize,
    /// Tour length at return, in entries.
    pub tour_len: usize,
}

/// Result of a beam-search run: the action sequence from the initial state
/// to the terminal state, plus how the run ended.
#[derive(Debug, Clone)]
pub struct SearchOutcome<A> {
    /// Ordered actions from the initial state to the returned state.
    pub actions: Vec<A>,
    /// `true` if a finished (goal-reaching) candidate cut the run short;
    /// `false` if the fixed horizon elapsed and the best candidate was taken.
    pub reached_goal: bool,
    /// Run totals.
    pub stats: SearchStats,
}

/// Run the beam search to completion.
///
/// Each turn expands the whole frontier via [`EulerTree::dfs`], then either
/// returns (first finished candidate, or best candidate on the final turn)
/// or rebuilds the tour from the selected candidates and continues. The
/// computation is single-threaded, deterministic, and one-shot; the only
/// bound is `config.max_turn`.
///
/// # Errors
///
/// - [`EngineError::InvalidConfig`] — pre-flight sizing rejection.
/// - [`EngineError::EmptyBeam`] — a non-terminal turn produced no live
///   candidates anywhere in the beam (state contract violation).
/// - [`EngineError::HashTableFull`] — dedup table saturated.
pub fn beam_search<S: SearchState>(
    config: &BeamConfig,
    state: S,
) -> Result<SearchOutcome<S::Action>, EngineError> {
    config.validate()?;

    let mut tree = EulerTree::new(state, config);
    let mut selector = Selector::new(config);

    for turn in 0..config.max_turn {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("beam_turn", turn);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        tree.dfs(&mut selector)?;

        if selector.have_finished() {
            // Turn-minimizing variant: first finished candidate wins.
            let candidate = selector.finished_candidates()[0];
            let mut actions = tree.calculate_path(candidate.parent, turn + 1);
            actions.push(candidate.action);
            return Ok(outcome(actions, true, turn + 1, &selector, &tree));
        }

        if selector.select().is_empty() {
            return Err(EngineError::EmptyBeam { turn });
        }

        if turn + 1 == config.max_turn {
            // Fixed-horizon variant: all turns elapsed, take the best.
            let candidate = *selector.best_candidate();
            let mut actions = tree.calculate_path(candidate.parent, turn + 1);
            actions.push(candidate.action);
            return Ok(outcome(actions, false, turn + 1, &selector, &tree));
        }

        tree.update(selector.select());
        selector.clear();
    }

    unreachable!("max_turn is validated positive and the final turn returns")
}

fn outcome<S: SearchState>(
    actions: Vec<S::Action>,
    reached_goal: bool,
    turns: usize,
    selector: &Selector<S::Action>,
    tree: &EulerTree<S>,
) -> SearchOutcome<S::Action> {
    let counters = selector.counters();
    SearchOutcome {
        actions,
        reached_goal,
        stats: SearchStats {
            turns,
            candidates_pushed: counters.pushed,
            duplicates_merged: counters.merged,
            pruned_by_cost: counters.pruned,
            evictions: counters.evicted,
            settled_len: tree.settled_len(),
            tour_len: tree.tour_len(),
        },
    }
}
