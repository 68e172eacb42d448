//! Euler-tour tree behavior against a scripted state.
//!
//! The scripted state keys each node's children off the node fingerprint, so
//! a test can lay out an exact frontier tree and observe how `dfs`/`update`
//! walk, prune, and settle it.

use std::cell::RefCell;
use std::collections::HashMap;

use beamline_core::{
    beam_search, BeamConfig, Candidate, Cost, EngineError, EulerTree, Hash, SearchState, Selector,
};

type Action = u32;

/// Children of a node, keyed by the node's fingerprint.
type Script = HashMap<Hash, Vec<(Action, Cost, Hash, bool)>>;

struct ScriptedState {
    script: Script,
    /// Actions applied and not yet reversed; checks strict nesting.
    path: Vec<Action>,
    /// Every `expand` call observed: `(cost, hash, parent)`.
    expansions: RefCell<Vec<(Cost, Hash, u32)>>,
}

impl ScriptedState {
    fn new(script: Script) -> Self {
        Self {
            script,
            path: Vec::new(),
            expansions: RefCell::new(Vec::new()),
        }
    }
}

impl SearchState for ScriptedState {
    type Action = Action;

    fn make_initial_node(&self) -> (Cost, Hash) {
        (0, 0)
    }

    fn expand(
        &self,
        cost: Cost,
        hash: Hash,
        parent: u32,
        selector: &mut Selector<Action>,
    ) -> Result<(), EngineError> {
        self.expansions.borrow_mut().push((cost, hash, parent));
        if let Some(children) = self.script.get(&hash) {
            for &(action, child_cost, child_hash, finished) in children {
                selector.push(
                    Candidate {
                        action,
                        cost: child_cost,
                        hash: child_hash,
                        parent,
                    },
                    finished,
                )?;
            }
        }
        Ok(())
    }

    fn move_forward(&mut self, action: Action) {
        self.path.push(action);
    }

    fn move_backward(&mut self, action: Action) {
        let top = self.path.pop().expect("move_backward without move_forward");
        assert_eq!(top, action, "moves must be strictly nested");
    }
}

#[allow(clippy::cast_possible_truncation)]
fn config(beam_width: usize) -> BeamConfig {
    BeamConfig::new(16, beam_width, 256, (beam_width * 16 + 1) as u32).unwrap()
}

fn run_turn(
    tree: &mut EulerTree<ScriptedState>,
    selector: &mut Selector<Action>,
) -> Vec<Candidate<Action>> {
    tree.dfs(selector).unwrap();
    let selected = selector.select().to_vec();
    tree.update(&selected);
    selector.clear();
    selected
}

/// Root 0 has children 1 and 2; only node 2 has grandchildren. After the
/// second update, branch 1 must vanish without leaving an empty bracket
/// pair: the rebuilt tour is exactly the surviving subtree.
#[test]
fn dead_branch_is_dropped_without_vestigial_brackets() {
    let mut script = Script::new();
    script.insert(0, vec![(10, 1, 100, false), (20, 2, 200, false)]);
    script.insert(200, vec![(21, 3, 210, false), (22, 4, 220, false)]);
    // Node 100 has no children: its branch dies on turn 1.

    let cfg = config(8);
    let mut tree = EulerTree::new(ScriptedState::new(script), &cfg);
    let mut selector = Selector::new(&cfg);

    let turn0 = run_turn(&mut tree, &mut selector);
    assert_eq!(turn0.len(), 2);
    assert_eq!(tree.leaf_count(), 2);

    let turn1 = run_turn(&mut tree, &mut selector);
    assert_eq!(turn1.len(), 2, "only node 200's children survive");
    assert!(turn1.iter().all(|c| c.parent == 1), "both extend leaf 1");

    // Forward(20), Leaf, Leaf, Backward(20) — nothing from the dead branch.
    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.tour_len(), 4);
    assert_eq!(tree.settled_len(), 0);
}

/// A dfs after update must expand exactly the surviving candidates, as the
/// new leaf set, with fresh ids assigned in first-seen order.
#[test]
fn update_maps_survivors_to_fresh_leaves_in_order() {
    let mut script = Script::new();
    script.insert(0, vec![(10, 1, 100, false), (20, 2, 200, false)]);
    script.insert(100, vec![(11, 3, 110, false)]);
    script.insert(200, vec![(21, 4, 210, false)]);

    let cfg = config(8);
    let mut tree = EulerTree::new(ScriptedState::new(script), &cfg);
    let mut selector = Selector::new(&cfg);

    run_turn(&mut tree, &mut selector);
    let turn1 = run_turn(&mut tree, &mut selector);
    assert_eq!(turn1.len(), 2);

    // Third dfs: the new leaves are the turn-1 survivors, in order.
    tree.dfs(&mut selector).unwrap();
    let log = tree.state().expansions.borrow();
    let tail = &log[log.len() - 2..];
    assert_eq!(tail[0], (3, 110, 0));
    assert_eq!(tail[1], (4, 210, 1));
}

/// A long unbranched chain migrates from the tour to the settled path, and
/// the replayed path is still complete and correctly ordered.
#[test]
fn settled_prefix_keeps_full_path_reconstruction() {
    let mut script = Script::new();
    // 0 -> 100 -> 200 -> 300 -> goal, one child each.
    script.insert(0, vec![(1, 1, 100, false)]);
    script.insert(100, vec![(2, 2, 200, false)]);
    script.insert(200, vec![(3, 3, 300, false)]);
    script.insert(300, vec![(4, 4, 400, true)]);

    let cfg = config(4);
    let outcome = beam_search(&cfg, ScriptedState::new(script)).unwrap();
    assert!(outcome.reached_goal);
    assert_eq!(outcome.actions, vec![1, 2, 3, 4]);
    assert_eq!(outcome.stats.turns, 4);
    // The root edge settled as soon as the chain was two deep.
    assert_eq!(outcome.stats.settled_len, 1);
}

fn branching_script() -> Script {
    let mut script = Script::new();
    script.insert(0, vec![(10, 5, 100, false), (20, 1, 200, false)]);
    script.insert(100, vec![(11, 6, 110, false)]);
    script.insert(200, vec![(21, 2, 210, false), (22, 9, 220, false)]);
    script.insert(110, Vec::new());
    script.insert(210, vec![(31, 3, 310, true)]);
    script
}

/// Replaying the driver's action sequence through the script reproduces the
/// fingerprint recorded for the chosen leaf.
#[test]
fn path_replay_reproduces_leaf_fingerprint() {
    let cfg = config(4);
    let outcome = beam_search(&cfg, ScriptedState::new(branching_script())).unwrap();
    assert!(outcome.reached_goal);
    assert_eq!(outcome.actions, vec![20, 21, 31]);

    // Walk the script along the returned actions.
    let script = branching_script();
    let mut cost: Cost = 0;
    let mut hash: Hash = 0;
    for action in &outcome.actions {
        let child = script[&hash].iter().find(|c| c.0 == *action).unwrap();
        cost = child.1;
        hash = child.2;
    }
    assert_eq!((cost, hash), (3, 310));
}

/// An expansion that yields nothing anywhere in the beam on a non-terminal
/// turn is a contract violation, not a silent empty result.
#[test]
fn empty_beam_is_fatal() {
    let mut script = Script::new();
    script.insert(0, vec![(1, 1, 100, false)]);
    // Node 100 is a dead end and the beam holds nothing else.

    let cfg = config(4);
    let err = beam_search(&cfg, ScriptedState::new(script)).unwrap_err();
    assert_eq!(err, EngineError::EmptyBeam { turn: 1 });
}
