//! Spaceship routing on top of the `beamline-core` engine.
//!
//! An ICFP 2024 "spaceship" instance lists lattice points to visit; the ship
//! starts at the origin at rest and accelerates by at most one unit per axis
//! per tick. This crate parses instances, models the domain as a
//! [`beamline_core::SearchState`], and renders the found hop sequence as a
//! keypad digit plan.

pub mod input;
pub mod moves;
pub mod physics;
pub mod solution;
pub mod spaceship;

use beamline_core::{beam_search, EngineError, SearchStats};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::input::Problem;
use crate::moves::MoveTable;
use crate::solution::render_plan;
use crate::spaceship::{Hop, SpaceshipProblem, SpaceshipState};

/// Default beam width; wider beams trade memory and time for shorter plans.
pub const DEFAULT_BEAM_WIDTH: usize = 3000;

/// Zobrist seed compiled in so repeated runs are reproducible.
pub const DEFAULT_SEED: u64 = 1_234_567_891;

/// A solved instance: the digit plan, the hop sequence it encodes, and the
/// engine's run totals.
#[derive(Debug, Clone)]
pub struct Solution {
    pub plan: String,
    pub hops: Vec<Hop>,
    pub stats: SearchStats,
}

/// Route one instance end to end.
///
/// Runs one search turn per target, then renders the winning hop sequence.
/// An instance with no targets needs no search; it yields the empty plan
/// (or a single coast tick when the origin itself is listed).
///
/// # Errors
///
/// Propagates [`EngineError`] from engine sizing or the run itself.
pub fn solve(problem: &Problem, beam_width: usize, seed: u64) -> Result<Solution, EngineError> {
    if problem.targets.is_empty() {
        return Ok(Solution {
            plan: if problem.has_origin {
                String::from("5")
            } else {
                String::new()
            },
            hops: Vec::new(),
            stats: SearchStats::default(),
        });
    }

    let moves = MoveTable::build();
    let mut rng = StdRng::seed_from_u64(seed);
    let ship = SpaceshipProblem::new(problem, &mut rng);
    let config = ship.search_config(beam_width)?;
    let state = SpaceshipState::new(&ship, &moves);
    let outcome = beam_search(&config, state)?;
    let plan = render_plan(&ship, &moves, &outcome.actions);
    Ok(Solution {
        plan,
        hops: outcome.actions,
        stats: outcome.stats,
    })
}
