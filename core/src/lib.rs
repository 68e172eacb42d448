//! Beamline core: a memory-efficient beam-search engine for large
//! combinatorial-optimization problems.
//!
//! A bounded-width frontier of candidate states is expanded turn by turn,
//! pruned by cost, deduplicated by state fingerprint, and replayed to produce
//! an action sequence from the start to a goal (turn-minimizing problems) or
//! to the best reachable state within a fixed horizon.
//!
//! The engine is deterministic, single-threaded, and allocation-frugal: all
//! major buffers are sized once from [`BeamConfig`] and reused across turns,
//! and the whole frontier is driven through a *single* mutable state object
//! via an Euler-tour encoding of the frontier tree ([`EulerTree`]), so the
//! extra memory is O(search depth) rather than O(beam width × state size).
//!
//! # Key types
//!
//! - [`SearchState`] — the contract domain problems implement
//! - [`Selector`] — bounded, deduplicating per-turn candidate admission
//! - [`EulerTree`] — shared-state frontier representation and path replay
//! - [`beam_search`] — the turn-loop driver
//! - [`BeamConfig`] — immutable sizing parameters
//!
//! # Quick start
//!
//! Implement [`SearchState`] for your problem, then:
//!
//! ```ignore
//! let config = BeamConfig::new(max_turn, beam_width, tour_capacity, map_capacity)?;
//! let outcome = beam_search(&config, my_state)?;
//! replay(&outcome.actions);
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod contract;
pub mod error;
pub mod hash_map;
pub mod search;
pub mod segtree;
pub mod selector;
pub mod tree;

pub use config::BeamConfig;
pub use contract::SearchState;
pub use error::EngineError;
pub use search::{beam_search, SearchOutcome, SearchStats};
pub use selector::{Candidate, Selector};
pub use tree::EulerTree;

/// Path cost. Lower is strictly better (minimization).
pub type Cost = i64;

/// State fingerprint: a 64-bit value supplied by the domain's
/// [`SearchState::expand`]. The engine treats equal fingerprints as equal
/// states and merges them by cost; see [`hash_map`] for the distribution
/// precondition.
pub type Hash = u64;
