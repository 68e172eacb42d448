//! Immutable sizing parameters for a beam-search run.

use crate::error::EngineError;

/// Beam-search sizing configuration.
///
/// All buffers (tour, leaf table, candidate array, hash table, reduction
/// tree) are allocated once from these values and reused across turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeamConfig {
    /// Number of turns to run. Must be positive.
    pub max_turn: usize,
    /// Maximum number of live (non-finished) candidates per turn.
    /// Must be positive.
    pub beam_width: usize,
    /// Allocation hint for the Euler-tour buffers. Tour length scales with
    /// beam width × effective branch depth; `30 × beam_width` is a workable
    /// starting point.
    pub tour_capacity: usize,
    /// Capacity of the dedup hash table. Must exceed `beam_width`; ≥16× the
    /// per-turn candidate volume is recommended to bound probe-chain length.
    pub hash_map_capacity: u32,
}

impl BeamConfig {
    /// Construct a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] for any parameter the run loop
    /// cannot honor; see [`BeamConfig::validate`].
    pub fn new(
        max_turn: usize,
        beam_width: usize,
        tour_capacity: usize,
        hash_map_capacity: u32,
    ) -> Result<Self, EngineError> {
        let config = Self {
            max_turn,
            beam_width,
            tour_capacity,
            hash_map_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the sizing parameters.
    ///
    /// The driver also runs this pre-flight, so a hand-assembled struct
    /// literal cannot reach the turn loop with a degenerate configuration
    /// (e.g. `max_turn == 0`, which would otherwise complete the loop with
    /// no return path).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if `max_turn` or `beam_width`
    /// is zero, or if `hash_map_capacity` does not exceed `beam_width`.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_turn == 0 {
            return Err(EngineError::InvalidConfig {
                detail: "max_turn must be positive".into(),
            });
        }
        if self.beam_width == 0 {
            return Err(EngineError::InvalidConfig {
                detail: "beam_width must be positive".into(),
            });
        }
        if u64::from(self.hash_map_capacity) <= self.beam_width as u64 {
            return Err(EngineError::InvalidConfig {
                detail: format!(
                    "hash_map_capacity ({}) must exceed beam_width ({})",
                    self.hash_map_capacity, self.beam_width
                ),
            });
        }
        Ok(())
    }
}
