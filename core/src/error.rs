//! Typed engine errors.
//!
//! All fatal conditions abort the run without producing a result; the engine
//! is a one-shot deterministic computation and performs no retries.
//! Hash-collision merges and cost-cut rejections are expected pruning, not
//! errors, and never surface here.

/// Fatal failure of a beam-search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A sizing parameter was rejected before the search started.
    InvalidConfig { detail: String },
    /// A non-terminal turn produced zero live candidates across the entire
    /// beam. The state contract requires at least one transition somewhere
    /// in the frontier on every non-terminal turn.
    EmptyBeam { turn: usize },
    /// The open-addressing table's probe sequence wrapped without finding a
    /// slot. The table must be sized well above the beam width (≥16× is the
    /// recommended ratio).
    HashTableFull { capacity: u32 },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig { detail } => {
                write!(f, "invalid beam-search config: {detail}")
            }
            Self::EmptyBeam { turn } => {
                write!(f, "no live candidates produced on non-terminal turn {turn}")
            }
            Self::HashTableFull { capacity } => {
                write!(f, "hash table exhausted (capacity {capacity})")
            }
        }
    }
}

impl std::error::Error for EngineError {}
