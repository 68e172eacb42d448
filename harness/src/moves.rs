//! Short-move lookup table.
//!
//! Precomputes, for every tick count up to [`MAX_TICKS`], which single-axis
//! displacements are reachable from a standing start and with which final
//! velocity. Entries carry the per-tick acceleration sequence so a move can be
//! replayed digit by digit later. Built once by breadth-first search over
//! `(displacement, velocity)` states; each level deduplicates so the table
//! stays small (displacements never exceed ±91 after 13 ticks).

/// Longest move the table covers, in ticks.
pub const MAX_TICKS: usize = 13;

/// Largest single-axis displacement the table indexes.
pub const MAX_OFFSET: i64 = 100;

/// A reachable single-axis move: the velocity it ends with and the
/// acceleration applied on each tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortMove {
    pub final_vel: i64,
    pub accels: Vec<i8>,
}

/// Reachability table for short moves, indexed by tick count and displacement.
pub struct MoveTable {
    // table[t][disp + MAX_OFFSET] holds the moves of length t+1 ticks that
    // shift one axis by disp, starting from velocity zero.
    table: Vec<Vec<Vec<ShortMove>>>,
}

impl MoveTable {
    #[must_use]
    pub fn build() -> Self {
        let width = (2 * MAX_OFFSET + 1) as usize;
        let mut table = vec![vec![Vec::new(); width]; MAX_TICKS];

        let mut frontier: Vec<(i64, i64, Vec<i8>)> = vec![(0, 0, Vec::new())];
        for level in table.iter_mut() {
            let mut visited = std::collections::HashSet::new();
            let mut next = Vec::new();
            for (pos, vel, accels) in frontier {
                for dv in -1i64..=1 {
                    let nv = vel + dv;
                    let np = pos + nv;
                    if !visited.insert((np, nv)) {
                        continue;
                    }
                    let mut seq = accels.clone();
                    seq.push(dv as i8);
                    level[(np + MAX_OFFSET) as usize].push(ShortMove {
                        final_vel: nv,
                        accels: seq.clone(),
                    });
                    next.push((np, nv, seq));
                }
            }
            frontier = next;
        }
        Self { table }
    }

    /// Moves of exactly `ticks` ticks covering displacement `disp`. Empty when
    /// `disp` is out of range or nothing reaches it in that many ticks.
    #[must_use]
    pub fn reachable(&self, ticks: usize, disp: i64) -> &[ShortMove] {
        if ticks == 0 || ticks > MAX_TICKS || disp.abs() > MAX_OFFSET {
            return &[];
        }
        &self.table[ticks - 1][(disp + MAX_OFFSET) as usize]
    }
}
