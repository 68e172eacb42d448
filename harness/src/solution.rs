//! Plan rendering.
//!
//! Search output is a sequence of hops; submissions are keypad digit strings
//! with one digit per tick, `5` meaning coast and the rest encoding the nine
//! acceleration combinations. Each hop is re-derived here: table-backed hops
//! are matched against the move table by final velocity, everything else is
//! replayed with the same greedy steering the search used, so the rendered
//! ticks land exactly where the search said they would.

use crate::moves::{MoveTable, MAX_TICKS};
use crate::physics::steer;
use crate::spaceship::{Hop, SpaceshipProblem};

/// Keypad digit for one tick's acceleration pair. `(0, 0)` maps to `5`.
fn digit(dvx: i64, dvy: i64) -> char {
    debug_assert!(dvx.abs() <= 1 && dvy.abs() <= 1);
    char::from(b'0' + (3 * (dvy + 1) + dvx + 2) as u8)
}

/// Expand `hops` into the digit string that flies them, prefixed with a
/// coast tick when the instance lists the origin as a target of its own.
#[must_use]
pub fn render_plan(problem: &SpaceshipProblem, moves: &MoveTable, hops: &[Hop]) -> String {
    let mut out = String::new();
    if problem.has_origin() {
        out.push('5');
    }
    let mut pos = (0i64, 0i64);
    let mut vel = (0i64, 0i64);
    for hop in hops {
        let target = problem.target(hop.to);
        let mut found = false;
        'table: for ticks in 1..=MAX_TICKS {
            let dif_x = target.0 - pos.0 - ticks as i64 * vel.0;
            let dif_y = target.1 - pos.1 - ticks as i64 * vel.1;
            for mx in moves.reachable(ticks, dif_x) {
                if mx.final_vel != i64::from(hop.dvx) {
                    continue;
                }
                for my in moves.reachable(ticks, dif_y) {
                    if my.final_vel != i64::from(hop.dvy) {
                        continue;
                    }
                    for (&ax, &ay) in mx.accels.iter().zip(&my.accels) {
                        out.push(digit(i64::from(ax), i64::from(ay)));
                    }
                    pos = target;
                    vel.0 += i64::from(hop.dvx);
                    vel.1 += i64::from(hop.dvy);
                    found = true;
                    break 'table;
                }
            }
        }
        if !found {
            // Same steering the search's fallback flew, so this terminates
            // with the hop's recorded velocity change.
            while pos != target {
                let dvx = steer(target.0 - pos.0, vel.0);
                let dvy = steer(target.1 - pos.1, vel.1);
                out.push(digit(dvx, dvy));
                vel.0 += dvx;
                vel.1 += dvy;
                pos.0 += vel.0;
                pos.1 += vel.1;
            }
        }
    }
    out
}

/// Positions after each tick of a digit plan, starting from the origin at
/// rest. Panics on characters outside `1..=9`.
#[must_use]
pub fn simulate(plan: &str) -> Vec<(i64, i64)> {
    let mut pos = (0i64, 0i64);
    let mut vel = (0i64, 0i64);
    let mut trail = Vec::with_capacity(plan.len());
    for c in plan.chars() {
        let key = c.to_digit(10).expect("digit plan") as i64 - 1;
        assert!((0..9).contains(&key), "keypad digits are 1..=9");
        vel.0 += key % 3 - 1;
        vel.1 += key / 3 - 1;
        pos.0 += vel.0;
        pos.1 += vel.1;
        trail.push(pos);
    }
    trail
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_encoding_matches_the_keypad() {
        assert_eq!(digit(0, 0), '5');
        assert_eq!(digit(-1, -1), '1');
        assert_eq!(digit(1, 1), '9');
        assert_eq!(digit(1, -1), '3');
        assert_eq!(digit(-1, 1), '7');
    }

    #[test]
    fn simulate_inverts_the_encoding() {
        for dvx in -1..=1 {
            for dvy in -1..=1 {
                let plan = String::from(digit(dvx, dvy));
                assert_eq!(simulate(&plan), vec![(dvx, dvy)]);
            }
        }
    }

    #[test]
    fn simulate_accumulates_velocity() {
        // Accelerate right twice, then coast: speeds 1, 2, 2.
        assert_eq!(simulate("665"), vec![(1, 0), (3, 0), (5, 0)]);
    }
}
