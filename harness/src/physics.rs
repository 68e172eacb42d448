//! Single-axis velocity control.
//!
//! Each tick the ship may change each velocity component by -1, 0, or +1,
//! then moves by its velocity. `steer` picks the per-tick change for one
//! axis: brake when overshooting or moving the wrong way, otherwise
//! accelerate only while the remaining braking distance still fits in the
//! distance left (`v(v+1)/2` at speed `v`).

/// Per-tick velocity change toward closing `remain` at velocity `vel`.
#[must_use]
pub fn steer(remain: i64, vel: i64) -> i64 {
    if remain * vel < 0 {
        // Moving away: brake.
        return -vel.signum();
    }
    if remain == 0 {
        // On target this axis: bleed off any residual speed.
        return -vel.signum();
    }
    let dist = remain.abs();
    let speed = vel.abs();
    for accel in (0..=1).rev() {
        if dist >= (speed + accel + 1) * (speed + accel) / 2 {
            return remain.signum() * accel;
        }
    }
    -remain.signum()
}

/// Drive one axis from `0` at velocity `vel` until the displacement reaches
/// `remain`, up to `max_ticks`. Returns `(ticks, final velocity)` on
/// arrival, `None` if the budget ran out first.
#[must_use]
pub fn ticks_to_reach(remain: i64, vel: i64, max_ticks: i64) -> Option<(i64, i64)> {
    let mut pos = 0;
    let mut vel = vel;
    let mut ticks = 0;
    while pos != remain {
        if ticks >= max_ticks {
            return None;
        }
        vel += steer(remain - pos, vel);
        pos += vel;
        ticks += 1;
    }
    Some((ticks, vel))
}

/// Fly from the origin toward `target`, steering both axes every tick.
/// Arrival means both axes hit simultaneously (an axis that gets there
/// early bleeds speed, drifts off, and comes back). Returns
/// `(ticks, final velocity)`, or `None` once `max_ticks` elapse.
#[must_use]
pub fn fly(target: (i64, i64), vel: (i64, i64), max_ticks: i64) -> Option<(i64, (i64, i64))> {
    let mut pos = (0, 0);
    let mut vel = vel;
    let mut ticks = 0;
    while pos != target {
        if ticks >= max_ticks {
            return None;
        }
        vel.0 += steer(target.0 - pos.0, vel.0);
        vel.1 += steer(target.1 - pos.1, vel.1);
        pos.0 += vel.0;
        pos.1 += vel.1;
        ticks += 1;
    }
    Some((ticks, vel))
}
