//! Shared fixtures for the benchmark suite.

use rand::Rng;

/// Scatter `count` distinct targets uniformly in a square of the given
/// half-extent around the origin, excluding the origin itself.
pub fn scatter_targets(rng: &mut impl Rng, count: usize, half_extent: i64) -> Vec<(i64, i64)> {
    let mut seen = std::collections::HashSet::new();
    let mut targets = Vec::with_capacity(count);
    while targets.len() < count {
        let point = (
            rng.gen_range(-half_extent..=half_extent),
            rng.gen_range(-half_extent..=half_extent),
        );
        if point != (0, 0) && seen.insert(point) {
            targets.push(point);
        }
    }
    targets
}
