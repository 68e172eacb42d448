//! Augmented array: a bottom-up reduction tree over an associative,
//! commutative operation.
//!
//! Supports O(log n) point update, O(1) global aggregate, O(log n) range
//! aggregate, and boundary search over a monotone predicate. The beam search
//! uses only `set` and `all_prod` (it acts as an erasable priority structure
//! tracking the worst live candidate), but the structure's contract is
//! general.

/// An associative operation with an identity element.
///
/// `combine` must be associative; the beam additionally relies on it being
/// commutative so slot order carries no meaning.
pub trait Monoid {
    type S: Clone;

    fn identity() -> Self::S;

    fn combine(a: &Self::S, b: &Self::S) -> Self::S;
}

/// Fixed-capacity array with a precomputed reduction tree.
///
/// Backing storage is sized to the next power of two above the logical
/// length; positions past the logical length hold the identity and never
/// affect aggregates.
#[derive(Debug, Clone)]
pub struct SegTree<M: Monoid> {
    n: usize,
    size: usize,
    log: u32,
    data: Vec<M::S>,
}

impl<M: Monoid> SegTree<M> {
    /// Build a tree of `n` identity elements.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self::from_vec(vec![M::identity(); n])
    }

    /// Build a tree from an initial sequence in O(n).
    #[must_use]
    pub fn from_vec(v: Vec<M::S>) -> Self {
        let n = v.len();
        let size = n.next_power_of_two();
        let log = size.trailing_zeros();
        let mut data = vec![M::identity(); 2 * size];
        data[size..size + n].clone_from_slice(&v);
        for i in (1..size).rev() {
            data[i] = M::combine(&data[2 * i], &data[2 * i + 1]);
        }
        Self { n, size, log, data }
    }

    /// Logical length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the logical length is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Point update: set position `p` and repair its ancestors.
    ///
    /// # Panics
    ///
    /// Panics if `p >= len()`.
    pub fn set(&mut self, p: usize, x: M::S) {
        assert!(p < self.n, "segtree set out of range: {p} >= {}", self.n);
        let p = p + self.size;
        self.data[p] = x;
        for i in 1..=self.log {
            let k = p >> i;
            self.data[k] = M::combine(&self.data[2 * k], &self.data[2 * k + 1]);
        }
    }

    /// Read position `p`.
    ///
    /// # Panics
    ///
    /// Panics if `p >= len()`.
    #[must_use]
    pub fn get(&self, p: usize) -> &M::S {
        assert!(p < self.n, "segtree get out of range: {p} >= {}", self.n);
        &self.data[p + self.size]
    }

    /// Aggregate over the half-open range `[l, r)`.
    ///
    /// # Panics
    ///
    /// Panics unless `l <= r <= len()`.
    #[must_use]
    pub fn prod(&self, l: usize, r: usize) -> M::S {
        assert!(l <= r && r <= self.n, "segtree prod range [{l}, {r})");
        let mut sml = M::identity();
        let mut smr = M::identity();
        let mut l = l + self.size;
        let mut r = r + self.size;
        while l < r {
            if l & 1 == 1 {
                sml = M::combine(&sml, &self.data[l]);
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                smr = M::combine(&self.data[r], &smr);
            }
            l >>= 1;
            r >>= 1;
        }
        M::combine(&sml, &smr)
    }

    /// Global aggregate in O(1).
    #[must_use]
    pub fn all_prod(&self) -> &M::S {
        &self.data[1]
    }

    /// Largest `r` such that `f` holds on the aggregate of `[l, r)`.
    ///
    /// `f` must be monotone (once false it stays false as the range grows)
    /// and must accept the identity.
    ///
    /// # Panics
    ///
    /// Panics if `l > len()` or `f(identity)` is false.
    #[must_use]
    pub fn max_right<F>(&self, l: usize, f: F) -> usize
    where
        F: Fn(&M::S) -> bool,
    {
        assert!(l <= self.n, "segtree max_right start {l} > {}", self.n);
        assert!(f(&M::identity()), "predicate must accept the identity");
        if l == self.n {
            return self.n;
        }
        let mut l = l + self.size;
        let mut sm = M::identity();
        loop {
            while l % 2 == 0 {
                l >>= 1;
            }
            if !f(&M::combine(&sm, &self.data[l])) {
                while l < self.size {
                    l *= 2;
                    let merged = M::combine(&sm, &self.data[l]);
                    if f(&merged) {
                        sm = merged;
                        l += 1;
                    }
                }
                return l - self.size;
            }
            sm = M::combine(&sm, &self.data[l]);
            l += 1;
            if (l & l.wrapping_neg()) == l {
                return self.n;
            }
        }
    }

    /// Smallest `l` such that `f` holds on the aggregate of `[l, r)`.
    ///
    /// Mirror image of [`SegTree::max_right`]; same predicate requirements.
    ///
    /// # Panics
    ///
    /// Panics if `r > len()` or `f(identity)` is false.
    #[must_use]
    pub fn min_left<F>(&self, r: usize, f: F) -> usize
    where
        F: Fn(&M::S) -> bool,
    {
        assert!(r <= self.n, "segtree min_left end {r} > {}", self.n);
        assert!(f(&M::identity()), "predicate must accept the identity");
        if r == 0 {
            return 0;
        }
        let mut r = r + self.size;
        let mut sm = M::identity();
        loop {
            r -= 1;
            while r > 1 && r % 2 == 1 {
                r >>= 1;
            }
            if !f(&M::combine(&self.data[r], &sm)) {
                while r < self.size {
                    r = 2 * r + 1;
                    let merged = M::combine(&self.data[r], &sm);
                    if f(&merged) {
                        sm = merged;
                        r -= 1;
                    }
                }
                return r + 1 - self.size;
            }
            sm = M::combine(&self.data[r], &sm);
            if (r & r.wrapping_neg()) == r {
                return 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum MaxI64 {}

    impl Monoid for MaxI64 {
        type S = i64;

        fn identity() -> i64 {
            i64::MIN
        }

        fn combine(a: &i64, b: &i64) -> i64 {
            *a.max(b)
        }
    }

    #[test]
    fn all_prod_tracks_point_updates() {
        let mut st = SegTree::<MaxI64>::from_vec(vec![3, 1, 4, 1, 5]);
        assert_eq!(*st.all_prod(), 5);
        st.set(4, 0);
        assert_eq!(*st.all_prod(), 4);
        st.set(1, 9);
        assert_eq!(*st.all_prod(), 9);
    }

    #[test]
    fn prod_covers_partial_ranges() {
        let st = SegTree::<MaxI64>::from_vec(vec![3, 1, 4, 1, 5, 9, 2, 6]);
        assert_eq!(st.prod(0, 4), 4);
        assert_eq!(st.prod(4, 8), 9);
        assert_eq!(st.prod(2, 3), 4);
        assert_eq!(st.prod(3, 3), i64::MIN);
    }

    #[test]
    fn non_power_of_two_length_ignores_padding() {
        let st = SegTree::<MaxI64>::from_vec(vec![-5, -2, -9]);
        assert_eq!(st.len(), 3);
        assert_eq!(*st.all_prod(), -2);
        assert_eq!(st.prod(0, 3), -2);
    }

    #[test]
    fn max_right_finds_predicate_boundary() {
        // Prefix aggregates: 1, 3, 3, 7, 7 — first exceeds 3 at index 3.
        let st = SegTree::<MaxI64>::from_vec(vec![1, 3, 2, 7, 4]);
        assert_eq!(st.max_right(0, |&m| m <= 3), 3);
        assert_eq!(st.max_right(0, |&m| m <= 100), 5);
        assert_eq!(st.max_right(4, |&m| m <= 3), 4);
    }

    #[test]
    fn min_left_finds_predicate_boundary() {
        let st = SegTree::<MaxI64>::from_vec(vec![1, 3, 2, 7, 4]);
        assert_eq!(st.min_left(5, |&m| m <= 4), 4);
        assert_eq!(st.min_left(3, |&m| m <= 2), 2);
        assert_eq!(st.min_left(5, |&m| m <= 100), 0);
    }

    #[test]
    fn randomized_aggregate_matches_linear_scan() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        let n = 37;
        let mut mirror: Vec<i64> = (0..n).map(|_| rng.gen_range(-1000..1000)).collect();
        let mut st = SegTree::<MaxI64>::from_vec(mirror.clone());

        for _ in 0..500 {
            let p = rng.gen_range(0..n);
            let v = rng.gen_range(-1000..1000);
            mirror[p] = v;
            st.set(p, v);
            assert_eq!(*st.all_prod(), *mirror.iter().max().unwrap());

            let l = rng.gen_range(0..=n);
            let r = rng.gen_range(l..=n);
            let expected = mirror[l..r].iter().copied().max().unwrap_or(i64::MIN);
            assert_eq!(st.prod(l, r), expected);
        }
    }
}
