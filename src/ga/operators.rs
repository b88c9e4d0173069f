//! Permutation operators for tours.
//!
//! Both operators work on `&[usize]` visiting orders and always keep a
//! valid permutation of `0..n`.
//!
//! - [`order_crossover`] (OX1): Davis (1985). Keeps a segment of parent1 in
//!   place and the relative order of parent2 for everything else.
//! - [`swap_mutation`]: exchanges two distinct positions. O(1).
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Order Crossover (OX1), producing a single child.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Pick cut points `start <= end` uniformly from `0..n`
/// 2. Copy `parent1[start..=end]` to the same child positions
/// 3. Fill the remaining positions, starting at `end + 1` and wrapping,
///    with parent2's values not yet placed, scanning parent2 from `end + 1`
///    and wrapping
///
/// With the inclusive segment, `end + 1` is the first position after the
/// copied slice, i.e. `b` for a half-open segment `[a, b)`.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.to_vec();
    }

    let (start, end) = random_segment(n, rng);
    order_crossover_segment(parent1, parent2, start, end)
}

/// Deterministic core of [`order_crossover`] for a fixed segment
/// `[start, end]` (inclusive).
///
/// # Panics
/// Panics if the parents have different lengths or `start > end`, or
/// `end` is out of range.
///
/// # Examples
///
/// ```
/// use u_tspga::ga::operators::order_crossover_segment;
///
/// let p1 = [0, 1, 2, 3, 4, 5, 6, 7];
/// let p2 = [7, 6, 5, 4, 3, 2, 1, 0];
/// let child = order_crossover_segment(&p1, &p2, 2, 4);
/// assert_eq!(child, vec![6, 5, 2, 3, 4, 1, 0, 7]);
/// ```
pub fn order_crossover_segment(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(start <= end && end < n, "invalid segment [{start}, {end}] for length {n}");

    let mut child = vec![usize::MAX; n];
    let mut placed = vec![false; n];

    for i in start..=end {
        child[i] = parent1[i];
        placed[parent1[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let val = parent2[(end + 1 + offset) % n];
        if !placed[val] {
            child[pos] = val;
            placed[val] = true;
            pos = (pos + 1) % n;
        }
    }

    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation: exchange the values at two distinct random positions.
///
/// Orders shorter than 2 are left unchanged.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    perm.swap(i, j);
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::collections::HashSet;

    fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
        if perm.len() != n {
            return false;
        }
        let set: HashSet<usize> = perm.iter().copied().collect();
        set.len() == n && perm.iter().all(|&v| v < n)
    }

    // ---- OX ----

    #[test]
    fn test_ox_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1: Vec<usize> = (0..8).collect();
        let p2 = vec![3, 7, 5, 1, 6, 0, 2, 4];

        for _ in 0..200 {
            let child = order_crossover(&p1, &p2, &mut rng);
            assert!(is_valid_permutation(&child, 8), "OX child not valid: {child:?}");
        }
    }

    #[test]
    fn test_ox_keeps_parent1_segment() {
        let p1 = [0, 1, 2, 3, 4, 5];
        let p2 = [5, 3, 1, 4, 2, 0];
        let child = order_crossover_segment(&p1, &p2, 1, 3);
        assert_eq!(&child[1..=3], &[1, 2, 3]);
        // p2 from index 4: 2(placed), 0, 5, 3(placed), 1(placed), 4 → positions 4, 5, 0
        assert_eq!(child, vec![4, 1, 2, 3, 0, 5]);
    }

    #[test]
    fn test_ox_single_point_segment() {
        let p1 = [0, 1, 2, 3];
        let p2 = [3, 2, 1, 0];
        let child = order_crossover_segment(&p1, &p2, 2, 2);
        assert_eq!(child[2], 2);
        assert!(is_valid_permutation(&child, 4));
        // p2 from index 3: 0, 3, 2(placed), 1 → positions 3, 0, 1
        assert_eq!(child, vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_ox_full_segment_copies_parent1() {
        let p1 = [2, 0, 3, 1];
        let p2 = [0, 1, 2, 3];
        assert_eq!(order_crossover_segment(&p1, &p2, 0, 3), p1.to_vec());
    }

    #[test]
    fn test_ox_identical_parents() {
        let mut rng = create_rng(5);
        let p = vec![4, 2, 0, 3, 1];
        for _ in 0..50 {
            assert_eq!(order_crossover(&p, &p, &mut rng), p);
        }
    }

    #[test]
    fn test_ox_short_tours() {
        let mut rng = create_rng(42);
        assert_eq!(order_crossover(&[0], &[0], &mut rng), vec![0]);
        assert!(order_crossover(&[], &[], &mut rng).is_empty());
        for _ in 0..20 {
            let child = order_crossover(&[0, 1], &[1, 0], &mut rng);
            assert!(is_valid_permutation(&child, 2));
        }
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_ox_length_mismatch_panics() {
        let mut rng = create_rng(42);
        order_crossover(&[0, 1, 2], &[0, 1], &mut rng);
    }

    // ---- Swap ----

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = create_rng(42);
        let original: Vec<usize> = (0..10).collect();
        for _ in 0..200 {
            let mut perm = original.clone();
            swap_mutation(&mut perm, &mut rng);
            assert!(is_valid_permutation(&perm, 10));
            let changed = perm.iter().zip(&original).filter(|(a, b)| a != b).count();
            assert_eq!(changed, 2);
        }
    }

    #[test]
    fn test_swap_two_elements_always_swaps() {
        let mut rng = create_rng(8);
        for _ in 0..20 {
            let mut perm = vec![0, 1];
            swap_mutation(&mut perm, &mut rng);
            assert_eq!(perm, vec![1, 0]);
        }
    }

    #[test]
    fn test_swap_single_element() {
        let mut rng = create_rng(42);
        let mut perm = vec![0];
        swap_mutation(&mut perm, &mut rng);
        assert_eq!(perm, vec![0]);
    }

    // ---- Integration: crossover + mutation pipeline ----

    #[test]
    fn test_pipeline_preserves_validity() {
        let mut rng = create_rng(42);
        let p1: Vec<usize> = (0..20).collect();
        let mut p2: Vec<usize> = (0..20).collect();
        p2.reverse();

        for _ in 0..50 {
            let mut child = order_crossover(&p1, &p2, &mut rng);
            swap_mutation(&mut child, &mut rng);
            assert!(is_valid_permutation(&child, 20), "pipeline child invalid: {child:?}");
        }
    }

    #[test]
    fn test_random_segment_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (start, end) = random_segment(10, &mut rng);
            assert!(start <= end);
            assert!(end < 10);
        }
    }
}
