//! Parent selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

use super::types::Tour;
use rand::Rng;

/// Tournament selection: draw `k` indices uniformly with replacement and
/// return the one with the highest fitness.
///
/// Ties go to the first candidate drawn. `k` is treated as at least 1.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Tour], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() > population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::random::create_rng;

    /// Two-location tours whose round trip has the given length.
    fn with_lengths(lengths: &[f64]) -> Vec<Tour> {
        lengths
            .iter()
            .map(|&d| {
                let m = DistanceMatrix::from_rows(&[vec![0.0, d / 2.0], vec![d / 2.0, 0.0]])
                    .unwrap();
                Tour::new(vec![0, 1], &m)
            })
            .collect()
    }

    #[test]
    fn test_tournament_favors_shortest() {
        let pop = with_lengths(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, 4, &mut rng)] += 1;
        }
        // P(index 2 drawn at least once in 4 draws) = 1 - (3/4)^4 ≈ 0.68
        assert!(
            counts[2] > 6000,
            "expected shortest tour to win >60% of the time, got {counts:?}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_uniform() {
        let pop = with_lengths(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[tournament(&pop, 1, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 2000, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_size_0_behaves_like_1() {
        let pop = with_lengths(&[3.0, 4.0]);
        let mut rng = create_rng(1);
        for _ in 0..100 {
            assert!(tournament(&pop, 0, &mut rng) < 2);
        }
    }

    #[test]
    fn test_single_individual() {
        let pop = with_lengths(&[5.0]);
        let mut rng = create_rng(42);
        assert_eq!(tournament(&pop, 3, &mut rng), 0);
    }

    #[test]
    fn test_equal_fitness_keeps_first_draw() {
        let pop = with_lengths(&[5.0, 5.0, 5.0, 5.0]);
        let mut a = create_rng(9);
        let mut b = create_rng(9);
        for _ in 0..100 {
            let first_draw = b.random_range(0..4);
            for _ in 1..3 {
                let _: usize = b.random_range(0..4);
            }
            assert_eq!(tournament(&pop, 3, &mut a), first_draw);
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Tour> = vec![];
        let mut rng = create_rng(42);
        tournament(&pop, 3, &mut rng);
    }
}
