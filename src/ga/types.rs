//! Candidate solutions and populations.
//!
//! A [`Tour`] is a permutation of location indices with a cached length.
//! A [`Population`] is one generation's worth of tours and offers a single
//! fitness-ranked view that serves both best-tracking and elitism.

use crate::distance::DistanceMatrix;
use crate::random::random_permutation;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Guard added to the tour length before inversion, so that a zero-length
/// tour still has a finite fitness.
pub const FITNESS_EPSILON: f64 = 1e-9;

/// Fitness of a tour with the given total length: `1 / (length + ε)`.
///
/// Strictly decreasing in length; higher fitness means a shorter tour.
#[inline]
pub fn fitness_from_distance(distance: f64) -> f64 {
    1.0 / (distance + FITNESS_EPSILON)
}

/// A closed tour over every location, visited in `order`.
///
/// The closing edge from the last location back to the first is implicit.
/// Tours are created unevaluated by the breeding step and evaluated once by
/// [`Population::evaluate`]; an unevaluated tour reports an infinite length
/// and zero fitness. Evaluation state is tracked apart from the length, so a
/// tour is never re-evaluated whatever its length. Crossover and mutation build new tours and never touch
/// their parents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    order: Vec<usize>,
    distance: Option<f64>,
}

impl Tour {
    /// Creates an unevaluated tour.
    pub fn unevaluated(order: Vec<usize>) -> Self {
        Self {
            order,
            distance: None,
        }
    }

    /// Creates a tour and evaluates it against `matrix`.
    pub fn new(order: Vec<usize>, matrix: &DistanceMatrix) -> Self {
        let mut tour = Self::unevaluated(order);
        tour.evaluate(matrix);
        tour
    }

    /// Creates an unevaluated, uniformly random tour over all locations.
    pub fn random<R: Rng>(location_count: usize, rng: &mut R) -> Self {
        Self::unevaluated(random_permutation(location_count, rng))
    }

    /// Computes and caches the total closed-tour length.
    pub fn evaluate(&mut self, matrix: &DistanceMatrix) {
        self.distance = Some(matrix.tour_length(&self.order));
    }

    /// Whether [`evaluate`](Tour::evaluate) has run.
    pub fn is_evaluated(&self) -> bool {
        self.distance.is_some()
    }

    /// The visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// Total length including the closing edge; infinite until evaluated.
    pub fn distance(&self) -> f64 {
        self.distance.unwrap_or(f64::INFINITY)
    }

    pub fn fitness(&self) -> f64 {
        fitness_from_distance(self.distance())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// One generation of tours.
#[derive(Debug, Clone, Default)]
pub struct Population {
    tours: Vec<Tour>,
}

impl Population {
    /// `size` unevaluated random tours over `location_count` locations.
    pub fn random<R: Rng>(size: usize, location_count: usize, rng: &mut R) -> Self {
        Self {
            tours: (0..size)
                .map(|_| Tour::random(location_count, rng))
                .collect(),
        }
    }

    pub fn from_tours(tours: Vec<Tour>) -> Self {
        Self { tours }
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// Evaluates every tour that has not been evaluated yet.
    ///
    /// With the `parallel` feature and `parallel == true`, evaluation runs on
    /// the rayon pool. Evaluation is a pure map over tours, so the result is
    /// identical either way.
    pub fn evaluate(&mut self, matrix: &DistanceMatrix, parallel: bool) {
        #[cfg(feature = "parallel")]
        {
            if parallel {
                self.tours
                    .par_iter_mut()
                    .filter(|tour| !tour.is_evaluated())
                    .for_each(|tour| tour.evaluate(matrix));
                return;
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        for tour in self.tours.iter_mut().filter(|t| !t.is_evaluated()) {
            tour.evaluate(matrix);
        }
    }

    /// Indices of the tours ordered by fitness, best first.
    ///
    /// The sort is stable: equally fit tours keep their population order.
    pub fn ranked(&self) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..self.tours.len()).collect();
        idx.sort_by(|&a, &b| {
            self.tours[b]
                .fitness()
                .partial_cmp(&self.tours[a].fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        idx
    }

    /// The highest-fitness tour, first one on ties.
    pub fn best(&self) -> Option<&Tour> {
        self.tours.iter().fold(None, |best: Option<&Tour>, tour| match best {
            Some(b) if b.fitness() >= tour.fitness() => Some(b),
            _ => Some(tour),
        })
    }

    /// Mean tour length over the population.
    pub fn mean_distance(&self) -> f64 {
        if self.tours.is_empty() {
            return f64::INFINITY;
        }
        self.tours.iter().map(Tour::distance).sum::<f64>() / self.tours.len() as f64
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Tour;

    fn index(&self, idx: usize) -> &Tour {
        &self.tours[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn square() -> DistanceMatrix {
        // 4 corners of a unit square
        DistanceMatrix::from_rows(&[
            vec![0.0, 1.0, 2.0, 1.0],
            vec![1.0, 0.0, 1.0, 2.0],
            vec![2.0, 1.0, 0.0, 1.0],
            vec![1.0, 2.0, 1.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_fitness_is_inverse_length() {
        let m = square();
        let short = Tour::new(vec![0, 1, 2, 3], &m);
        let long = Tour::new(vec![0, 2, 1, 3], &m);
        assert_eq!(short.distance(), 4.0);
        assert_eq!(long.distance(), 6.0);
        assert!(short.fitness() > long.fitness());
    }

    #[test]
    fn test_zero_length_fitness_is_finite() {
        let f = fitness_from_distance(0.0);
        assert!(f.is_finite());
        assert!((f - 1e9).abs() < 1.0);
    }

    #[test]
    fn test_unevaluated_tour() {
        let tour = Tour::unevaluated(vec![0, 1, 2]);
        assert!(!tour.is_evaluated());
        assert_eq!(tour.fitness(), 0.0);
        assert_eq!(tour.len(), 3);
    }

    #[test]
    fn test_population_evaluate_and_rank() {
        let m = square();
        let mut pop = Population::from_tours(vec![
            Tour::unevaluated(vec![0, 2, 1, 3]),
            Tour::unevaluated(vec![0, 1, 2, 3]),
            Tour::unevaluated(vec![1, 3, 0, 2]),
            Tour::unevaluated(vec![3, 2, 1, 0]),
        ]);
        pop.evaluate(&m, false);
        assert!(pop.tours().iter().all(Tour::is_evaluated));

        // ties keep population order
        assert_eq!(pop.ranked(), vec![1, 3, 0, 2]);
        assert_eq!(pop.best().unwrap().order(), &[0, 1, 2, 3]);
        assert_eq!(pop.mean_distance(), (6.0 + 4.0 + 6.0 + 4.0) / 4.0);
    }

    #[test]
    fn test_evaluate_skips_evaluated_tours() {
        let m = square();
        let mut stale = Tour::unevaluated(vec![0, 1, 2, 3]);
        stale.distance = Some(123.0);
        let mut pop = Population::from_tours(vec![stale]);
        pop.evaluate(&m, true);
        assert_eq!(pop[0].distance(), 123.0);
    }

    #[test]
    fn test_infinite_length_still_counts_as_evaluated() {
        let mut tour = Tour::unevaluated(vec![0, 1]);
        tour.distance = Some(f64::INFINITY);
        assert!(tour.is_evaluated());

        let mut pop = Population::from_tours(vec![tour]);
        pop.evaluate(&square_pair(), false);
        assert_eq!(pop[0].distance(), f64::INFINITY);
    }

    fn square_pair() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap()
    }

    #[test]
    fn test_random_population() {
        let mut rng = create_rng(42);
        let pop = Population::random(30, 6, &mut rng);
        assert_eq!(pop.len(), 30);
        for tour in pop.tours() {
            let mut sorted = tour.order().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_empty_population() {
        let pop = Population::default();
        assert!(pop.is_empty());
        assert!(pop.best().is_none());
        assert!(pop.ranked().is_empty());
    }
}
