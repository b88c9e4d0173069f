//! GA generational loop execution.
//!
//! [`GeneticEngine`] orchestrates the complete run:
//! initialization → evaluation → ranking → elitism → selection → crossover →
//! mutation → replacement → repeat, for a fixed number of generations.

use super::config::GaConfig;
use super::operators::{order_crossover, swap_mutation};
use super::selection::tournament;
use super::types::{Population, Tour};
use crate::distance::DistanceMatrix;
use crate::error::{TspError, TspResult};
use crate::random::rng_from_seed;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Result of a GA run.
///
/// A degenerate result (no tour could be built) has an empty `tour` and an
/// infinite `distance`; check [`is_degenerate`](Solution::is_degenerate)
/// before using the tour.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Visiting order of the best tour found during the entire run.
    pub tour: Vec<usize>,

    /// Closed length of `tour`.
    pub distance: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best-so-far distance after the initial evaluation and after each
    /// generation. Non-increasing.
    pub history: Vec<f64>,
}

impl Solution {
    fn degenerate() -> Self {
        Self {
            tour: Vec::new(),
            distance: f64::INFINITY,
            generations: 0,
            cancelled: false,
            history: Vec::new(),
        }
    }

    /// `true` when no tour was produced.
    pub fn is_degenerate(&self) -> bool {
        self.tour.is_empty()
    }
}

/// Progress snapshot emitted at the end of every generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,

    /// Best distance seen so far in the run.
    pub best_distance: f64,

    /// Best distance within this generation's population.
    pub generation_best_distance: f64,

    /// Mean distance within this generation's population.
    pub mean_distance: f64,
}

/// Lifecycle of a [`GeneticEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Running,
    Completed,
}

/// Executes the GA on one distance matrix.
///
/// The engine owns its matrix, configuration and random source. It runs
/// exactly once: a second [`solve`](GeneticEngine::solve) returns
/// [`TspError::AlreadySolved`].
///
/// # Usage
///
/// ```
/// use u_tspga::distance::DistanceMatrix;
/// use u_tspga::ga::{EngineState, GaConfig, GeneticEngine};
///
/// let matrix = DistanceMatrix::from_rows(&[
///     vec![0.0, 2.0, 9.0],
///     vec![2.0, 0.0, 6.0],
///     vec![9.0, 6.0, 0.0],
/// ])
/// .unwrap();
///
/// let mut engine = GeneticEngine::new(matrix, GaConfig::new(10, 0.2, 5).with_seed(1)).unwrap();
/// let solution = engine.solve().unwrap();
///
/// assert_eq!(solution.distance, 17.0);
/// assert_eq!(engine.state(), EngineState::Completed);
/// ```
#[derive(Debug)]
pub struct GeneticEngine {
    matrix: DistanceMatrix,
    config: GaConfig,
    rng: StdRng,
    state: EngineState,
    solution: Option<Solution>,
}

impl GeneticEngine {
    /// Binds a validated configuration to a distance matrix.
    ///
    /// # Errors
    /// [`TspError::InvalidConfiguration`] if the configuration is invalid or
    /// the matrix has fewer than two locations.
    pub fn new(matrix: DistanceMatrix, config: GaConfig) -> TspResult<Self> {
        config.validate()?;
        if matrix.location_count() < 2 {
            return Err(TspError::invalid(format!(
                "distance matrix must have at least 2 locations, got {}",
                matrix.location_count()
            )));
        }

        let rng = rng_from_seed(config.seed);
        Ok(Self {
            matrix,
            config,
            rng,
            state: EngineState::Uninitialized,
            solution: None,
        })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The final result once the engine has completed.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Runs the GA to completion.
    pub fn solve(&mut self) -> TspResult<Solution> {
        self.solve_with_observer(None, |_| {})
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If the flag is set, the run stops at the next generation boundary and
    /// returns the best tour found so far. A generation in progress is always
    /// finished first.
    pub fn solve_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> TspResult<Solution> {
        self.solve_with_observer(cancel, |_| {})
    }

    /// Runs the GA, calling `observer` at the end of every generation.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            locations = self.matrix.location_count(),
            population = self.config.population_size,
            generations = self.config.num_generations,
        )
    )]
    pub fn solve_with_observer<F>(
        &mut self,
        cancel: Option<Arc<AtomicBool>>,
        mut observer: F,
    ) -> TspResult<Solution>
    where
        F: FnMut(&GenerationStats),
    {
        if self.state != EngineState::Uninitialized {
            return Err(TspError::AlreadySolved);
        }
        self.state = EngineState::Running;

        let n = self.matrix.location_count();
        let pop_size = self.config.population_size;
        let elite_size = self.config.elite_size;
        info!(seed = ?self.config.seed, "starting GA run");

        // 1. Initialize and evaluate
        let mut population = Population::random(pop_size, n, &mut self.rng);
        population.evaluate(&self.matrix, self.config.parallel);

        // 2. Track best
        let mut ranked = population.ranked();
        let mut best: Option<Tour> = ranked.first().map(|&i| population[i].clone());
        let mut best_distance = best.as_ref().map_or(f64::INFINITY, Tour::distance);

        let mut history = vec![best_distance];

        let mut generations = 0usize;
        let mut cancelled = false;

        // 3. Generational loop
        for gen in 0..self.config.num_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Elitism, from the ranked view of the current generation
            let mut next: Vec<Tour> = Vec::with_capacity(pop_size);
            next.extend(ranked.iter().take(elite_size).map(|&i| population[i].clone()));

            // Breed remainder
            while next.len() < pop_size {
                let p1 = tournament(population.tours(), self.config.tournament_size, &mut self.rng);
                let p2 = tournament(population.tours(), self.config.tournament_size, &mut self.rng);

                let mut child =
                    order_crossover(population[p1].order(), population[p2].order(), &mut self.rng);
                if self.rng.random_range(0.0..1.0) < self.config.mutation_rate {
                    swap_mutation(&mut child, &mut self.rng);
                }
                next.push(Tour::unevaluated(child));
            }

            // Replace and evaluate offspring (elites are already evaluated)
            population = Population::from_tours(next);
            population.evaluate(&self.matrix, self.config.parallel);
            ranked = population.ranked();
            generations = gen + 1;

            let gen_best = &population[ranked[0]];
            if gen_best.distance() < best_distance {
                best_distance = gen_best.distance();
                best = Some(gen_best.clone());
                debug!(generation = generations, best_distance, "new best tour");
            }
            history.push(best_distance);

            observer(&GenerationStats {
                generation: generations,
                best_distance,
                generation_best_distance: gen_best.distance(),
                mean_distance: population.mean_distance(),
            });
        }

        let solution = match best {
            Some(tour) => Solution {
                distance: tour.distance(),
                tour: tour.into_order(),
                generations,
                cancelled,
                history,
            },
            None => Solution::degenerate(),
        };

        info!(
            best_distance = solution.distance,
            generations = solution.generations,
            cancelled = solution.cancelled,
            "GA run finished"
        );

        self.state = EngineState::Completed;
        self.solution = Some(solution.clone());
        Ok(solution)
    }
}

/// Builds an engine with `elite_size = 1` and `tournament_size = 3` and
/// runs it once.
///
/// # Errors
/// [`TspError::InvalidConfiguration`] for invalid parameters, including
/// `population_size < 3` (smaller than the default tournament).
pub fn solve_tsp(
    matrix: DistanceMatrix,
    population_size: usize,
    mutation_rate: f64,
    num_generations: usize,
) -> TspResult<Solution> {
    let config = GaConfig::new(population_size, mutation_rate, num_generations);
    GeneticEngine::new(matrix, config)?.solve()
}

// ============================================================================
// Tests
// ============================================================================
