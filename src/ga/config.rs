//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use crate::error::{TspError, TspResult};

/// Configuration for the genetic engine.
///
/// # Defaults
///
/// ```
/// use u_tspga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.num_generations, 200);
/// assert_eq!(config.elite_size, 1);
/// assert_eq!(config.tournament_size, 3);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tspga::ga::GaConfig;
///
/// let config = GaConfig::new(200, 0.05, 500)
///     .with_elite_size(4)
///     .with_tournament_size(5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of tours in every generation.
    pub population_size: usize,

    /// Number of generations to run. There is no early termination.
    pub num_generations: usize,

    /// Probability that an offspring receives a swap mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of best tours copied unchanged into the next generation.
    ///
    /// With at least one elite, the best tour of a generation can never be
    /// lost.
    pub elite_size: usize,

    /// Candidates drawn (with replacement) per parent selection.
    ///
    /// - 2: light pressure
    /// - 3–5: moderate pressure (typical default)
    /// - larger: strong pressure, risk of premature convergence
    pub tournament_size: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to evaluate tours in parallel using rayon.
    ///
    /// Only honoured with the `parallel` feature; results are identical
    /// either way.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            num_generations: 200,
            mutation_rate: 0.1,
            elite_size: 1,
            tournament_size: 3,
            seed: None,
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl GaConfig {
    /// Creates a configuration with the three mandatory parameters;
    /// `elite_size = 1` and `tournament_size = 3`.
    pub fn new(population_size: usize, mutation_rate: f64, num_generations: usize) -> Self {
        Self {
            population_size,
            mutation_rate,
            num_generations,
            ..Self::default()
        }
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_num_generations(mut self, n: usize) -> Self {
        self.num_generations = n;
        self
    }

    /// Sets the mutation rate. Not clamped: out-of-range values are
    /// rejected by [`validate`](GaConfig::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`TspError::InvalidConfiguration`] describing the first violated
    /// constraint.
    pub fn validate(&self) -> TspResult<()> {
        if self.population_size == 0 {
            return Err(TspError::invalid("population_size must be at least 1"));
        }
        if self.num_generations == 0 {
            return Err(TspError::invalid("num_generations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::invalid(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.elite_size >= self.population_size {
            return Err(TspError::invalid(format!(
                "elite_size ({}) must be less than population_size ({})",
                self.elite_size, self.population_size
            )));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(TspError::invalid(format!(
                "tournament_size must be within [1, {}], got {}",
                self.population_size, self.tournament_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.num_generations, 200);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert_eq!(config.elite_size, 1);
        assert_eq!(config.tournament_size, 3);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_fills_defaults() {
        let config = GaConfig::new(20, 0.3, 50);
        assert_eq!(config.population_size, 20);
        assert_eq!(config.num_generations, 50);
        assert!((config.mutation_rate - 0.3).abs() < 1e-10);
        assert_eq!(config.elite_size, 1);
        assert_eq!(config.tournament_size, 3);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_num_generations(1000)
            .with_mutation_rate(0.05)
            .with_elite_size(10)
            .with_tournament_size(5)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.num_generations, 1000);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.elite_size, 10);
        assert_eq!(config.tournament_size, 5);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_population_zero() {
        let config = GaConfig::default()
            .with_population_size(0)
            .with_elite_size(0);
        assert!(config.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_validate_single_individual() {
        let config = GaConfig::new(1, 0.1, 10)
            .with_elite_size(0)
            .with_tournament_size(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_num_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_elite_fills_population() {
        let config = GaConfig::new(10, 0.1, 10).with_elite_size(10);
        assert!(config.validate().is_err());
        let config = GaConfig::new(10, 0.1, 10).with_elite_size(9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_mutation_rate_range() {
        assert!(GaConfig::default().with_mutation_rate(-0.1).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(1.5).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(f64::NAN).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(0.0).validate().is_ok());
        assert!(GaConfig::default().with_mutation_rate(1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_tournament_size_range() {
        let config = GaConfig::new(5, 0.1, 10);
        assert!(config.clone().with_tournament_size(0).validate().is_err());
        assert!(config.clone().with_tournament_size(6).validate().is_err());
        assert!(config.with_tournament_size(5).validate().is_ok());
    }
}
