//! Genetic algorithm for the symmetric TSP.
//!
//! Each generation the engine ranks the population by fitness
//! (`1 / (length + ε)`), copies the elites, and breeds the remainder with
//! tournament selection, order crossover and rate-gated swap mutation. The
//! best tour seen over the whole run is returned, not just the final
//! generation's best.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population, generations, rates)
//! - [`GeneticEngine`]: Executes the generational loop once
//! - [`Solution`]: Best tour, its length, and the convergence history
//! - [`Tour`], [`Population`]: Candidate solutions
//!
//! # Submodules
//!
//! - [`operators`]: Order crossover (OX1) and swap mutation
//! - [`selection`]: Tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod config;
pub mod operators;
mod runner;
pub mod selection;
mod types;
mod worker;

pub use config::GaConfig;
pub use runner::{solve_tsp, EngineState, GenerationStats, GeneticEngine, Solution};
pub use types::{fitness_from_distance, Population, Tour, FITNESS_EPSILON};
pub use worker::{spawn_solver, SolverHandle};
