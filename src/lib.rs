//! Genetic-algorithm solver for the symmetric Traveling Salesman Problem.
//!
//! The crate is an approximation engine: it trades optimality for tractable
//! running time on instances too large for brute force.
//!
//! - **Distance model** ([`distance`]): symmetric distance matrices built from
//!   random Euclidean coordinates, random bounded pairwise distances, or
//!   explicit rows.
//! - **Genetic algorithm** ([`ga`]): tournament selection, order crossover
//!   (OX1), rate-gated swap mutation, elitism and generational replacement,
//!   tracking the best tour seen over the whole run.
//! - **Rendering contract** ([`render`]): closed route polylines for
//!   plotting surfaces, absent when the matrix has no coordinates.
//!
//! # Example
//!
//! ```
//! use u_tspga::distance::DistanceMatrix;
//! use u_tspga::ga::{GaConfig, GeneticEngine};
//! use u_tspga::random::create_rng;
//!
//! let mut rng = create_rng(7);
//! let matrix = DistanceMatrix::generate_from_coordinates(12, 100, &mut rng).unwrap();
//!
//! let config = GaConfig::new(60, 0.1, 100).with_seed(42);
//! let mut engine = GeneticEngine::new(matrix, config).unwrap();
//! let solution = engine.solve().unwrap();
//!
//! assert_eq!(solution.tour.len(), 12);
//! assert!(solution.distance.is_finite());
//! ```

pub mod distance;
mod error;
pub mod ga;
pub mod random;
pub mod render;

pub use error::{TspError, TspResult};
