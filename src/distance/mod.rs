//! Distance model.
//!
//! A [`DistanceMatrix`] is an immutable, symmetric, zero-diagonal `n × n`
//! matrix. It is built in exactly one of two random modes, or from explicit
//! data:
//!
//! - [`DistanceMatrix::generate_from_coordinates`]: random integer points in
//!   `[0, coord_max]²`, Euclidean distances. Coordinates are kept for plotting.
//! - [`DistanceMatrix::generate_from_random_distances`]: one random integer
//!   distance per unordered pair. No coordinates exist in this mode.
//! - [`DistanceMatrix::from_rows`] / [`DistanceMatrix::from_coordinates`]:
//!   caller-supplied data, validated.
//!
//! [`MatrixSource`] describes the same choices as data, for parameter-input
//! surfaces.

mod matrix;
mod source;

pub use matrix::{DistanceMatrix, Point};
pub use source::MatrixSource;
