use super::DistanceMatrix;
use crate::error::{TspError, TspResult};
use crate::random::rng_from_seed;
use rand::Rng;
use std::path::PathBuf;

/// Where a [`DistanceMatrix`] comes from.
///
/// This is the shape a parameter-input surface fills in before calling
/// [`build`](MatrixSource::build). Defaults match the original input form:
/// 10 locations with random distances in `[50, 2000]`.
///
/// # Examples
///
/// ```
/// use u_tspga::distance::MatrixSource;
/// use u_tspga::TspError;
///
/// let source = MatrixSource::Coordinates { num_locations: 6, coord_max: 100 };
/// let matrix = source.build_seeded(Some(1)).unwrap();
/// assert!(matrix.coordinates().is_some());
///
/// let err = MatrixSource::File("cities.csv".into()).build_seeded(None).unwrap_err();
/// assert!(matches!(err, TspError::UnsupportedInput { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatrixSource {
    /// Random integer coordinates in `[0, coord_max]²`, Euclidean distances.
    Coordinates { num_locations: usize, coord_max: u32 },

    /// Random integer distances in `[min_distance, max_distance]`.
    RandomDistances {
        num_locations: usize,
        min_distance: u32,
        max_distance: u32,
    },

    /// A matrix file uploaded by the user. Loading is not implemented.
    File(PathBuf),
}

impl Default for MatrixSource {
    fn default() -> Self {
        MatrixSource::RandomDistances {
            num_locations: 10,
            min_distance: 50,
            max_distance: 2000,
        }
    }
}

impl MatrixSource {
    /// Builds the matrix using `rng` for the random modes.
    ///
    /// # Errors
    /// - [`TspError::InvalidConfiguration`] for out-of-range parameters.
    /// - [`TspError::UnsupportedInput`] for [`MatrixSource::File`].
    pub fn build<R: Rng>(&self, rng: &mut R) -> TspResult<DistanceMatrix> {
        match self {
            MatrixSource::Coordinates {
                num_locations,
                coord_max,
            } => DistanceMatrix::generate_from_coordinates(*num_locations, *coord_max, rng),
            MatrixSource::RandomDistances {
                num_locations,
                min_distance,
                max_distance,
            } => DistanceMatrix::generate_from_random_distances(
                *num_locations,
                *min_distance,
                *max_distance,
                rng,
            ),
            MatrixSource::File(path) => Err(TspError::unsupported(format!(
                "loading a distance matrix from file '{}' is not implemented",
                path.display()
            ))),
        }
    }

    /// Builds the matrix with a fresh random source seeded from `seed`.
    pub fn build_seeded(&self, seed: Option<u64>) -> TspResult<DistanceMatrix> {
        self.build(&mut rng_from_seed(seed))
    }

    /// Number of locations the source describes, when known up front.
    pub fn location_count(&self) -> Option<usize> {
        match self {
            MatrixSource::Coordinates { num_locations, .. }
            | MatrixSource::RandomDistances { num_locations, .. } => Some(*num_locations),
            MatrixSource::File(_) => None,
        }
    }
}
