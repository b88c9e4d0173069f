use crate::error::{TspError, TspResult};
use rand::Rng;
use std::fmt;

/// A location in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Symmetric pairwise distances between `n ≥ 2` locations.
///
/// Stored row-major in a flat buffer. Invariants, established by every
/// constructor and never broken afterwards:
///
/// - `distance(i, j) == distance(j, i)`
/// - `distance(i, i) == 0.0`
/// - all entries finite and non-negative
///
/// # Examples
///
/// ```
/// use u_tspga::distance::DistanceMatrix;
///
/// let m = DistanceMatrix::from_rows(&[
///     vec![0.0, 3.0, 4.0],
///     vec![3.0, 0.0, 5.0],
///     vec![4.0, 5.0, 0.0],
/// ])
/// .unwrap();
///
/// assert_eq!(m.location_count(), 3);
/// assert_eq!(m.distance(2, 1), 5.0);
/// assert_eq!(m.tour_length(&[0, 1, 2]), 12.0);
/// assert!(m.coordinates().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDistanceMatrix"))]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
    coordinates: Option<Vec<Point>>,
}

impl DistanceMatrix {
    /// Draws `num_locations` integer points uniformly from `[0, coord_max]²`
    /// and derives Euclidean distances.
    ///
    /// # Errors
    /// [`TspError::InvalidConfiguration`] if `num_locations < 2`.
    pub fn generate_from_coordinates<R: Rng>(
        num_locations: usize,
        coord_max: u32,
        rng: &mut R,
    ) -> TspResult<Self> {
        check_location_count(num_locations)?;

        let points = (0..num_locations)
            .map(|_| {
                let x = rng.random_range(0..=coord_max);
                let y = rng.random_range(0..=coord_max);
                Point::new(f64::from(x), f64::from(y))
            })
            .collect();

        Self::from_coordinates(points)
    }

    /// Draws one integer distance per unordered pair, uniformly from
    /// `[min_distance, max_distance]`.
    ///
    /// No coordinates are produced, so routes from this mode cannot be
    /// plotted.
    ///
    /// # Errors
    /// [`TspError::InvalidConfiguration`] if `num_locations < 2` or
    /// `min_distance > max_distance`.
    pub fn generate_from_random_distances<R: Rng>(
        num_locations: usize,
        min_distance: u32,
        max_distance: u32,
        rng: &mut R,
    ) -> TspResult<Self> {
        check_location_count(num_locations)?;
        if min_distance > max_distance {
            return Err(TspError::invalid(format!(
                "min_distance ({min_distance}) must not exceed max_distance ({max_distance})"
            )));
        }

        let n = num_locations;
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = f64::from(rng.random_range(min_distance..=max_distance));
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        Ok(Self {
            n,
            data,
            coordinates: None,
        })
    }

    /// Builds a Euclidean matrix from explicit points.
    ///
    /// # Errors
    /// [`TspError::InvalidConfiguration`] if fewer than two points are given
    /// or any coordinate is not finite.
    pub fn from_coordinates(points: Vec<Point>) -> TspResult<Self> {
        check_location_count(points.len())?;
        if let Some(idx) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(TspError::invalid(format!(
                "coordinate of location {idx} is not finite"
            )));
        }

        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        check_total_finite(&data)?;

        Ok(Self {
            n,
            data,
            coordinates: Some(points),
        })
    }

    /// Builds a matrix from explicit rows.
    ///
    /// # Errors
    /// [`TspError::InvalidConfiguration`] unless the rows form a square
    /// matrix of at least 2 locations with finite, non-negative, symmetric
    /// entries and a zero diagonal, or if the entries are so large that a
    /// tour length would overflow to infinity.
    pub fn from_rows(rows: &[Vec<f64>]) -> TspResult<Self> {
        let n = rows.len();
        check_location_count(n)?;

        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(TspError::invalid(format!(
                    "row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            for (j, &d) in row.iter().enumerate() {
                if !d.is_finite() || d < 0.0 {
                    return Err(TspError::invalid(format!(
                        "distance ({i}, {j}) must be finite and non-negative, got {d}"
                    )));
                }
            }
            if row[i] != 0.0 {
                return Err(TspError::invalid(format!(
                    "diagonal entry ({i}, {i}) must be zero, got {}",
                    row[i]
                )));
            }
            data.extend_from_slice(row);
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if data[i * n + j] != data[j * n + i] {
                    return Err(TspError::invalid(format!(
                        "matrix is not symmetric at ({i}, {j})"
                    )));
                }
            }
        }
        check_total_finite(&data)?;

        Ok(Self {
            n,
            data,
            coordinates: None,
        })
    }

    /// Distance between locations `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.row(i)[j]
    }

    /// Distances from location `i` to every location.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Number of locations.
    pub fn location_count(&self) -> usize {
        self.n
    }

    /// The generated coordinates, or `None` when distances were sampled
    /// directly or supplied as rows.
    pub fn coordinates(&self) -> Option<&[Point]> {
        self.coordinates.as_deref()
    }

    /// Length of the closed tour visiting `tour` in order and returning to
    /// its first location.
    ///
    /// Empty and single-location sequences have length zero.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        match (tour.first(), tour.last()) {
            (Some(&first), Some(&last)) => {
                let open: f64 = tour
                    .windows(2)
                    .map(|w| self.distance(w[0], w[1]))
                    .sum();
                open + self.distance(last, first)
            }
            _ => 0.0,
        }
    }

    /// Closed polyline for `tour`, or `None` without coordinates.
    pub fn route(&self, tour: &[usize]) -> Option<Vec<Point>> {
        crate::render::route_polyline(self.coordinates(), tour)
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            let row: Vec<String> = self.row(i).iter().map(|d| format!("{d:.1}")).collect();
            writeln!(f, "[{}]", row.join(", "))?;
        }
        Ok(())
    }
}

fn check_location_count(n: usize) -> TspResult<()> {
    if n < 2 {
        return Err(TspError::invalid(format!(
            "num_locations must be at least 2, got {n}"
        )));
    }
    Ok(())
}

// Every tour length is bounded by the sum of all entries.
fn check_total_finite(data: &[f64]) -> TspResult<()> {
    if !data.iter().sum::<f64>().is_finite() {
        return Err(TspError::invalid(
            "distances are too large: tour lengths would overflow",
        ));
    }
    Ok(())
}

/// Wire form of [`DistanceMatrix`]. Deserialized values are rebuilt through
/// the validating constructors.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDistanceMatrix {
    n: usize,
    data: Vec<f64>,
    coordinates: Option<Vec<Point>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDistanceMatrix> for DistanceMatrix {
    type Error = TspError;

    fn try_from(raw: RawDistanceMatrix) -> TspResult<Self> {
        check_location_count(raw.n)?;
        if raw.n.checked_mul(raw.n) != Some(raw.data.len()) {
            return Err(TspError::invalid(format!(
                "expected {} distances for {} locations, got {}",
                raw.n.saturating_mul(raw.n),
                raw.n,
                raw.data.len()
            )));
        }

        match raw.coordinates {
            Some(points) => {
                if points.len() != raw.n {
                    return Err(TspError::invalid(format!(
                        "expected {} coordinates, got {}",
                        raw.n,
                        points.len()
                    )));
                }
                // distances are derived, not trusted
                Self::from_coordinates(points)
            }
            None => {
                let rows: Vec<Vec<f64>> = raw.data.chunks(raw.n).map(<[f64]>::to_vec).collect();
                Self::from_rows(&rows)
            }
        }
    }
}
