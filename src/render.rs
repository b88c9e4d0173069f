//! Route geometry for plotting surfaces.
//!
//! The solver does not draw anything. A consumer that plots the final route
//! asks for the closed polyline here and skips the overlay when it is absent
//! (random-distance matrices have no coordinates).

use crate::distance::Point;

/// Closed polyline visiting `tour` in order and returning to the start.
///
/// Returns `None` when `coordinates` is `None`, the tour is empty, or the
/// tour references a location without a coordinate.
///
/// # Examples
///
/// ```
/// use u_tspga::distance::Point;
/// use u_tspga::render::route_polyline;
///
/// let coords = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
/// let line = route_polyline(Some(&coords), &[0, 2, 1]).unwrap();
/// assert_eq!(line.len(), 4);
/// assert_eq!(line.first(), line.last());
///
/// assert!(route_polyline(None, &[0, 2, 1]).is_none());
/// ```
pub fn route_polyline(coordinates: Option<&[Point]>, tour: &[usize]) -> Option<Vec<Point>> {
    let coordinates = coordinates?;
    let first = *tour.first()?;

    let mut line = tour
        .iter()
        .map(|&idx| coordinates.get(idx).copied())
        .collect::<Option<Vec<Point>>>()?;
    line.push(*coordinates.get(first)?);
    Some(line)
}
