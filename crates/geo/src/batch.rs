//! Batch distance calculations with optional parallelism.
//!
//! Results always line up index-for-index with the input slice, so callers can
//! zip them back onto their own records and keep a stable order.

use crate::{haversine_distance_meters, Coordinate};

/// Calculate the distance in meters from `origin` to every target.
///
/// # Example
/// ```
/// use summit_geo::{distances_from, Coordinate};
///
/// let origin = Coordinate::new(49.1794, 20.0880);
/// let targets = [
///     Coordinate::new(49.1795, 20.0881), // Rysy
///     Coordinate::new(50.7361, 15.7400), // Śnieżka
/// ];
///
/// let distances = distances_from(&origin, &targets);
/// assert_eq!(distances.len(), 2);
/// assert!(distances[0] < distances[1]);
/// ```
pub fn distances_from(origin: &Coordinate, targets: &[Coordinate]) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        targets
            .par_iter()
            .map(|target| haversine_distance_meters(origin, target))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        targets
            .iter()
            .map(|target| haversine_distance_meters(origin, target))
            .collect()
    }
}

/// Distances from `origin` to every target, keeping only those within
/// `radius_m` (inclusive). Returns `(index, distance)` pairs in input order.
pub fn within_radius(origin: &Coordinate, targets: &[Coordinate], radius_m: f64) -> Vec<(usize, f64)> {
    distances_from(origin, targets)
        .into_iter()
        .enumerate()
        .filter(|&(_, distance)| distance <= radius_m)
        .collect()
}
