//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. The Earth is treated as a
//! sphere, so results carry up to ~0.5% error versus an ellipsoid.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// # Example
/// ```
/// use summit_geo::{haversine_distance, Coordinate};
///
/// let rysy = Coordinate::new(49.1795, 20.0881);
/// let sniezka = Coordinate::new(50.7361, 15.7400);
///
/// let distance = haversine_distance(&rysy, &sniezka);
/// assert!(distance > 300.0 && distance < 400.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two coordinates in meters.
///
/// Symmetric, non-negative, and exactly zero for identical coordinates.
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair past 1.0 for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    radius * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EVEREST: Coordinate = Coordinate { latitude: 27.9881, longitude: 86.9250 };
    const K2: Coordinate = Coordinate { latitude: 35.8825, longitude: 76.5133 };
    const RYSY: Coordinate = Coordinate { latitude: 49.1795, longitude: 20.0881 };
    const NEAR_RYSY: Coordinate = Coordinate { latitude: 49.1794, longitude: 20.0880 };

    #[test]
    fn test_everest_to_k2() {
        let distance = haversine_distance_meters(&EVEREST, &K2);
        assert!(distance > 1_250_000.0 && distance < 1_350_000.0, "Everest-K2: {}", distance);
    }

    #[test]
    fn test_short_distance_near_rysy() {
        let distance = haversine_distance_meters(&RYSY, &NEAR_RYSY);
        // ~13 m
        assert!(distance > 5.0 && distance < 20.0, "near Rysy: {}", distance);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert_eq!(haversine_distance_meters(&RYSY, &RYSY), 0.0);
    }

    #[test]
    fn test_antipodal_points_are_stable() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let distance = haversine_distance_meters(&a, &b);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_M;
        assert!(distance.is_finite());
        assert!((distance - half_circumference).abs() < 1.0);
    }

    #[test]
    fn test_meters_conversion() {
        let km = haversine_distance(&EVEREST, &K2);
        let meters = haversine_distance_meters(&EVEREST, &K2);
        assert!((meters - km * 1000.0).abs() < 1.0);
    }

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(Coordinate::from)
    }

    proptest! {
        #[test]
        fn prop_symmetric(a in coordinate(), b in coordinate()) {
            let forward = haversine_distance_meters(&a, &b);
            let backward = haversine_distance_meters(&b, &a);
            prop_assert!((forward - backward).abs() < 1e-6, "{} vs {}", forward, backward);
        }

        #[test]
        fn prop_non_negative(a in coordinate(), b in coordinate()) {
            let d = haversine_distance_meters(&a, &b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_M + 1.0);
        }

        #[test]
        fn prop_self_distance_zero(a in coordinate()) {
            prop_assert_eq!(haversine_distance_meters(&a, &a), 0.0);
        }
    }
}
