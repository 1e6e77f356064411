//! Geospatial primitives for matching summit photos to peaks.
//!
//! This crate provides:
//! - Haversine (great-circle) distance on a spherical Earth
//! - Degrees-minutes-seconds conversion for EXIF GPS readings
//! - Coordinate validation
//! - Batch distance calculation with optional parallelism
//!
//! # Example
//!
//! ```
//! use summit_geo::{haversine_distance_meters, Coordinate};
//!
//! let everest = Coordinate::new(27.9881, 86.9250);
//! let k2 = Coordinate::new(35.8825, 76.5133);
//!
//! let distance_m = haversine_distance_meters(&everest, &k2);
//! assert!(distance_m > 1_250_000.0 && distance_m < 1_350_000.0);
//! ```

mod dms;
mod error;
mod haversine;
pub mod batch;

pub use batch::{distances_from, within_radius};
pub use dms::{decimal_to_dms, dms_to_decimal, Dms};
pub use error::{validate_distance, GeoError, GeoErrorCode, Result};
pub use haversine::{haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M};

/// Minimum valid latitude in degrees.
pub const LATITUDE_MIN: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const LATITUDE_MAX: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const LONGITUDE_MIN: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const LONGITUDE_MAX: f64 = 180.0;

/// A geographic coordinate with latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// No validation happens here; use [`Coordinate::validate`] at input boundaries.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Builds a coordinate from two DMS readings (latitude first).
    pub fn from_dms(latitude: Dms, longitude: Dms) -> Self {
        Self::new(latitude.to_decimal(), longitude.to_decimal())
    }

    /// Returns true if both axes are finite and within range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (LATITUDE_MIN..=LATITUDE_MAX).contains(&self.latitude)
            && (LONGITUDE_MIN..=LONGITUDE_MAX).contains(&self.longitude)
    }

    /// Checks the coordinate, reporting which axis is out of range.
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(LATITUDE_MIN..=LATITUDE_MAX).contains(&self.latitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "latitude {} is outside [{}, {}]",
                self.latitude, LATITUDE_MIN, LATITUDE_MAX
            )));
        }
        if !self.longitude.is_finite()
            || !(LONGITUDE_MIN..=LONGITUDE_MAX).contains(&self.longitude)
        {
            return Err(GeoError::InvalidCoordinate(format!(
                "longitude {} is outside [{}, {}]",
                self.longitude, LONGITUDE_MIN, LONGITUDE_MAX
            )));
        }
        Ok(())
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}
