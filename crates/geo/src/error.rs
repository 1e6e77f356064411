//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude or longitude is not finite or out of range
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A distance threshold is negative or not finite
    #[error("Invalid distance: {0}")]
    InvalidDistance(String),
}

/// Error code for integration with summit-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10001,
    /// Invalid distance threshold
    InvalidDistance = 10002,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::InvalidDistance(_) => GeoErrorCode::InvalidDistance,
        }
    }
}

/// Checks that a distance threshold in meters is usable for filtering.
pub fn validate_distance(meters: f64) -> Result<()> {
    if meters.is_finite() && meters >= 0.0 {
        Ok(())
    } else {
        Err(GeoError::InvalidDistance(format!(
            "{meters} must be a finite, non-negative number of meters"
        )))
    }
}
