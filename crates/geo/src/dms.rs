//! Degrees-minutes-seconds conversion.
//!
//! EXIF GPS tags store each axis as three rationals (degrees, minutes, seconds)
//! plus a hemisphere reference letter. Only the degrees field carries a sign;
//! minutes and seconds are always added to it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate axis in sexagesimal form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    /// Degrees, carries the sign for the whole value
    pub degrees: f64,
    /// Minutes, conventionally 0..60
    pub minutes: f64,
    /// Seconds, conventionally 0..60
    pub seconds: f64,
}

impl Dms {
    /// Creates a new DMS triple.
    #[inline]
    pub const fn new(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self { degrees, minutes, seconds }
    }

    /// Converts to decimal degrees.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        dms_to_decimal(self.degrees, self.minutes, self.seconds)
    }

    /// Splits decimal degrees into a DMS triple.
    #[inline]
    pub fn from_decimal(decimal: f64) -> Self {
        decimal_to_dms(decimal)
    }

    /// Converts to decimal degrees, applying an EXIF hemisphere reference.
    ///
    /// `S` and `W` yield a negative value, anything else a positive one. The
    /// magnitude is taken from the triple, so an already-negative reading with
    /// an `S` reference is not flipped back.
    pub fn to_decimal_with_ref(&self, reference: char) -> f64 {
        let magnitude = dms_to_decimal(self.degrees.abs(), self.minutes, self.seconds);
        match reference.to_ascii_uppercase() {
            'S' | 'W' => -magnitude,
            _ => magnitude,
        }
    }
}

impl From<(f64, f64, f64)> for Dms {
    fn from((degrees, minutes, seconds): (f64, f64, f64)) -> Self {
        Self::new(degrees, minutes, seconds)
    }
}

impl From<Dms> for (f64, f64, f64) {
    fn from(dms: Dms) -> Self {
        (dms.degrees, dms.minutes, dms.seconds)
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{}'{:.2}\"", self.degrees, self.minutes, self.seconds)
    }
}

/// Converts degrees, minutes and seconds to decimal degrees.
///
/// No range validation is performed. The sign lives on `degrees` only;
/// minutes and seconds are added as-is.
///
/// # Example
/// ```
/// use summit_geo::dms_to_decimal;
///
/// assert!((dms_to_decimal(49.0, 12.0, 4.84) - 49.201344).abs() < 1e-6);
/// ```
#[inline]
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Converts decimal degrees to a DMS triple.
///
/// Degrees and minutes are whole numbers, seconds keep the fraction. The sign
/// of the input is re-applied to degrees only.
pub fn decimal_to_dms(decimal: f64) -> Dms {
    let sign = if decimal < 0.0 { -1.0 } else { 1.0 };
    let absolute = decimal.abs();

    let degrees = absolute.trunc();
    let minutes_full = (absolute - degrees) * 60.0;
    let minutes = minutes_full.trunc();
    let seconds = (minutes_full - minutes) * 60.0;

    Dms::new(sign * degrees, minutes, seconds)
}
