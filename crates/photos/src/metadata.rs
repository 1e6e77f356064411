//! Photo metadata as the location workflow sees it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use summit_geo::Dms;

/// One GPS axis as delivered by a camera or a client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GpsReading {
    /// Already in signed decimal degrees
    Decimal(f64),
    /// EXIF-style sexagesimal triple with an optional hemisphere letter
    Dms {
        /// The degrees-minutes-seconds triple
        dms: Dms,
        /// `N`/`S`/`E`/`W`; when absent the sign of `dms.degrees` is used
        #[serde(default)]
        reference: Option<char>,
    },
}

impl GpsReading {
    /// A DMS reading with a hemisphere reference.
    pub fn dms(degrees: f64, minutes: f64, seconds: f64, reference: char) -> Self {
        GpsReading::Dms {
            dms: Dms::new(degrees, minutes, seconds),
            reference: Some(reference),
        }
    }

    /// Signed decimal degrees.
    pub fn to_decimal(&self) -> f64 {
        match self {
            GpsReading::Decimal(value) => *value,
            GpsReading::Dms { dms, reference: Some(r) } => dms.to_decimal_with_ref(*r),
            GpsReading::Dms { dms, reference: None } => dms.to_decimal(),
        }
    }
}

impl From<f64> for GpsReading {
    fn from(value: f64) -> Self {
        GpsReading::Decimal(value)
    }
}

impl From<Dms> for GpsReading {
    fn from(dms: Dms) -> Self {
        GpsReading::Dms { dms, reference: None }
    }
}

/// Capture time and position of a photo. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoMetadata {
    /// When the shutter fired, in camera-local time
    pub captured_at: Option<NaiveDateTime>,
    /// Latitude reading
    pub gps_latitude: Option<GpsReading>,
    /// Longitude reading
    pub gps_longitude: Option<GpsReading>,
    /// Altitude in meters above sea level
    pub gps_altitude: Option<f64>,
}

impl PhotoMetadata {
    /// Metadata with nothing known.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when both GPS axes are present.
    pub fn has_location(&self) -> bool {
        self.gps_latitude.is_some() && self.gps_longitude.is_some()
    }
}

/// Reads metadata from a stored photo.
///
/// Implementations never fail: unreadable files or files without metadata
/// produce [`PhotoMetadata::empty`].
pub trait MetadataExtractor {
    /// Extract whatever is available from the file at `path`.
    fn extract(&self, path: &Path) -> PhotoMetadata;
}

/// Parses an EXIF timestamp (`2024:07:14 09:41:07`).
///
/// The dashed ISO-like variant some tools write is accepted too.
pub fn parse_exif_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim().trim_matches('"').trim_end_matches('\0');
    ["%Y:%m:%d %H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_reading_to_decimal() {
        assert_eq!(GpsReading::Decimal(-20.5).to_decimal(), -20.5);
        assert!((GpsReading::dms(49.0, 12.0, 4.84, 'N').to_decimal() - 49.201344).abs() < 1e-6);
        assert!((GpsReading::dms(49.0, 12.0, 4.84, 'S').to_decimal() + 49.201344).abs() < 1e-6);
        assert!((GpsReading::from(Dms::new(49.0, 12.0, 4.84)).to_decimal() - 49.201344).abs() < 1e-6);
    }

    #[test]
    fn test_reading_serde_untagged() {
        let decimal: GpsReading = serde_json::from_str("49.1794").unwrap();
        assert_eq!(decimal, GpsReading::Decimal(49.1794));

        let dms: GpsReading = serde_json::from_str(
            r#"{"dms": {"degrees": 20.0, "minutes": 5.0, "seconds": 16.8}, "reference": "E"}"#,
        )
        .unwrap();
        assert!(matches!(dms, GpsReading::Dms { reference: Some('E'), .. }));
    }

    #[test]
    fn test_has_location() {
        let mut metadata = PhotoMetadata::empty();
        assert!(!metadata.has_location());
        metadata.gps_latitude = Some(49.1794.into());
        assert!(!metadata.has_location());
        metadata.gps_longitude = Some(20.0880.into());
        assert!(metadata.has_location());
    }

    #[test]
    fn test_parse_exif_datetime() {
        let parsed = parse_exif_datetime("2024:07:14 09:41:07").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2024, 7, 14));
        assert_eq!((parsed.hour(), parsed.minute(), parsed.second()), (9, 41, 7));

        assert!(parse_exif_datetime("2024-07-14 09:41:07").is_some());
        assert!(parse_exif_datetime("\"2024:07:14 09:41:07\"").is_some());
        assert!(parse_exif_datetime("yesterday").is_none());
        assert!(parse_exif_datetime("0000:00:00 00:00:00").is_none());
    }
}
