//! Associates a photo with the summit it was taken on.

use crate::metadata::{MetadataExtractor, PhotoMetadata};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use summit_geo::Coordinate;
use summit_peaks::{MatchResult, PeakCatalog, PeakMatcher};
use tracing::{debug, info};

/// Radius within which a photo counts as taken on a summit.
pub const DEFAULT_MATCH_DISTANCE_M: f64 = 1000.0;

/// Where and when a photo was taken, and which summit it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoLocation {
    pub captured_at: Option<NaiveDateTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    /// Matched summit, when one lies within the match radius
    pub peak_id: Option<i64>,
    pub peak_name: Option<String>,
    /// Meters from the photo position to the matched summit
    pub distance_to_peak: Option<f64>,
}

impl PhotoLocation {
    /// True when a summit was matched.
    pub fn is_on_summit(&self) -> bool {
        self.peak_id.is_some()
    }
}

/// Turns photo metadata into a [`PhotoLocation`].
#[derive(Debug, Clone)]
pub struct PhotoLocator<C> {
    matcher: PeakMatcher<C>,
    match_distance_m: f64,
}

impl<C: PeakCatalog> PhotoLocator<C> {
    /// Locator using [`DEFAULT_MATCH_DISTANCE_M`].
    pub fn new(matcher: PeakMatcher<C>) -> Self {
        Self::with_match_distance(matcher, DEFAULT_MATCH_DISTANCE_M)
    }

    pub fn with_match_distance(matcher: PeakMatcher<C>, match_distance_m: f64) -> Self {
        Self { matcher, match_distance_m }
    }

    pub fn matcher(&self) -> &PeakMatcher<C> {
        &self.matcher
    }

    pub fn match_distance_m(&self) -> f64 {
        self.match_distance_m
    }

    /// Resolve position and summit for already extracted metadata.
    ///
    /// Metadata without both GPS axes yields a location with no summit and
    /// never touches the catalog.
    ///
    /// # Errors
    ///
    /// Readings outside the valid coordinate range are rejected as invalid
    /// input; catalog failures propagate.
    pub fn locate(&self, metadata: &PhotoMetadata) -> MatchResult<PhotoLocation, C> {
        let mut location = PhotoLocation {
            captured_at: metadata.captured_at,
            altitude: metadata.gps_altitude,
            ..PhotoLocation::default()
        };

        let (Some(lat), Some(lon)) = (metadata.gps_latitude, metadata.gps_longitude) else {
            debug!("photo has no GPS position");
            return Ok(location);
        };

        let point = Coordinate::new(lat.to_decimal(), lon.to_decimal());
        location.latitude = Some(point.latitude);
        location.longitude = Some(point.longitude);

        if let Some(found) = self.matcher.find_nearest(point, Some(self.match_distance_m))? {
            info!(%point, peak = %found.peak.name, distance_m = found.distance, "photo matched to summit");
            location.peak_id = Some(found.peak.id);
            location.peak_name = Some(found.peak.name);
            location.distance_to_peak = Some(found.distance);
        }

        Ok(location)
    }

    /// Extract metadata from `path` and locate it.
    pub fn locate_file<E: MetadataExtractor + ?Sized>(
        &self,
        extractor: &E,
        path: &Path,
    ) -> MatchResult<PhotoLocation, C> {
        let metadata = extractor.extract(path);
        debug!(path = %path.display(), has_location = metadata.has_location(), "extracted photo metadata");
        self.locate(&metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::GpsReading;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use summit_peaks::{seed_catalog, InMemoryCatalog, MatchError};

    struct FakeExtractor {
        by_path: HashMap<PathBuf, PhotoMetadata>,
        calls: Cell<usize>,
    }

    impl FakeExtractor {
        fn new(entries: Vec<(&str, PhotoMetadata)>) -> Self {
            Self {
                by_path: entries.into_iter().map(|(p, m)| (PathBuf::from(p), m)).collect(),
                calls: Cell::new(0),
            }
        }
    }

    impl MetadataExtractor for FakeExtractor {
        fn extract(&self, path: &Path) -> PhotoMetadata {
            self.calls.set(self.calls.get() + 1);
            self.by_path.get(path).cloned().unwrap_or_default()
        }
    }

    fn locator() -> PhotoLocator<InMemoryCatalog> {
        PhotoLocator::new(PeakMatcher::new(seed_catalog()))
    }

    fn at(lat: impl Into<GpsReading>, lon: impl Into<GpsReading>) -> PhotoMetadata {
        PhotoMetadata {
            gps_latitude: Some(lat.into()),
            gps_longitude: Some(lon.into()),
            ..PhotoMetadata::default()
        }
    }

    #[test]
    fn test_photo_on_rysy_is_matched() {
        let mut metadata = at(49.1794, 20.0880);
        metadata.gps_altitude = Some(2495.0);

        let location = locator().locate(&metadata).unwrap();
        assert!(location.is_on_summit());
        assert_eq!(location.peak_id, Some(1));
        assert_eq!(location.peak_name.as_deref(), Some("Rysy"));
        assert!(location.distance_to_peak.unwrap() < 20.0);
        assert_eq!(location.altitude, Some(2495.0));
    }

    #[test]
    fn test_dms_readings_with_reference() {
        let metadata = at(
            GpsReading::dms(49.0, 10.0, 45.84, 'N'),
            GpsReading::dms(20.0, 5.0, 16.8, 'E'),
        );

        let location = locator().locate(&metadata).unwrap();
        assert_eq!(location.peak_id, Some(1));
        assert!((location.latitude.unwrap() - 49.1794).abs() < 1e-4);
    }

    #[test]
    fn test_photo_off_summit_keeps_position() {
        // Giewont: in the Tatras, but kilometers from Rysy
        let location = locator().locate(&at(49.2522, 19.9344)).unwrap();
        assert!(!location.is_on_summit());
        assert_eq!(location.latitude, Some(49.2522));
        assert!(location.distance_to_peak.is_none());
    }

    #[test]
    fn test_wider_match_radius() {
        let wide = PhotoLocator::with_match_distance(PeakMatcher::new(seed_catalog()), 20_000.0);
        let location = wide.locate(&at(49.2522, 19.9344)).unwrap();
        assert_eq!(location.peak_name.as_deref(), Some("Rysy"));
    }

    #[test]
    fn test_missing_gps_is_not_an_error() {
        let metadata = PhotoMetadata {
            gps_latitude: Some(49.1794.into()),
            ..PhotoMetadata::default()
        };
        let location = locator().locate(&metadata).unwrap();
        assert_eq!(location, PhotoLocation::default());
    }

    #[test]
    fn test_out_of_range_reading_is_invalid_input() {
        let err = locator().locate(&at(91.0, 20.0)).unwrap_err();
        assert!(matches!(err, MatchError::InvalidInput(_)));
    }

    #[test]
    fn test_locate_file_uses_extractor() {
        let mut on_summit = at(49.1794, 20.0880);
        on_summit.captured_at = crate::metadata::parse_exif_datetime("2024:07:14 09:41:07");
        let extractor = FakeExtractor::new(vec![("rysy.jpg", on_summit)]);
        let locator = locator();

        let matched = locator.locate_file(&extractor, Path::new("rysy.jpg")).unwrap();
        assert_eq!(matched.peak_id, Some(1));
        assert!(matched.captured_at.is_some());

        let unknown = locator.locate_file(&extractor, Path::new("beach.jpg")).unwrap();
        assert!(!unknown.is_on_summit());
        assert_eq!(extractor.calls.get(), 2);
    }
}
