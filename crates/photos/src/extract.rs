//! EXIF-backed [`MetadataExtractor`].

use crate::metadata::{parse_exif_datetime, GpsReading, MetadataExtractor, PhotoMetadata};
use exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use summit_geo::Dms;
use tracing::debug;

/// Reads capture time and GPS position from JPEG/TIFF/HEIF EXIF blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifMetadataExtractor;

impl ExifMetadataExtractor {
    /// Create an extractor.
    pub fn new() -> Self {
        Self
    }

    /// Build metadata from an already parsed EXIF block.
    pub fn from_exif(exif: &Exif) -> PhotoMetadata {
        PhotoMetadata {
            captured_at: capture_time(exif),
            gps_latitude: gps_axis(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef),
            gps_longitude: gps_axis(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef),
            gps_altitude: altitude(exif),
        }
    }
}

impl MetadataExtractor for ExifMetadataExtractor {
    fn extract(&self, path: &Path) -> PhotoMetadata {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cannot open photo");
                return PhotoMetadata::empty();
            }
        };

        let mut reader = BufReader::new(file);
        match Reader::new().read_from_container(&mut reader) {
            Ok(exif) => Self::from_exif(&exif),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no readable EXIF");
                PhotoMetadata::empty()
            }
        }
    }
}

fn capture_time(exif: &Exif) -> Option<chrono::NaiveDateTime> {
    [Tag::DateTimeOriginal, Tag::DateTime]
        .into_iter()
        .filter_map(|tag| exif.get_field(tag, In::PRIMARY))
        .find_map(|field| parse_exif_datetime(&field.display_value().to_string()))
}

fn gps_axis(exif: &Exif, value_tag: Tag, ref_tag: Tag) -> Option<GpsReading> {
    let field = exif.get_field(value_tag, In::PRIMARY)?;
    let dms = parse_dms(&field.value)?;
    let reference = exif
        .get_field(ref_tag, In::PRIMARY)
        .and_then(|f| ascii_first_char(&f.value));

    Some(GpsReading::Dms { dms, reference })
}

fn parse_dms(value: &Value) -> Option<Dms> {
    match value {
        Value::Rational(parts) if parts.len() >= 3 => Some(Dms::new(
            parts[0].to_f64(),
            parts[1].to_f64(),
            parts[2].to_f64(),
        )),
        _ => None,
    }
}

fn ascii_first_char(value: &Value) -> Option<char> {
    match value {
        Value::Ascii(strings) => strings
            .first()
            .and_then(|s| s.first())
            .map(|b| char::from(*b).to_ascii_uppercase())
            .filter(char::is_ascii_alphabetic),
        _ => None,
    }
}

fn altitude(exif: &Exif) -> Option<f64> {
    let meters = match &exif.get_field(Tag::GPSAltitude, In::PRIMARY)?.value {
        Value::Rational(parts) => parts.first()?.to_f64(),
        _ => return None,
    };
    if !meters.is_finite() {
        return None;
    }

    // GPSAltitudeRef 1 means below sea level
    let below = exif
        .get_field(Tag::GPSAltitudeRef, In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        == Some(1);

    Some(if below { -meters } else { meters })
}
