//! Summit photo location.
//!
//! Pulls capture time and GPS position out of a photo and matches the
//! position against the peak catalog, so an uploaded photo can be attached
//! to the summit it was taken on.
//!
//! ```no_run
//! use std::path::Path;
//! use summit_peaks::{seed_catalog, PeakMatcher};
//! use summit_photos::{ExifMetadataExtractor, PhotoLocator};
//!
//! let locator = PhotoLocator::new(PeakMatcher::new(seed_catalog()));
//! let location = locator
//!     .locate_file(&ExifMetadataExtractor::new(), Path::new("IMG_0042.jpg"))
//!     .unwrap();
//! println!("{:?}", location.peak_name);
//! ```

mod extract;
mod locator;
mod metadata;

pub use extract::ExifMetadataExtractor;
pub use locator::{PhotoLocation, PhotoLocator, DEFAULT_MATCH_DISTANCE_M};
pub use metadata::{parse_exif_datetime, GpsReading, MetadataExtractor, PhotoMetadata};
