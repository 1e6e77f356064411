//! Peak catalog access and nearest-peak matching.
//!
//! A [`PeakMatcher`] wraps any [`PeakCatalog`] and answers two questions about
//! a point: which single peak is closest (optionally within a radius), and
//! which N peaks are closest, ranked.
//!
//! # Example
//!
//! ```
//! use summit_geo::Coordinate;
//! use summit_peaks::{seed_catalog, PeakMatcher};
//!
//! let matcher = PeakMatcher::new(seed_catalog());
//! let near_rysy = Coordinate::new(49.1794, 20.0880);
//!
//! let found = matcher.find_nearest(near_rysy, Some(5000.0)).unwrap().unwrap();
//! assert_eq!(found.peak.name, "Rysy");
//! assert!(found.distance < 20.0);
//!
//! let ranked = matcher.find_nearest_n(near_rysy, None, 2).unwrap();
//! assert_eq!(ranked.len(), 2);
//! ```

mod catalog;
mod error;
mod matcher;
mod model;
pub mod seed;

pub use catalog::{ConfiguredCatalog, FileCatalog, InMemoryCatalog, PeakCatalog};
pub use error::{CatalogError, MatchError};
pub use matcher::{MatchResult, PeakMatcher, DEFAULT_LIMIT, DEFAULT_MAX_DISTANCE_M};
pub use model::{Peak, PeakMatch};
pub use seed::{polish_peaks, seed_catalog};
