//! Error types for catalog access and matching.

use std::path::PathBuf;
use summit_geo::GeoError;
use thiserror::Error;

/// Errors raised by [`FileCatalog`](crate::FileCatalog).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("Failed to read peak catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML catalog did not parse
    #[error("Invalid TOML in peak catalog {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The JSON catalog did not parse
    #[error("Invalid JSON in peak catalog {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Extension is neither `.toml` nor `.json`
    #[error("Unsupported peak catalog format: {} (expected .toml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A record carries an unusable location
    #[error("Peak {id} ({name}) has an invalid location: {source}")]
    InvalidPeak {
        id: i64,
        name: String,
        #[source]
        source: GeoError,
    },
}

/// Errors returned by [`PeakMatcher`](crate::PeakMatcher).
///
/// `E` is the catalog's own error type, carried through unchanged.
#[derive(Debug, Error)]
pub enum MatchError<E>
where
    E: std::error::Error + 'static,
{
    /// The query point or distance threshold is unusable
    #[error(transparent)]
    InvalidInput(#[from] GeoError),

    /// The catalog accessor failed
    #[error(transparent)]
    Catalog(E),
}

impl<E> MatchError<E>
where
    E: std::error::Error + 'static,
{
    /// True when the caller supplied bad input, as opposed to a catalog failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, MatchError::InvalidInput(_))
    }

    /// The catalog error, if that is what this is.
    pub fn catalog_error(&self) -> Option<&E> {
        match self {
            MatchError::Catalog(e) => Some(e),
            MatchError::InvalidInput(_) => None,
        }
    }
}
