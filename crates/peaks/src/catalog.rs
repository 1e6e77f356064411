//! Peak catalog accessors.
//!
//! The matcher reads a full snapshot of the catalog on every query. Accessors
//! must not cache on its behalf: a [`FileCatalog`] re-reads its file each time.

use crate::error::CatalogError;
use crate::model::Peak;
use serde::Deserialize;
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Source of peak records.
pub trait PeakCatalog {
    /// Failure type of the underlying store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every known peak, in catalog order.
    fn get_all_peaks(&self) -> Result<Vec<Peak>, Self::Error>;

    /// A single peak by id.
    fn get_peak(&self, id: i64) -> Result<Option<Peak>, Self::Error> {
        Ok(self.get_all_peaks()?.into_iter().find(|peak| peak.id == id))
    }
}

impl<C: PeakCatalog + ?Sized> PeakCatalog for &C {
    type Error = C::Error;

    fn get_all_peaks(&self) -> Result<Vec<Peak>, Self::Error> {
        (**self).get_all_peaks()
    }

    fn get_peak(&self, id: i64) -> Result<Option<Peak>, Self::Error> {
        (**self).get_peak(id)
    }
}

impl<C: PeakCatalog + ?Sized> PeakCatalog for Arc<C> {
    type Error = C::Error;

    fn get_all_peaks(&self) -> Result<Vec<Peak>, Self::Error> {
        (**self).get_all_peaks()
    }

    fn get_peak(&self, id: i64) -> Result<Option<Peak>, Self::Error> {
        (**self).get_peak(id)
    }
}

/// A fixed list of peaks held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    peaks: Vec<Peak>,
}

impl InMemoryCatalog {
    /// Wraps the given peaks, keeping their order.
    pub fn new(peaks: Vec<Peak>) -> Self {
        Self { peaks }
    }

    /// Number of peaks held.
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    /// True when no peaks are held.
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }
}

impl From<Vec<Peak>> for InMemoryCatalog {
    fn from(peaks: Vec<Peak>) -> Self {
        Self::new(peaks)
    }
}

impl PeakCatalog for InMemoryCatalog {
    type Error = Infallible;

    fn get_all_peaks(&self) -> Result<Vec<Peak>, Self::Error> {
        Ok(self.peaks.clone())
    }

    fn get_peak(&self, id: i64) -> Result<Option<Peak>, Self::Error> {
        Ok(self.peaks.iter().find(|peak| peak.id == id).cloned())
    }
}

/// On-disk layout of a TOML catalog.
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    peaks: Vec<Peak>,
}

/// A catalog stored in a TOML (`[[peaks]]` tables) or JSON (array) file.
///
/// The file is read and validated on every call.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    /// Points the catalog at a file; nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, content: &str) -> Result<Vec<Peak>, CatalogError> {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => toml::from_str::<TomlCatalog>(content)
                .map(|catalog| catalog.peaks)
                .map_err(|source| CatalogError::Toml {
                    path: self.path.clone(),
                    source,
                }),
            Some("json") => serde_json::from_str(content).map_err(|source| CatalogError::Json {
                path: self.path.clone(),
                source,
            }),
            _ => Err(CatalogError::UnsupportedFormat(self.path.clone())),
        }
    }
}

impl PeakCatalog for FileCatalog {
    type Error = CatalogError;

    fn get_all_peaks(&self) -> Result<Vec<Peak>, Self::Error> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;

        let peaks = self.parse(&content)?;

        for peak in &peaks {
            peak.coordinate()
                .validate()
                .map_err(|source| CatalogError::InvalidPeak {
                    id: peak.id,
                    name: peak.name.clone(),
                    source,
                })?;
        }

        tracing::debug!(path = %self.path.display(), count = peaks.len(), "Loaded peak catalog");
        Ok(peaks)
    }
}

/// The catalog a deployment runs with: a configured file, or the built-in seed.
#[derive(Debug, Clone)]
pub enum ConfiguredCatalog {
    Seed(InMemoryCatalog),
    File(FileCatalog),
}

impl ConfiguredCatalog {
    /// File catalog when a path is configured, seed catalog otherwise.
    pub fn from_path(path: Option<impl Into<PathBuf>>) -> Self {
        match path {
            Some(path) => ConfiguredCatalog::File(FileCatalog::new(path)),
            None => ConfiguredCatalog::Seed(crate::seed::seed_catalog()),
        }
    }

    /// Short human description of where peaks come from.
    pub fn describe(&self) -> String {
        match self {
            ConfiguredCatalog::Seed(_) => "built-in seed catalog".to_string(),
            ConfiguredCatalog::File(file) => file.path().display().to_string(),
        }
    }
}

impl PeakCatalog for ConfiguredCatalog {
    type Error = CatalogError;

    fn get_all_peaks(&self) -> Result<Vec<Peak>, Self::Error> {
        match self {
            ConfiguredCatalog::Seed(seed) => Ok(seed.peaks.clone()),
            ConfiguredCatalog::File(file) => file.get_all_peaks(),
        }
    }
}
