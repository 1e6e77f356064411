//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub matcher: MatcherConfig,

    #[serde(default)]
    pub photos: PhotosConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        check_distance("matcher.default_max_distance_m", self.matcher.default_max_distance_m)?;
        check_distance("photos.match_distance_m", self.photos.match_distance_m)?;

        if self.matcher.default_limit == 0 {
            return Err(Error::config_invalid("matcher.default_limit", "must be at least 1"));
        }

        if self.logging.level.trim().is_empty() {
            return Err(Error::config_invalid("logging.level", "must not be empty"));
        }

        Ok(())
    }
}

fn check_distance(field: &str, meters: f64) -> Result<()> {
    if meters.is_finite() && meters >= 0.0 {
        Ok(())
    } else {
        Err(Error::config_invalid(
            field,
            format!("{} is not a finite, non-negative distance in meters", meters),
        ))
    }
}

/// Nearest-peak matcher defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Radius for single-best lookups (`/api/peaks/nearest`) without a cutoff
    #[serde(default = "default_max_distance_m")]
    pub default_max_distance_m: f64,

    /// Number of results returned by ranked queries without an explicit limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            default_max_distance_m: default_max_distance_m(),
            default_limit: default_limit(),
        }
    }
}

fn default_max_distance_m() -> f64 {
    5000.0
}

fn default_limit() -> usize {
    5
}

/// Photo workflow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotosConfig {
    /// A photo farther than this from every peak stays unassociated
    #[serde(default = "default_photo_match_distance_m")]
    pub match_distance_m: f64,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            match_distance_m: default_photo_match_distance_m(),
        }
    }
}

fn default_photo_match_distance_m() -> f64 {
    1000.0
}

/// Peak catalog source
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// TOML or JSON file with the peak list; the built-in seed catalog is used when unset
    #[serde(default)]
    pub path: Option<String>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of the compact format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
