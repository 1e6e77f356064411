//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::Path;

/// Environment variable pointing at a configuration file
pub const CONFIG_ENV_VAR: &str = "SUMMIT_CONFIG";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed and validated settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// Resolution order: the explicit `path`, then `$SUMMIT_CONFIG`, then the
    /// first standard location that exists. An explicit path or environment
    /// value that points nowhere is an error; missing standard files are not.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_ENV_VAR).ok();
        let config_path = resolve_path(path, env_path.as_deref());

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        schema
            .validate()
            .context(config_path.clone().unwrap_or_else(|| "built-in defaults".to_string()))?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Pick the configuration file to read
fn resolve_path(explicit: Option<&str>, env_value: Option<&str>) -> Option<String> {
    explicit
        .map(String::from)
        .or_else(|| env_value.filter(|v| !v.trim().is_empty()).map(String::from))
        .or_else(find_config_file)
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = ["summit.toml", ".summit.toml", ".config/summit.toml"];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }

    None
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    if !Path::new(path).exists() {
        return Err(Error::config_not_found(path));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {}: {}", path, e)).with_source(e))?;

    let schema = toml::from_str(&content).map_err(Error::from).context(path.to_string())?;
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.matcher.default_limit, 5);
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        assert_eq!(
            resolve_path(Some("a.toml"), Some("b.toml")).as_deref(),
            Some("a.toml")
        );
        assert_eq!(resolve_path(None, Some("b.toml")).as_deref(), Some("b.toml"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[matcher]\ndefault_max_distance_m = 2500.0\n\n[catalog]\npath = \"peaks.toml\""
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let config = Config::load(Some(path)).unwrap();

        assert_eq!(config.path.as_deref(), Some(path));
        assert_eq!(config.schema.matcher.default_max_distance_m, 2500.0);
        assert_eq!(config.schema.catalog.path.as_deref(), Some("peaks.toml"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some("/definitely/not/here/summit.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[matcher\ndefault_limit = ").unwrap();

        let err = Config::load(Some(file.path().to_str().unwrap())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.is_some());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[matcher]\ndefault_limit = 0").unwrap();

        let err = Config::load(Some(file.path().to_str().unwrap())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
    }
}
