//! Structured errors shared by the summit crates and binaries
//!
//! An [`Error`] carries a stable [`ErrorCode`], a message, and optionally the
//! step that failed, a hint for the user and the underlying cause. Binaries
//! turn it into an exit status ([`ErrorCode::exit_code`]) or, over HTTP, into
//! an [`ErrorReport`] body.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable numeric error codes, grouped by thousands
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Internal = 1001,

    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,

    ConfigError = 3000,
    ConfigNotFound = 3001,
    ConfigParseError = 3002,
    ConfigValidationError = 3003,

    CatalogError = 4000,
    PeakNotFound = 4002,

    ValidationError = 6000,
    InvalidInput = 6001,
    InvalidCoordinate = 6002,
}

/// Coarse grouping of [`ErrorCode`]s
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    General,
    Io,
    Configuration,
    Catalog,
    Validation,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::General => "General",
            Category::Io => "IO",
            Category::Configuration => "Configuration",
            Category::Catalog => "Catalog",
            Category::Validation => "Validation",
        };
        f.write_str(name)
    }
}

impl ErrorCode {
    /// The numeric value, e.g. `4002`
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Which group the code belongs to
    pub fn category(self) -> Category {
        match self.code() / 1000 {
            2 => Category::Io,
            3 => Category::Configuration,
            4 => Category::Catalog,
            6 => Category::Validation,
            _ => Category::General,
        }
    }

    /// True when the caller, not the system, is at fault
    pub fn is_caller_fault(self) -> bool {
        self.category() == Category::Validation || self == ErrorCode::PeakNotFound
    }

    /// Process exit status for a command that failed with this code
    pub fn exit_code(self) -> i32 {
        match self.category() {
            Category::Validation => exit_codes::VALIDATION_ERROR,
            Category::Configuration => exit_codes::CONFIG_ERROR,
            Category::Catalog => exit_codes::CATALOG_ERROR,
            Category::General | Category::Io => exit_codes::FAILURE,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Error with a code, the failing step and a hint for the user
#[derive(Error, Debug)]
pub struct Error {
    /// Stable code
    pub code: ErrorCode,
    /// What went wrong
    pub message: String,
    /// The step that was running, e.g. the config file being read
    pub context: Option<String>,
    /// What the user can do about it
    pub suggestion: Option<String>,
    /// Underlying cause
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(context) = &self.context {
            write!(f, "\n  while: {context}")?;
        }
        if let Some(hint) = &self.suggestion {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Bare error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Record the step that failed
    #[must_use]
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Attach a hint for the user
    #[must_use]
    pub fn with_suggestion(self, suggestion: impl Into<String>) -> Self {
        Self {
            suggestion: Some(suggestion.into()),
            ..self
        }
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_source(self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..self
        }
    }

    /// Serializable view for logs and API bodies
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            id: self.code.to_string(),
            category: self.code.category(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(ToString::to_string),
        }
    }

    /// Configuration problem without a more specific code
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// An explicitly requested configuration file is missing
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("create summit.toml, set SUMMIT_CONFIG, or pass --config <path>")
    }

    /// A configuration value is out of range
    pub fn config_invalid(field: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ConfigValidationError,
            format!("{field}: {}", message.into()),
        )
    }

    /// The peak catalog could not be read
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CatalogError, message)
            .with_suggestion("check [catalog].path and the file's contents")
    }

    /// No peak has this id
    pub fn peak_not_found(id: i64) -> Self {
        Self::new(ErrorCode::PeakNotFound, format!("no peak with id {id}"))
    }

    /// Caller input failed validation
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Latitude or longitude outside the valid range
    pub fn invalid_coordinate(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCoordinate, message)
            .with_suggestion("latitude must be within [-90, 90] and longitude within [-180, 180]")
    }
}

/// Serializable form of an [`Error`]
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    /// `E4002`-style identifier
    pub id: String,
    pub category: Category,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Exit statuses of the `summit` command
#[allow(missing_docs)]
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const CATALOG_ERROR: i32 = 4;
    /// The query was valid but no peak was in range
    pub const NO_MATCH: i32 = 10;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Self::new(code, err.to_string()).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::new(ErrorCode::ConfigParseError, format!("invalid TOML: {}", err.message()))
            .with_source(err)
    }
}

/// Attach context or a hint to the error side of a [`Result`]
pub trait ResultExt<T> {
    /// See [`Error::with_context`]
    fn context(self, context: impl Into<String>) -> Result<T>;
    /// See [`Error::with_suggestion`]
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}
