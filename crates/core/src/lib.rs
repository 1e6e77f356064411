//! Core utilities for summit-tools
//!
//! This crate provides shared functionality used by the matcher, the photo
//! workflow and both binaries:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults and validation
//!
//! # Example
//!
//! ```rust,no_run
//! use summit_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("Default radius: {} m", config.schema.matcher.default_max_distance_m);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Category, Error, ErrorCode, ErrorReport, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
