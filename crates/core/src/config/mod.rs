//! Configuration loading and schema definitions
//!
//! Shared configuration types for the matcher, photo workflow, catalog,
//! server and logging.

mod loader;
mod schema;

pub use loader::{Config, CONFIG_ENV_VAR};
pub use schema::*;
