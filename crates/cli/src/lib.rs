//! Terminal output for the summit command-line tools
//!
//! - Status lines (success, warnings, errors)
//! - Human formatting for distances, coordinates and elevations

#![warn(missing_docs)]

pub mod output;
