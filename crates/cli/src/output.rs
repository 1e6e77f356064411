//! Terminal output utilities

use owo_colors::OwoColorize;
use summit_geo::{decimal_to_dms, Coordinate};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print one ranked result line: position, name, detail, distance
    pub fn ranked(rank: usize, name: &str, detail: &str, distance_m: f64) {
        println!(
            "{} {} {} {}",
            format!("{rank:>2}.").dimmed(),
            name.bold(),
            detail.dimmed(),
            format_distance(distance_m).cyan()
        );
    }
}

/// Meters below one kilometer, kilometers with two decimals above
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

/// Decimal degrees with hemisphere letters, e.g. `49.179400°N 20.088000°E`
pub fn format_coordinate(point: Coordinate) -> String {
    let ns = if point.latitude < 0.0 { 'S' } else { 'N' };
    let ew = if point.longitude < 0.0 { 'W' } else { 'E' };
    format!(
        "{:.6}°{} {:.6}°{}",
        point.latitude.abs(),
        ns,
        point.longitude.abs(),
        ew
    )
}

/// Both axes in degrees-minutes-seconds with hemisphere letters
pub fn format_coordinate_dms(point: Coordinate) -> String {
    let ns = if point.latitude < 0.0 { 'S' } else { 'N' };
    let ew = if point.longitude < 0.0 { 'W' } else { 'E' };
    format!(
        "{}{} {}{}",
        decimal_to_dms(point.latitude.abs()),
        ns,
        decimal_to_dms(point.longitude.abs()),
        ew
    )
}

/// Elevation in meters above sea level
pub fn format_elevation(meters: i32) -> String {
    format!("{meters} m n.p.m.")
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
