//! summit: nearest-peak lookup and summit photo location from the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use summit_cli::output::{
    format_coordinate, format_coordinate_dms, format_count, format_distance, format_elevation,
    Status,
};
use summit_core::config::Config;
use summit_core::error::exit_codes;
use summit_geo::{decimal_to_dms, haversine_distance_meters, Coordinate, Dms};
use summit_peaks::{CatalogError, ConfiguredCatalog, MatchError, PeakCatalog, PeakMatcher};
use summit_photos::{ExifMetadataExtractor, PhotoLocator};
use summit_telemetry::TelemetryConfig;

#[derive(Parser)]
#[command(name = "summit")]
#[command(about = "Find the peak nearest to a point and locate summit photos")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to $SUMMIT_CONFIG or ./summit.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Peaks nearest to a point, closest first
    #[command(allow_negative_numbers = true)]
    Nearest {
        /// Latitude in decimal degrees
        latitude: f64,
        /// Longitude in decimal degrees
        longitude: f64,
        /// Search radius in meters; without it the whole catalog is ranked
        #[arg(short = 'd', long)]
        max_distance: Option<f64>,
        /// Maximum number of peaks (defaults to matcher.default_limit)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Great-circle distance between two points
    #[command(allow_negative_numbers = true)]
    Distance {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },

    /// Convert decimal degrees to degrees, minutes and seconds
    #[command(allow_negative_numbers = true)]
    Dms {
        /// Decimal degrees
        decimal: f64,
    },

    /// Convert degrees, minutes and seconds to decimal degrees
    #[command(allow_negative_numbers = true)]
    Decimal {
        degrees: f64,
        minutes: f64,
        seconds: f64,
        /// Hemisphere reference; S and W give a negative result
        #[arg(short, long, value_parser = parse_hemisphere)]
        reference: Option<char>,
    },

    /// List every peak in the catalog
    Peaks {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read a photo's EXIF position and match it to a summit
    Photo {
        /// Path to the photo
        path: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::error(&e.to_string());
            std::process::exit(e.code.exit_code());
        }
    };

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    summit_telemetry::init_with_config(TelemetryConfig::with_level(level, config.schema.logging.json))?;

    let catalog = ConfiguredCatalog::from_path(config.schema.catalog.path.as_deref());
    tracing::debug!(catalog = %catalog.describe(), config = ?config.path, "Starting");

    let code = match cli.command {
        Commands::Nearest {
            latitude,
            longitude,
            max_distance,
            limit,
            json,
        } => run_nearest(
            &catalog,
            Coordinate::new(latitude, longitude),
            max_distance,
            limit.unwrap_or(config.schema.matcher.default_limit),
            json,
        )?,
        Commands::Distance { lat1, lon1, lat2, lon2 } => {
            run_distance(Coordinate::new(lat1, lon1), Coordinate::new(lat2, lon2))
        }
        Commands::Dms { decimal } => run_dms(decimal),
        Commands::Decimal {
            degrees,
            minutes,
            seconds,
            reference,
        } => run_decimal(Dms::new(degrees, minutes, seconds), reference),
        Commands::Peaks { json } => run_peaks(&catalog, json)?,
        Commands::Photo { path, json } => {
            run_photo(&catalog, &path, config.schema.photos.match_distance_m, json)?
        }
    };

    std::process::exit(code);
}

fn parse_hemisphere(value: &str) -> std::result::Result<char, String> {
    match value.trim().to_ascii_uppercase().as_str() {
        "N" => Ok('N'),
        "S" => Ok('S'),
        "E" => Ok('E'),
        "W" => Ok('W'),
        other => Err(format!("expected one of N, S, E, W, got '{other}'")),
    }
}

/// Report a failed match and pick the exit code.
fn match_failure(err: MatchError<CatalogError>) -> Result<i32> {
    match err {
        MatchError::InvalidInput(e) => {
            Status::error(&e.to_string());
            Ok(exit_codes::VALIDATION_ERROR)
        }
        MatchError::Catalog(e) => {
            Status::error(&format!("Catalog unavailable: {e}"));
            Ok(exit_codes::CATALOG_ERROR)
        }
    }
}

fn run_nearest(
    catalog: &ConfiguredCatalog,
    point: Coordinate,
    max_distance_m: Option<f64>,
    limit: usize,
    json: bool,
) -> Result<i32> {
    let matcher = PeakMatcher::new(catalog);
    let matches = match matcher.find_nearest_n(point, max_distance_m, limit) {
        Ok(matches) => matches,
        Err(e) => return match_failure(e),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else if matches.is_empty() {
        let scope = match max_distance_m {
            Some(max) => format!("within {}", format_distance(max)),
            None => "in the catalog".to_string(),
        };
        Status::warning(&format!("No peaks {scope} of {}", format_coordinate(point)));
    } else {
        Status::header(&format!(
            "{} near {}",
            format_count(matches.len(), "peak", "peaks"),
            format_coordinate(point)
        ));
        for (rank, found) in matches.iter().enumerate() {
            let detail = format!("{}, {}", found.peak.range, format_elevation(found.peak.elevation));
            Status::ranked(rank + 1, &found.peak.name, &detail, found.distance);
        }
    }

    Ok(if matches.is_empty() {
        exit_codes::NO_MATCH
    } else {
        exit_codes::SUCCESS
    })
}

fn run_distance(from: Coordinate, to: Coordinate) -> i32 {
    for point in [from, to] {
        if let Err(e) = point.validate() {
            Status::error(&e.to_string());
            return exit_codes::VALIDATION_ERROR;
        }
    }

    let meters = haversine_distance_meters(&from, &to);
    println!(
        "{} → {}: {}",
        format_coordinate(from),
        format_coordinate(to),
        format_distance(meters).bold()
    );
    exit_codes::SUCCESS
}

fn run_dms(decimal: f64) -> i32 {
    if !decimal.is_finite() {
        Status::error("value must be a finite number of degrees");
        return exit_codes::VALIDATION_ERROR;
    }
    let dms = decimal_to_dms(decimal);
    println!("{dms}");
    exit_codes::SUCCESS
}

fn run_decimal(dms: Dms, reference: Option<char>) -> i32 {
    let value = match reference {
        Some(r) => dms.to_decimal_with_ref(r),
        None => dms.to_decimal(),
    };
    println!("{value:.6}");
    exit_codes::SUCCESS
}

fn run_peaks(catalog: &ConfiguredCatalog, json: bool) -> Result<i32> {
    let peaks = match catalog.get_all_peaks() {
        Ok(peaks) => peaks,
        Err(e) => {
            Status::error(&format!("Catalog unavailable: {e}"));
            return Ok(exit_codes::CATALOG_ERROR);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&peaks)?);
        return Ok(exit_codes::SUCCESS);
    }

    Status::header(&format!(
        "{} in {}",
        format_count(peaks.len(), "peak", "peaks"),
        catalog.describe()
    ));
    for peak in &peaks {
        println!(
            "{:>4}  {}  {}  {}  {}",
            peak.id.dimmed(),
            peak.name.bold(),
            peak.range,
            format_elevation(peak.elevation),
            format_coordinate_dms(peak.coordinate()).dimmed()
        );
    }
    Ok(exit_codes::SUCCESS)
}

fn run_photo(
    catalog: &ConfiguredCatalog,
    path: &std::path::Path,
    match_distance_m: f64,
    json: bool,
) -> Result<i32> {
    if !path.is_file() {
        Status::error(&format!("No such file: {}", path.display()));
        return Ok(exit_codes::FAILURE);
    }

    let locator = PhotoLocator::with_match_distance(PeakMatcher::new(catalog), match_distance_m);
    let location = match locator.locate_file(&ExifMetadataExtractor::new(), path) {
        Ok(location) => location,
        Err(e) => return match_failure(e),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&location)?);
    } else {
        Status::header(&path.display().to_string());
        match location.captured_at {
            Some(at) => println!("Captured: {at}"),
            None => println!("Captured: unknown"),
        }
        match (location.latitude, location.longitude) {
            (Some(lat), Some(lon)) => println!("Position: {}", format_coordinate(Coordinate::new(lat, lon))),
            _ => println!("Position: no GPS data"),
        }
        if let Some(alt) = location.altitude {
            println!("Altitude: {alt:.0} m");
        }
        match (&location.peak_name, location.distance_to_peak) {
            (Some(name), Some(distance)) => {
                Status::success(&format!("Summit: {} ({} away)", name, format_distance(distance)))
            }
            _ => Status::info(&format!(
                "No summit within {}",
                format_distance(match_distance_m)
            )),
        }
    }

    Ok(if location.is_on_summit() {
        exit_codes::SUCCESS
    } else {
        exit_codes::NO_MATCH
    })
}
