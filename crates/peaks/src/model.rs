//! Peak records and match results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use summit_geo::Coordinate;

/// A named summit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Catalog identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Elevation in meters
    pub elevation: i32,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Mountain range label
    pub range: String,
    /// When the record was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Peak {
    /// Creates a peak stamped with the current time.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        elevation: i32,
        latitude: f64,
        longitude: f64,
        range: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            elevation,
            latitude,
            longitude,
            range: range.into(),
            created_at: Utc::now(),
        }
    }

    /// The summit location.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A peak paired with its distance from a query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakMatch {
    /// The matched peak
    pub peak: Peak,
    /// Great-circle distance in meters
    pub distance: f64,
}

impl PeakMatch {
    /// Identifier of the matched peak.
    #[inline]
    pub fn peak_id(&self) -> i64 {
        self.peak.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_json_shape() {
        let rysy = Peak::new(1, "Rysy", 2499, 49.1795, 20.0881, "Tatry");
        let json = serde_json::to_value(PeakMatch { peak: rysy, distance: 13.2 }).unwrap();

        assert_eq!(json["distance"], 13.2);
        assert_eq!(json["peak"]["name"], "Rysy");
        assert_eq!(json["peak"]["range"], "Tatry");
        assert_eq!(json["peak"]["elevation"], 2499);
        assert!(json["peak"]["created_at"].is_string());
    }

    #[test]
    fn test_created_at_defaults_when_missing() {
        let peak: Peak = serde_json::from_str(
            r#"{"id": 2, "name": "Giewont", "elevation": 1894,
                "latitude": 49.2522, "longitude": 19.9344, "range": "Tatry"}"#,
        )
        .unwrap();
        assert_eq!(peak.coordinate(), Coordinate::new(49.2522, 19.9344));
    }
}
