//! Location model for geographic coordinates and places results

use serde::{Deserialize, Serialize};

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Round coordinates for cache key generation
    #[must_use]
    pub fn rounded_coordinates(&self, precision: u32) -> (f64, f64) {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        let lat = (self.latitude * multiplier).round() / multiplier;
        let lon = (self.longitude * multiplier).round() / multiplier;
        (lat, lon)
    }

    /// Generate cache key for weather at this location
    #[must_use]
    pub fn cache_key(&self) -> String {
        let (lat, lon) = self.rounded_coordinates(4);
        format!("weather:{lat:.4}:{lon:.4}")
    }

    /// Whether both coordinates lie within `tolerance` degrees of `other`
    #[must_use]
    pub fn approx_eq(&self, other: &Location, tolerance: f64) -> bool {
        (self.latitude - other.latitude).abs() <= tolerance
            && (self.longitude - other.longitude).abs() <= tolerance
    }
}

/// Geometry wrapper as returned by the places API
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Geometry {
    pub location: Location,
}

/// A single place returned by the places or geocoding API
///
/// Read in the API's snake_case, written camelCase like the rest of the JSON we serve.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct PlacesResult {
    pub place_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

impl PlacesResult {
    #[must_use]
    pub fn new(place_id: impl Into<String>, location: Location) -> Self {
        Self {
            place_id: place_id.into(),
            formatted_address: None,
            geometry: Geometry { location },
        }
    }

    /// Coordinates of this place
    #[must_use]
    pub fn location(&self) -> Location {
        self.geometry.location
    }
}
