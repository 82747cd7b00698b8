//! Weather data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of daily entries the weather API returns for a forecast
pub const DAILY_FORECAST_DAYS: usize = 8;

/// Current conditions plus the daily forecast for one location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Weather {
    /// Latitude echoed from the query
    pub latitude: f64,
    /// Longitude echoed from the query
    pub longitude: f64,
    /// IANA timezone of the location
    #[serde(default)]
    pub timezone: String,
    /// Live reading at request time
    pub currently: DataPoint,
    /// One entry per day, starting today
    pub daily: DataBlock,
}

/// A block of data points with an overall summary
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DataBlock {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub data: Vec<DataPoint>,
}

/// Conditions at a point in time (current reading or one forecast day)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    /// Time of this reading, unix seconds on the wire
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Temperature in °F (current readings only)
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub apparent_temperature: Option<f64>,
    /// Daily minimum in °F (forecast days only)
    #[serde(default)]
    pub temperature_min: Option<f64>,
    /// Daily maximum in °F (forecast days only)
    #[serde(default)]
    pub temperature_max: Option<f64>,
    /// Probability of precipitation, 0.0 - 1.0
    #[serde(default)]
    pub precip_probability: Option<f64>,
    /// Relative humidity, 0.0 - 1.0
    #[serde(default)]
    pub humidity: Option<f64>,
    /// Wind speed in mph
    #[serde(default)]
    pub wind_speed: Option<f64>,
    /// Direction the wind comes from in degrees, 0 is north
    #[serde(default)]
    pub wind_bearing: Option<u16>,
    /// Sea-level pressure in hPa
    #[serde(default)]
    pub pressure: Option<f64>,
}

impl DataPoint {
    /// A reading with only its timestamp set
    #[must_use]
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            time,
            summary: None,
            icon: None,
            temperature: None,
            apparent_temperature: None,
            temperature_min: None,
            temperature_max: None,
            precip_probability: None,
            humidity: None,
            wind_speed: None,
            wind_bearing: None,
            pressure: None,
        }
    }
}
