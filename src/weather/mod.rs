//! Weather API client
//!
//! Fetches current conditions and the daily forecast for a coordinate pair
//! and checks the response against what the rest of the service relies on:
//! the echoed coordinates and a full week-plus-one of daily entries.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::error::FavoritesError;
use crate::models::{DAILY_FORECAST_DAYS, Location, Weather};
use crate::Result;

pub mod cached;

pub use cached::CachedWeatherProvider;

/// Maximum distance in degrees between queried and echoed coordinates
pub const COORDINATE_TOLERANCE: f64 = 1e-7;

/// A weather provider that resolves a location to current + daily data
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn find_by_location(&self, location: &Location) -> Result<Weather>;
}

/// HTTP client for a Dark Sky style forecast API
pub struct DarkSkyClient {
    client: Client,
    api_key: String,
    base_url: String,
    endpoint: String,
}

impl DarkSkyClient {
    /// Create a new client
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| FavoritesError::config("Weather API key is required"))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("favorite-weather/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FavoritesError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            endpoint: config.endpoint.trim_matches('/').to_string(),
        })
    }

    fn forecast_url(&self, location: &Location) -> String {
        format!(
            "{}/{}/{}/{},{}",
            self.base_url, self.endpoint, self.api_key, location.latitude, location.longitude
        )
    }
}

/// Check a decoded response against the queried location
pub fn check_response(location: &Location, weather: &Weather) -> Result<()> {
    let echoed = Location::new(weather.latitude, weather.longitude);
    if !echoed.approx_eq(location, COORDINATE_TOLERANCE) {
        return Err(FavoritesError::weather_unavailable(format!(
            "response coordinates ({}) do not match request ({})",
            echoed.format_coordinates(),
            location.format_coordinates()
        )));
    }

    if weather.daily.data.len() != DAILY_FORECAST_DAYS {
        return Err(FavoritesError::weather_unavailable(format!(
            "expected {} daily forecast entries, got {}",
            DAILY_FORECAST_DAYS,
            weather.daily.data.len()
        )));
    }

    Ok(())
}

#[async_trait]
impl WeatherProvider for DarkSkyClient {
    #[instrument(skip(self), fields(lat = location.latitude, lon = location.longitude))]
    async fn find_by_location(&self, location: &Location) -> Result<Weather> {
        info!(
            "Getting weather for coordinates: {}",
            location.format_coordinates()
        );
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.forecast_url(location))
            .query(&[("exclude", "minutely,hourly,alerts,flags")])
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() { "request timed out" } else { "request failed" };
                warn!("Weather API {}: {}", reason, e);
                FavoritesError::weather_unavailable(format!("{reason}: {e}"))
            })?;

        let status = response.status();
        debug!("Weather API responded {}", status);
        if !status.is_success() {
            return Err(FavoritesError::weather_unavailable(format!(
                "weather API returned HTTP {status}"
            )));
        }

        let weather: Weather = response.json().await.map_err(|e| {
            error!("Failed to parse weather response: {}", e);
            FavoritesError::weather_unavailable(format!("invalid weather response: {e}"))
        })?;

        check_response(location, &weather)?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved weather with {} daily entries in {:.3}s",
            weather.daily.data.len(),
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!("Slow weather API response: {:.3}s", total_duration.as_secs_f64());
        }

        Ok(weather)
    }
}
