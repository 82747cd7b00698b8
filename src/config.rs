//! Configuration management for the favorite-weather service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::FavoritesError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Places / geocoding API configuration
    #[serde(default)]
    pub places: PlacesConfig,
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Places API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Places API key
    pub api_key: Option<String>,
    /// Base URL for the places API
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weather API key
    pub api_key: Option<String>,
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Path segment of the forecast endpoint
    #[serde(default = "default_weather_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Weather cache TTL in seconds; 0 disables caching
    #[serde(default)]
    pub cache_ttl_seconds: u32,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub cache_location: String,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_places_base_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.darksky.net".to_string()
}

fn default_weather_endpoint() -> String {
    "forecast".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_cache_location() -> String {
    dirs::cache_dir()
        .map(|dir| dir.join("favorite-weather"))
        .unwrap_or_else(|| PathBuf::from(".cache/favorite-weather"))
        .to_string_lossy()
        .to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_places_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            endpoint: default_weather_endpoint(),
            timeout_seconds: default_timeout(),
            cache_ttl_seconds: 0,
            cache_location: default_cache_location(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            places: PlacesConfig::default(),
            weather: WeatherConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PlacesConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }

    /// Cache TTL, or `None` when caching is disabled
    #[must_use]
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_seconds > 0).then(|| Duration::from_secs(self.cache_ttl_seconds.into()))
    }
}

impl AppConfig {
    /// Load configuration from `config_path`, or the default location when `None`
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = match config_path {
            Some(path) if !path.exists() => {
                return Err(FavoritesError::config(format!(
                    "Config file not found: {}",
                    path.display()
                ))
                .into());
            }
            Some(path) => path,
            None => Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml")),
        };

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. FAVWEATHER__WEATHER__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("FAVWEATHER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("favorite-weather").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.places.base_url.is_empty() {
            self.places.base_url = default_places_base_url();
        }
        if self.places.timeout_seconds == 0 {
            self.places.timeout_seconds = default_timeout();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.endpoint.is_empty() {
            self.weather.endpoint = default_weather_endpoint();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_timeout();
        }
        if self.weather.cache_location.is_empty() {
            self.weather.cache_location = default_cache_location();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        for (name, key) in [
            ("Places", &self.places.api_key),
            ("Weather", &self.weather.api_key),
        ] {
            match key.as_deref() {
                None | Some("") => {
                    return Err(FavoritesError::config(format!(
                        "{name} API key is required. Set it in the config file or via environment."
                    ))
                    .into());
                }
                Some(key) if key.len() > 200 => {
                    return Err(FavoritesError::config(format!(
                        "{name} API key appears to be invalid (too long). Please check your API key."
                    ))
                    .into());
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.places.timeout_seconds > 120 {
            return Err(
                FavoritesError::config("Places API timeout cannot exceed 120 seconds").into(),
            );
        }

        if self.weather.timeout_seconds > 120 {
            return Err(
                FavoritesError::config("Weather API timeout cannot exceed 120 seconds").into(),
            );
        }

        if self.weather.cache_ttl_seconds > 24 * 60 * 60 {
            return Err(FavoritesError::config("Weather cache TTL cannot exceed 24 hours").into());
        }

        if self.server.port == 0 {
            return Err(FavoritesError::config("Server port must be non-zero").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(FavoritesError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(FavoritesError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Places", &self.places.base_url),
            ("Weather", &self.weather.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(FavoritesError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn configured() -> AppConfig {
        let mut config = AppConfig::default();
        config.places.api_key = Some("places_key_123".to_string());
        config.weather.api_key = Some("weather_key_123".to_string());
        config
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.places.base_url, "https://maps.googleapis.com/maps/api");
        assert_eq!(config.weather.base_url, "https://api.darksky.net");
        assert_eq!(config.weather.endpoint, "forecast");
        assert_eq!(config.weather.timeout_seconds, 10);
        assert_eq!(config.weather.cache_ttl(), None);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_config_validation_missing_api_key() {
        let config = AppConfig::default();
        let result = config.validate_api_keys();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key is required"));
    }

    #[test]
    fn test_config_validation_valid_api_keys() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = configured();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = configured();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = configured();
        config.places.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = configured();
        config.weather.endpoint.clear();
        config.places.timeout_seconds = 0;
        config.apply_defaults();
        assert_eq!(config.weather.endpoint, "forecast");
        assert_eq!(config.places.timeout_seconds, 10);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(
            file,
            r#"
[places]
api_key = "file_places_key"

[weather]
api_key = "file_weather_key"
cache_ttl_seconds = 600

[server]
port = 9090
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.places.api_key.as_deref(), Some("file_places_key"));
        assert_eq!(config.weather.cache_ttl(), Some(Duration::from_secs(600)));
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.weather.endpoint, "forecast");
    }

    #[test]
    fn test_load_rejects_missing_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");

        let result = AppConfig::load_from_path(Some(missing));

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Config file not found"));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = AppConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("favorite-weather"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
