//! Error types and handling for the favorite-weather service

use thiserror::Error;

/// Main error type for the favorites service
#[derive(Error, Debug)]
pub enum FavoritesError {
    /// No favorite is stored under the requested id
    #[error("Favorite not found: {id}")]
    NotFound { id: u64 },

    /// A place identifier or search query could not be resolved to coordinates
    #[error("Place resolution failed for '{place_id}': {message}")]
    Resolution { place_id: String, message: String },

    /// The weather API failed or returned malformed data
    #[error("Weather unavailable: {message}")]
    WeatherUnavailable { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },
}

impl FavoritesError {
    /// Create a new not-found error
    #[must_use]
    pub fn not_found(id: u64) -> Self {
        Self::NotFound { id }
    }

    /// Create a new place resolution error
    pub fn resolution<P: Into<String>, S: Into<String>>(place_id: P, message: S) -> Self {
        Self::Resolution {
            place_id: place_id.into(),
            message: message.into(),
        }
    }

    /// Create a new weather error
    pub fn weather_unavailable<S: Into<String>>(message: S) -> Self {
        Self::WeatherUnavailable {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Stable tag naming the kind of failure (and so the stage that failed)
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            FavoritesError::NotFound { .. } => "not_found",
            FavoritesError::Resolution { .. } => "resolution_error",
            FavoritesError::WeatherUnavailable { .. } => "weather_unavailable",
            FavoritesError::Config { .. } => "config",
            FavoritesError::Validation { .. } => "validation",
            FavoritesError::Cache { .. } => "cache",
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FavoritesError::NotFound { id } => {
                format!("We couldn't find a favorite with id {id}.")
            }
            FavoritesError::Resolution { place_id, .. } => {
                format!("Unable to look up the location for '{place_id}'. Please try again later.")
            }
            FavoritesError::WeatherUnavailable { .. } => {
                "Weather data is currently unavailable. Please try again later.".to_string()
            }
            FavoritesError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            FavoritesError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            FavoritesError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
        }
    }
}
