//! Favorite places with live weather
//!
//! This library stores favorite places, resolves them through a places
//! API and reports the current weather and daily forecast for each one.

pub mod aggregator;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod places;
pub mod store;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use aggregator::FavoriteAggregator;
pub use cache::PersistentCache;
pub use config::AppConfig;
pub use error::FavoritesError;
pub use models::{Favorite, FavoriteBuilder, FavoriteDetail, Location, PlacesResult, Weather};
pub use places::{GooglePlacesClient, PlacesProvider};
pub use store::{FavoriteStore, InMemoryFavoriteStore};
pub use weather::{CachedWeatherProvider, DarkSkyClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, FavoritesError>;
