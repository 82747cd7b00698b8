//! Data models for the favorite-weather service
//!
//! This module contains the core domain models organized by concern:
//! - Favorite: user-saved place references
//! - Location: coordinates and places API results
//! - Weather: current conditions and the daily forecast

pub mod favorite;
pub mod location;
pub mod weather;

use serde::Serialize;

// Re-export all public types for convenient access
pub use favorite::{Favorite, FavoriteBuilder};
pub use location::{Geometry, Location, PlacesResult};
pub use weather::{DAILY_FORECAST_DAYS, DataBlock, DataPoint, Weather};

/// A favorite together with the weather at its location
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FavoriteDetail {
    pub favorite: Favorite,
    pub weather: Weather,
}

/// A searched place together with the weather at its location
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SearchDetail {
    pub place: PlacesResult,
    pub weather: Weather,
}
