//! Favorites aggregation
//!
//! Combines the favorite store, the places API and the weather API into the
//! answers the HTTP layer needs. Each pipeline is strictly fail-fast: the
//! first failing stage aborts the request and its error is returned as is.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::cache::PersistentCache;
use crate::config::AppConfig;
use crate::error::FavoritesError;
use crate::models::{Favorite, FavoriteDetail, SearchDetail};
use crate::places::{GooglePlacesClient, PlacesProvider};
use crate::store::{FavoriteStore, InMemoryFavoriteStore};
use crate::weather::{CachedWeatherProvider, DarkSkyClient, WeatherProvider};
use crate::Result;

/// Orchestrates store lookups, place resolution and weather retrieval
#[derive(Clone)]
pub struct FavoriteAggregator {
    store: Arc<dyn FavoriteStore>,
    places: Arc<dyn PlacesProvider>,
    weather: Arc<dyn WeatherProvider>,
}

impl FavoriteAggregator {
    #[must_use]
    pub fn new(
        store: Arc<dyn FavoriteStore>,
        places: Arc<dyn PlacesProvider>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            store,
            places,
            weather,
        }
    }

    /// Wire the HTTP clients described by `config` around an empty store
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let places = Arc::new(GooglePlacesClient::new(&config.places)?);

        let dark_sky: Arc<dyn WeatherProvider> = Arc::new(DarkSkyClient::new(&config.weather)?);
        let weather: Arc<dyn WeatherProvider> = match config.weather.cache_ttl() {
            Some(ttl) => {
                let cache = PersistentCache::open(&config.weather.cache_location)
                    .map_err(|e| FavoritesError::cache(e.to_string()))?;
                info!(
                    "Weather cache enabled at {} (ttl {}s)",
                    config.weather.cache_location,
                    ttl.as_secs()
                );
                Arc::new(CachedWeatherProvider::new(dark_sky, cache, ttl))
            }
            None => dark_sky,
        };

        Ok(Self::new(
            Arc::new(InMemoryFavoriteStore::new()),
            places,
            weather,
        ))
    }

    /// All favorites in insertion order
    #[must_use]
    pub fn list_favorites(&self) -> Vec<Favorite> {
        self.store.find_all()
    }

    /// Save a new favorite and return its assigned id
    #[instrument(skip(self))]
    pub fn create_favorite(&self, address: &str, place_id: &str) -> Result<u64> {
        let address = address.trim();
        let place_id = place_id.trim();
        if address.is_empty() {
            return Err(FavoritesError::validation("address must not be empty"));
        }
        if place_id.is_empty() {
            return Err(FavoritesError::validation("place id must not be empty"));
        }

        let mut favorite = Favorite::builder()
            .address(address)
            .place_id(place_id)
            .build();
        let saved = self.store.save(&mut favorite)?;

        let id = saved
            .id
            .ok_or_else(|| FavoritesError::validation("store did not assign an id"))?;
        info!("Created favorite {} for '{}'", id, address);
        Ok(id)
    }

    /// A favorite plus the current weather at its place
    #[instrument(skip(self))]
    pub async fn get_detail(&self, favorite_id: u64) -> Result<FavoriteDetail> {
        let favorite = self.store.find_by_id(favorite_id)?;

        let place = self.places.find_by_place_id(&favorite.place_id).await?;
        let location = place.geometry.location;
        debug!(
            "Favorite {} resolved to {}",
            favorite_id,
            location.format_coordinates()
        );

        let weather = self.weather.find_by_location(&location).await?;

        Ok(FavoriteDetail { favorite, weather })
    }

    /// Weather for the best geocoding match of a free-text query
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<SearchDetail> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FavoritesError::validation("search query must not be empty"));
        }

        let place = self
            .places
            .find_by_address(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| FavoritesError::resolution(query, "no places match the query"))?;

        let weather = self.weather.find_by_location(&place.location()).await?;

        Ok(SearchDetail { place, weather })
    }
}
