//! Opt-in weather cache
//!
//! Wraps another [`WeatherProvider`] and keeps responses in the persistent
//! cache keyed by rounded coordinates. Cache failures never fail a lookup;
//! upstream failures are returned unchanged and never cached.

use async_trait::async_trait;
use rand::RngExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::WeatherProvider;
use crate::cache::PersistentCache;
use crate::models::{Location, Weather};
use crate::Result;

pub struct CachedWeatherProvider {
    inner: Arc<dyn WeatherProvider>,
    cache: PersistentCache,
    ttl: Duration,
}

impl CachedWeatherProvider {
    #[must_use]
    pub fn new(inner: Arc<dyn WeatherProvider>, cache: PersistentCache, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    fn jittered_ttl(&self) -> Duration {
        let jitter: f64 = rand::rng().random_range(0.9..1.1);
        self.ttl.mul_f64(jitter)
    }
}

#[async_trait]
impl WeatherProvider for CachedWeatherProvider {
    #[instrument(skip(self), fields(lat = location.latitude, lon = location.longitude))]
    async fn find_by_location(&self, location: &Location) -> Result<Weather> {
        let key = location.cache_key();

        match self.cache.get::<Weather>(&key).await {
            Ok(Some(weather)) if super::check_response(location, &weather).is_ok() => {
                debug!("Serving weather from cache");
                return Ok(weather);
            }
            Ok(_) => {}
            Err(e) => warn!("Weather cache read failed: {:?}", e),
        }

        let weather = self.inner.find_by_location(location).await?;

        if let Err(e) = self
            .cache
            .put(&key, weather.clone(), self.jittered_ttl())
            .await
        {
            warn!("Weather cache write failed: {:?}", e);
        }

        Ok(weather)
    }
}
