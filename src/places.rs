//! Places API client
//!
//! Resolves place identifiers to coordinates through the Place Details
//! endpoint and free-text addresses through the Geocoding endpoint.
//! Every failure surfaces as [`FavoritesError::Resolution`]; nothing is
//! retried here.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::config::PlacesConfig;
use crate::error::FavoritesError;
use crate::models::PlacesResult;
use crate::Result;

/// A places provider that resolves place ids and addresses to coordinates
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Look up a single place by its identifier
    async fn find_by_place_id(&self, place_id: &str) -> Result<PlacesResult>;

    /// Forward geocode a free-text address, best match first
    async fn find_by_address(&self, query: &str) -> Result<Vec<PlacesResult>>;
}

/// Place Details response
#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<PlacesResult>,
    error_message: Option<String>,
}

/// Geocoding response
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlacesResult>,
    error_message: Option<String>,
}

/// HTTP client for the Google Places and Geocoding APIs
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GooglePlacesClient {
    /// Create a new client
    pub fn new(config: &PlacesConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| FavoritesError::config("Places API key is required"))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("favorite-weather/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FavoritesError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        subject: &str,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let start_time = Instant::now();

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() { "request timed out" } else { "request failed" };
                warn!("Places API {} for '{}': {}", reason, subject, e);
                FavoritesError::resolution(subject, format!("{reason}: {e}"))
            })?;

        let status = response.status();
        debug!(
            "Places API responded {} in {:.3}s",
            status,
            start_time.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            return Err(FavoritesError::resolution(
                subject,
                format!("places API returned HTTP {status}"),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            FavoritesError::resolution(subject, format!("invalid places response: {e}"))
        })
    }
}

fn status_message(status: &str, error_message: Option<String>) -> String {
    match error_message {
        Some(detail) => format!("places API status {status}: {detail}"),
        None => format!("places API status {status}"),
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    #[instrument(skip(self))]
    async fn find_by_place_id(&self, place_id: &str) -> Result<PlacesResult> {
        let body: DetailsResponse = self
            .get_json("place/details/json", &[("placeid", place_id)], place_id)
            .await?;

        if body.status != "OK" {
            return Err(FavoritesError::resolution(
                place_id,
                status_message(&body.status, body.error_message),
            ));
        }

        let result = body
            .result
            .ok_or_else(|| FavoritesError::resolution(place_id, "places API returned no result"))?;

        info!(
            "Resolved place '{}' to ({})",
            place_id,
            result.location().format_coordinates()
        );
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn find_by_address(&self, query: &str) -> Result<Vec<PlacesResult>> {
        let body: GeocodingResponse = self
            .get_json("geocode/json", &[("address", query)], query)
            .await?;

        match body.status.as_str() {
            "OK" => {
                info!("Found {} geocoding results for '{}'", body.results.len(), query);
                Ok(body.results)
            }
            "ZERO_RESULTS" => {
                warn!("No results found for '{}'", query);
                Ok(Vec::new())
            }
            other => Err(FavoritesError::resolution(
                query,
                status_message(other, body.error_message),
            )),
        }
    }
}
