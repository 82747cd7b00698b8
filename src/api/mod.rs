use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::aggregator::FavoriteAggregator;
use crate::error::FavoritesError;
use crate::models::{Favorite, FavoriteDetail, SearchDetail};

/// Path the router is nested under
pub const API_PREFIX: &str = "/api";

/// Create form; missing fields arrive blank and fail validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub place_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Maps service errors onto HTTP responses
pub struct ApiError(FavoritesError);

impl From<FavoritesError> for ApiError {
    fn from(err: FavoritesError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            FavoritesError::NotFound { .. } => StatusCode::NOT_FOUND,
            FavoritesError::Validation { .. } => StatusCode::BAD_REQUEST,
            FavoritesError::Resolution { .. } | FavoritesError::WeatherUnavailable { .. } => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed: {}", self.0);
        }
        let body = ApiErrorBody {
            error: self.0.kind(),
            message: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

fn redirect(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

pub fn router(aggregator: FavoriteAggregator) -> Router {
    Router::new()
        .route("/", get(list_favorites))
        .route("/favorites", get(list_favorites).post(add_favorite))
        .route("/favorites/{id}", get(favorite_detail))
        .route("/search", get(search_redirect))
        .route("/search/{query}", get(search_detail))
        .with_state(aggregator)
}

async fn list_favorites(State(aggregator): State<FavoriteAggregator>) -> Json<Vec<Favorite>> {
    Json(aggregator.list_favorites())
}

async fn add_favorite(
    State(aggregator): State<FavoriteAggregator>,
    Form(form): Form<NewFavorite>,
) -> Result<Response, ApiError> {
    let id = aggregator.create_favorite(&form.formatted_address, &form.place_id)?;
    Ok(redirect(format!("{API_PREFIX}/favorites/{id}")))
}

async fn favorite_detail(
    State(aggregator): State<FavoriteAggregator>,
    Path(id): Path<u64>,
) -> Result<Json<FavoriteDetail>, ApiError> {
    Ok(Json(aggregator.get_detail(id).await?))
}

async fn search_redirect(Query(params): Query<SearchParams>) -> Result<Response, ApiError> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(FavoritesError::validation("search query must not be empty").into());
    }
    Ok(redirect(format!(
        "{API_PREFIX}/search/{}",
        urlencoding::encode(query)
    )))
}

async fn search_detail(
    State(aggregator): State<FavoriteAggregator>,
    Path(query): Path<String>,
) -> Result<Json<SearchDetail>, ApiError> {
    Ok(Json(aggregator.search(&query).await?))
}
