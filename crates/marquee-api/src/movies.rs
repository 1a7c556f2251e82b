//! Handlers for `/movies` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{PathRejection, QueryRejection},
  },
};
use marquee_core::{Movie, store::CatalogStore};
use serde::Deserialize;

use crate::error::ApiError;

/// Detail returned with a 404 from `GET /movies/{id}`.
pub const NOT_FOUND_MESSAGE: &str = "Movie not found, try another ID";

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Exact genre name; empty means unfiltered.
  pub genre: Option<String>,
}

/// `GET /movies[?genre=<name>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Movie>>, ApiError>
where
  S: CatalogStore,
{
  let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let movies = store
    .list_movies(params.genre.as_deref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(movies))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /movies/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Movie>, ApiError>
where
  S: CatalogStore,
{
  let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let movie = store
    .get_movie(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(NOT_FOUND_MESSAGE.to_owned()))?;
  Ok(Json(movie))
}
