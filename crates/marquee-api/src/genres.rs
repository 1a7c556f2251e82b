//! Handler for `GET /genres`.

use std::sync::Arc;

use axum::{Json, extract::State};
use marquee_core::{Genre, store::CatalogStore};

use crate::error::ApiError;

/// `GET /genres`: every genre, ordered by name.
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Genre>>, ApiError>
where
  S: CatalogStore,
{
  let genres = store.list_genres().await.map_err(ApiError::store)?;
  Ok(Json(genres))
}
