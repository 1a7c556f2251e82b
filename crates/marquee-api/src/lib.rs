//! JSON REST API for the Marquee catalog.
//!
//! Exposes an axum [`Router`] backed by any [`marquee_core::store::CatalogStore`].
//! Tracing middleware, binding and shutdown are the caller's responsibility.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Liveness message |
//! | `GET`  | `/movies` | Optional `?genre=<name>`; at most 100, ordered by id |
//! | `GET`  | `/movies/{id}` | 404 if not found |
//! | `GET`  | `/genres` | Ordered by name |

pub mod error;
pub mod genres;
pub mod movies;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use marquee_core::store::CatalogStore;
use serde_json::{Value, json};

pub use error::ApiError;

/// Body of `GET /`.
pub const STATUS_MESSAGE: &str = "this api is running";

/// Build a fully-materialised API router for `store`.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + 'static,
{
  Router::new()
    .route("/", get(root))
    .route("/movies", get(movies::list::<S>))
    .route("/movies/{id}", get(movies::get_one::<S>))
    .route("/genres", get(genres::list::<S>))
    .with_state(store)
}

/// `GET /`
async fn root() -> Json<Value> { Json(json!({ "message": STATUS_MESSAGE })) }
