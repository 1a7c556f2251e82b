//! Handler failures and their JSON rendering.
//!
//! Every failure leaves the router as `{"error": "<detail>"}` with a status
//! chosen by [`ApiError::status`].

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
  /// The requested movie does not exist.
  #[error("{0}")]
  NotFound(String),

  /// A path or query parameter failed to parse.
  #[error("{0}")]
  BadRequest(String),

  /// The catalog store could not answer. Fails this request only.
  #[error("catalog unavailable: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a [`marquee_core::store::CatalogStore`] error, logging it.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    tracing::error!("catalog query failed: {e}");
    ApiError::Store(Box::new(e))
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Text placed in the `error` field. Store failures report the
  /// underlying error without the `catalog unavailable` prefix.
  fn detail(&self) -> String {
    match self {
      ApiError::NotFound(m) | ApiError::BadRequest(m) => m.clone(),
      ApiError::Store(e) => e.to_string(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status(), Json(json!({ "error": self.detail() }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_follows_variant() {
    assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
    assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
    let store = ApiError::store(std::io::Error::other("disk gone"));
    assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn detail_is_the_bare_message() {
    assert_eq!(ApiError::NotFound("no such movie".into()).detail(), "no such movie");

    let store = ApiError::store(std::io::Error::other("disk gone"));
    assert_eq!(store.detail(), "disk gone");
    assert_eq!(store.to_string(), "catalog unavailable: disk gone");
  }
}
