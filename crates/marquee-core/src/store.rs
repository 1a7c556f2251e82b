//! The `CatalogStore` trait.
//!
//! Implemented by storage backends (e.g. `marquee-store-sqlite`). The API
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::movie::{Genre, Movie};

/// Maximum number of movies returned by [`CatalogStore::list_movies`].
pub const MOVIE_LIST_LIMIT: usize = 100;

/// Read-only access to a populated catalog.
///
/// Every method is idempotent and independent of any other call. Movies are
/// ordered by id ascending, genres by name ascending.
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// List up to [`MOVIE_LIST_LIMIT`] movies.
  ///
  /// With `Some(name)`, only movies associated with a genre named exactly
  /// `name` are returned. A blank filter is treated as no filter.
  fn list_movies<'a>(
    &'a self,
    genre: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<Movie>, Self::Error>> + Send + 'a;

  /// Look a movie up by id. Returns `None` if not found.
  fn get_movie(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Movie>, Self::Error>> + Send + '_;

  /// List every genre.
  fn list_genres(
    &self,
  ) -> impl Future<Output = Result<Vec<Genre>, Self::Error>> + Send + '_;
}

/// Normalise an optional genre filter: blank strings mean "no filter".
pub fn genre_filter(genre: Option<&str>) -> Option<&str> {
  genre.map(str::trim).filter(|g| !g.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_filter_is_none() {
    assert_eq!(genre_filter(None), None);
    assert_eq!(genre_filter(Some("")), None);
    assert_eq!(genre_filter(Some("   ")), None);
    assert_eq!(genre_filter(Some(" Drama ")), Some("Drama"));
  }
}
