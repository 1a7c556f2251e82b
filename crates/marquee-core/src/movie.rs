//! Catalog entities: movies, genres and the association between them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single catalog entry, as stored in the `movies` table and returned by
/// the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
  pub id:                i64,
  pub title:             String,
  /// Serialised as `YYYY-MM-DD`.
  pub release_date:      NaiveDate,
  pub vote_average:      f64,
  pub vote_count:        i64,
  pub status:            String,
  /// Minutes.
  pub runtime:           i64,
  pub adult:             bool,
  pub budget:            i64,
  pub revenue:           i64,
  pub original_language: String,
  pub popularity:        f64,
}

/// A genre name with the id assigned to it during a load.
///
/// Ids are handed out sequentially from 1 in first-occurrence order, so they
/// are only stable within one load of one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
  pub genre_id: i64,
  pub name:     String,
}

/// One row of the `movie_genres` join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieGenre {
  pub movie_id: i64,
  pub genre_id: i64,
}

impl MovieGenre {
  pub fn new(movie_id: i64, genre_id: i64) -> Self { Self { movie_id, genre_id } }
}
