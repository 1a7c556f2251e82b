//! [`SqliteStore`]: the SQLite implementation of [`CatalogStore`].

use std::path::PathBuf;

use marquee_core::{
  Genre, Movie,
  store::{CatalogStore, MOVIE_LIST_LIMIT, genre_filter},
};
use rusqlite::{OpenFlags, OptionalExtension as _};
use tracing::{debug, info, warn};

use crate::{
  Result,
  encode::{RawMovie, genre_from_row},
  schema::MOVIE_COLUMNS,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A read-only view of a catalog database file.
///
/// Holds only the path. Every query opens its own connection and closes it
/// before returning, so clones share nothing.
#[derive(Debug, Clone)]
pub struct SqliteStore {
  path: PathBuf,
}

impl SqliteStore {
  /// Point at `path` without touching the file.
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  /// Point at `path` and check that it holds a loaded catalog.
  pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let store = Self::new(path);
    let movies: i64 = store
      .with_connection(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM movies", [], |r| r.get(0))?)
      })
      .await?;
    info!("opened catalog at {} ({movies} movies)", store.path.display());
    Ok(store)
  }

  /// Run `f` on a fresh read-only connection, then close it whatever the
  /// outcome.
  async fn with_connection<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<T> + Send + 'static,
  {
    let conn = tokio_rusqlite::Connection::open_with_flags(
      &self.path,
      OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .await?;

    let result = conn.call(f).await;

    if let Err(e) = conn.close().await {
      warn!("failed to close {}: {e}", self.path.display());
    }
    Ok(result?)
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = crate::Error;

  async fn list_movies<'a>(&'a self, genre: Option<&'a str>) -> Result<Vec<Movie>> {
    let genre = genre_filter(genre).map(str::to_owned);
    let limit = MOVIE_LIST_LIMIT as i64;
    debug!("list_movies genre={genre:?}");

    let raws: Vec<RawMovie> = self
      .with_connection(move |conn| {
        let rows = if let Some(name) = genre {
          let mut stmt = conn.prepare(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies m
               JOIN movie_genres mg ON mg.movie_id = m.id
               JOIN genres g        ON g.genre_id  = mg.genre_id
              WHERE g.name = ?1
              ORDER BY m.id
              LIMIT ?2"
          ))?;
          let rows = stmt
            .query_map(rusqlite::params![name, limit], RawMovie::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          rows
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies m ORDER BY m.id LIMIT ?1"
          ))?;
          let rows = stmt
            .query_map(rusqlite::params![limit], RawMovie::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          rows
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMovie::into_movie).collect()
  }

  async fn get_movie(&self, id: i64) -> Result<Option<Movie>> {
    debug!("get_movie id={id}");

    let raw: Option<RawMovie> = self
      .with_connection(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {MOVIE_COLUMNS} FROM movies m WHERE m.id = ?1"),
            rusqlite::params![id],
            RawMovie::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawMovie::into_movie).transpose()
  }

  async fn list_genres(&self) -> Result<Vec<Genre>> {
    debug!("list_genres");

    self
      .with_connection(|conn| {
        let mut stmt = conn.prepare("SELECT genre_id, name FROM genres ORDER BY name")?;
        let genres = stmt
          .query_map([], genre_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(genres)
      })
      .await
  }
}
