//! The schema loader.
//!
//! Rebuilds the whole database from a cleaned table. Rows are decoded and
//! the genre vocabulary is folded before the database is touched, so a bad
//! row leaves the existing store as it was. Everything after that runs in one
//! transaction.

use std::{fs, path::Path};

use marquee_core::{Genre, Movie, MovieGenre};
use marquee_dataset::{GenreVocabulary, Table, decode_rows};
use tracing::{debug, info, warn};

use crate::{Result, encode::encode_date, schema::SCHEMA};

/// Row counts written by one [`load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
  pub movies:       usize,
  pub genres:       usize,
  pub associations: usize,
}

/// Drop, recreate and populate the store at `path` from `clean`.
///
/// Must not run while anything else has the file open.
pub async fn load(clean: &Table, path: impl AsRef<Path>) -> Result<LoadReport> {
  let path = path.as_ref();

  let rows = decode_rows(clean)?;
  let vocab = GenreVocabulary::build(rows.iter().map(|r| (r.movie.id, r.genres.as_str())));
  let (genres, associations) = vocab.into_parts();
  let movies: Vec<Movie> = rows.into_iter().map(|r| r.movie).collect();
  debug!(
    "decoded {} movies, {} genres, {} associations",
    movies.len(),
    genres.len(),
    associations.len()
  );

  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent)?;
  }

  let conn = tokio_rusqlite::Connection::open(path).await?;
  let result = conn
    .call(move |conn| {
      let tx = conn.transaction()?;
      tx.execute_batch(SCHEMA)?;
      insert_movies(&tx, &movies)?;
      insert_genres(&tx, &genres)?;
      insert_associations(&tx, &associations)?;
      tx.commit()?;

      Ok(LoadReport {
        movies:       movies.len(),
        genres:       genres.len(),
        associations: associations.len(),
      })
    })
    .await;

  if let Err(e) = conn.close().await {
    warn!("failed to close {}: {e}", path.display());
  }

  let report = result?;
  info!(
    movies = report.movies,
    genres = report.genres,
    associations = report.associations,
    "loaded catalog into {}",
    path.display()
  );
  Ok(report)
}

fn insert_movies(tx: &rusqlite::Transaction<'_>, movies: &[Movie]) -> rusqlite::Result<()> {
  let mut stmt = tx.prepare(
    "INSERT INTO movies (
       id, title, release_date, vote_average, vote_count, status,
       runtime, adult, budget, revenue, original_language, popularity
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
  )?;
  for m in movies {
    stmt.execute(rusqlite::params![
      m.id,
      m.title,
      encode_date(m.release_date),
      m.vote_average,
      m.vote_count,
      m.status,
      m.runtime,
      m.adult,
      m.budget,
      m.revenue,
      m.original_language,
      m.popularity,
    ])?;
  }
  Ok(())
}

fn insert_genres(tx: &rusqlite::Transaction<'_>, genres: &[Genre]) -> rusqlite::Result<()> {
  let mut stmt = tx.prepare("INSERT INTO genres (genre_id, name) VALUES (?1, ?2)")?;
  for g in genres {
    stmt.execute(rusqlite::params![g.genre_id, g.name])?;
  }
  Ok(())
}

fn insert_associations(
  tx: &rusqlite::Transaction<'_>,
  associations: &[MovieGenre],
) -> rusqlite::Result<()> {
  let mut stmt = tx.prepare("INSERT INTO movie_genres (movie_id, genre_id) VALUES (?1, ?2)")?;
  for a in associations {
    stmt.execute(rusqlite::params![a.movie_id, a.genre_id])?;
  }
  Ok(())
}
