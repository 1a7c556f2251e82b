//! Integration tests for `load` and `SqliteStore` against temporary files.

use std::path::{Path, PathBuf};

use marquee_core::{Genre, store::CatalogStore};
use marquee_dataset::{COLUMNS_TO_KEEP, Table};
use tempfile::TempDir;

use crate::{Error, LoadReport, SqliteStore, load};

fn row(id: i64, title: &str, genres: &str, date: &str) -> Vec<String> {
  vec![
    id.to_string(),
    title.into(),
    date.into(),
    "7.1".into(),
    "42".into(),
    "Released".into(),
    "95".into(),
    "False".into(),
    "1000".into(),
    "5000".into(),
    "en".into(),
    "3.5".into(),
    genres.into(),
  ]
}

fn clean_table(rows: Vec<Vec<String>>) -> Table {
  Table::new(COLUMNS_TO_KEEP.iter().map(|c| (*c).to_owned()).collect(), rows)
}

fn two_movies() -> Table {
  clean_table(vec![
    row(1, "A", "Action, Drama", "2020-01-01"),
    row(2, "B", "Drama", "2021-01-01"),
  ])
}

fn db_path(dir: &TempDir) -> PathBuf { dir.path().join("db").join("movies.db") }

async fn loaded(table: &Table) -> (TempDir, SqliteStore) {
  let dir = tempfile::tempdir().expect("tempdir");
  load(table, db_path(&dir)).await.expect("load");
  let store = SqliteStore::open(db_path(&dir)).await.expect("open");
  (dir, store)
}

fn raw_pairs(path: &Path, sql: &str) -> Vec<(i64, String)> {
  let conn = rusqlite::Connection::open(path).unwrap();
  let mut stmt = conn.prepare(sql).unwrap();
  let rows = stmt
    .query_map([], |r| {
      let a: i64 = r.get(0)?;
      let b: rusqlite::types::Value = r.get(1)?;
      Ok((a, match b {
        rusqlite::types::Value::Integer(i) => i.to_string(),
        rusqlite::types::Value::Text(t) => t,
        other => format!("{other:?}"),
      }))
    })
    .unwrap()
    .collect::<rusqlite::Result<Vec<_>>>()
    .unwrap();
  rows
}

fn ids(movies: &[marquee_core::Movie]) -> Vec<i64> { movies.iter().map(|m| m.id).collect() }

// ─── Loader ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_builds_vocabulary_and_associations() {
  let dir = tempfile::tempdir().unwrap();
  let report = load(&two_movies(), db_path(&dir)).await.unwrap();
  assert_eq!(report, LoadReport { movies: 2, genres: 2, associations: 3 });

  let genres = raw_pairs(&db_path(&dir), "SELECT genre_id, name FROM genres ORDER BY genre_id");
  assert_eq!(genres, vec![(1, "Action".to_owned()), (2, "Drama".to_owned())]);

  let pairs = raw_pairs(
    &db_path(&dir),
    "SELECT movie_id, genre_id FROM movie_genres ORDER BY movie_id, genre_id",
  );
  assert_eq!(pairs, vec![
    (1, "1".to_owned()),
    (1, "2".to_owned()),
    (2, "2".to_owned()),
  ]);
}

#[tokio::test]
async fn movies_table_has_no_genres_column() {
  let (dir, _store) = loaded(&two_movies()).await;
  let conn = rusqlite::Connection::open(db_path(&dir)).unwrap();
  let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('movies')").unwrap();
  let columns = stmt
    .query_map([], |r| r.get::<_, String>(0))
    .unwrap()
    .collect::<rusqlite::Result<Vec<_>>>()
    .unwrap();
  assert_eq!(columns.len(), 12);
  assert!(!columns.iter().any(|c| c == "genres"));
}

#[tokio::test]
async fn reload_is_destructive_and_stable() {
  let dir = tempfile::tempdir().unwrap();
  let first = load(&two_movies(), db_path(&dir)).await.unwrap();
  let second = load(&two_movies(), db_path(&dir)).await.unwrap();
  assert_eq!(first, second);

  let store = SqliteStore::open(db_path(&dir)).await.unwrap();
  assert_eq!(store.list_movies(None).await.unwrap().len(), 2);
  assert_eq!(store.list_genres().await.unwrap().len(), 2);
}

#[tokio::test]
async fn failed_load_leaves_previous_catalog_intact() {
  let dir = tempfile::tempdir().unwrap();
  load(&two_movies(), db_path(&dir)).await.unwrap();

  // Duplicate primary key: fails inside the transaction.
  let bad = clean_table(vec![
    row(7, "X", "Horror", "2020-01-01"),
    row(7, "Y", "Horror", "2020-01-01"),
  ]);
  let err = load(&bad, db_path(&dir)).await.unwrap_err();
  assert!(matches!(err, Error::Database(_)), "{err}");

  let store = SqliteStore::open(db_path(&dir)).await.unwrap();
  assert_eq!(ids(&store.list_movies(None).await.unwrap()), vec![1, 2]);
}

#[tokio::test]
async fn load_without_genres_column_fails() {
  let dir = tempfile::tempdir().unwrap();
  let table = Table::new(
    vec!["id".into(), "title".into(), "release_date".into()],
    vec![vec!["1".into(), "A".into(), "2020-01-01".into()]],
  );
  let err = load(&table, db_path(&dir)).await.unwrap_err();
  assert!(
    matches!(err, Error::Dataset(marquee_dataset::Error::MissingColumn(ref c)) if c == "genres"),
    "{err}"
  );
  assert!(!db_path(&dir).exists());
}

#[tokio::test]
async fn repeated_genre_token_yields_one_association() {
  let dir = tempfile::tempdir().unwrap();
  let table = clean_table(vec![row(1, "A", "Drama, Drama", "2020-01-01")]);
  let report = load(&table, db_path(&dir)).await.unwrap();
  assert_eq!(report.associations, 1);
}

#[tokio::test]
async fn normalized_id_variants_load_as_one_movie() {
  let mut raw = two_movies();
  raw.rows.push(row(1, "A again", "Action", "2020-01-01"));
  raw.rows[2][0] = " 1".into();
  raw.rows.push(row(2, "B again", "Drama", "2021-01-01"));
  raw.rows[3][0] = "2.0".into();
  raw.rows.push(row(0, "No id", "Drama", "2021-01-01"));
  raw.rows[4][0] = String::new();

  let (clean, report) = marquee_dataset::normalize(&raw, &COLUMNS_TO_KEEP).unwrap();
  assert_eq!(report.duplicates, 2);
  assert_eq!(report.invalid_ids, 1);

  let dir = tempfile::tempdir().unwrap();
  let loaded = load(&clean, db_path(&dir)).await.unwrap();
  assert_eq!(loaded, LoadReport { movies: 2, genres: 2, associations: 3 });
}

#[tokio::test]
async fn store_under_regular_file_is_io_error() {
  let dir = tempfile::tempdir().unwrap();
  let blocker = dir.path().join("not-a-dir");
  std::fs::write(&blocker, "x").unwrap();

  let err = load(&two_movies(), blocker.join("movies.db")).await.unwrap_err();
  assert!(matches!(err, Error::Io(_)), "{err}");
  assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "x");
}

// ─── Queries ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn filter_by_genre() {
  let (_dir, store) = loaded(&two_movies()).await;

  assert_eq!(ids(&store.list_movies(Some("Drama")).await.unwrap()), vec![1, 2]);
  assert_eq!(ids(&store.list_movies(Some("Action")).await.unwrap()), vec![1]);
  assert!(store.list_movies(Some("Western")).await.unwrap().is_empty());
  assert!(store.list_movies(Some("drama")).await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_filter_lists_everything() {
  let (_dir, store) = loaded(&two_movies()).await;
  assert_eq!(ids(&store.list_movies(Some("")).await.unwrap()), vec![1, 2]);
}

#[tokio::test]
async fn list_movies_is_capped_and_ordered() {
  let rows = (1..=150)
    .rev()
    .map(|i| row(i, &format!("Movie {i}"), "Drama", "2020-01-01"))
    .collect();
  let (_dir, store) = loaded(&clean_table(rows)).await;

  let all = store.list_movies(None).await.unwrap();
  assert_eq!(all.len(), 100);
  assert_eq!(ids(&all), (1..=100).collect::<Vec<_>>());

  let drama = store.list_movies(Some("Drama")).await.unwrap();
  assert_eq!(drama.len(), 100);
  assert_eq!(drama.first().map(|m| m.id), Some(1));
}

#[tokio::test]
async fn get_movie_found_and_missing() {
  let (_dir, store) = loaded(&two_movies()).await;

  let movie = store.get_movie(1).await.unwrap().expect("movie 1");
  assert_eq!(movie.title, "A");
  assert_eq!(movie.release_date.to_string(), "2020-01-01");
  assert_eq!(movie.vote_count, 42);
  assert_eq!(movie.runtime, 95);
  assert!(!movie.adult);

  assert!(store.get_movie(3).await.unwrap().is_none());
}

#[tokio::test]
async fn genres_are_ordered_by_name() {
  let table = clean_table(vec![
    row(1, "A", "Thriller, Action", "2020-01-01"),
    row(2, "B", "Comedy", "2020-01-01"),
  ]);
  let (_dir, store) = loaded(&table).await;

  let genres = store.list_genres().await.unwrap();
  assert_eq!(genres, vec![
    Genre { genre_id: 2, name: "Action".into() },
    Genre { genre_id: 3, name: "Comedy".into() },
    Genre { genre_id: 1, name: "Thriller".into() },
  ]);
}

#[tokio::test]
async fn open_missing_store_fails() {
  let dir = tempfile::tempdir().unwrap();
  let err = SqliteStore::open(dir.path().join("absent.db")).await.unwrap_err();
  assert!(matches!(err, Error::Database(_)), "{err}");
  assert!(!dir.path().join("absent.db").exists());
}

#[tokio::test]
async fn queries_are_independent_across_clones() {
  let (_dir, store) = loaded(&two_movies()).await;
  let other = store.clone();

  let (a, b) = tokio::join!(store.list_movies(None), other.get_movie(2));
  assert_eq!(a.unwrap().len(), 2);
  assert_eq!(b.unwrap().map(|m| m.title), Some("B".to_owned()));
}
