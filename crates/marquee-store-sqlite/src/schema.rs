//! SQL schema for the Marquee SQLite store.
//!
//! The loader always starts from scratch, so the DDL drops before it creates.
//! It runs inside the load transaction; SQLite DDL is transactional.

/// Drop-and-create DDL for the three catalog tables.
pub const SCHEMA: &str = "
DROP TABLE IF EXISTS movie_genres;
DROP TABLE IF EXISTS genres;
DROP TABLE IF EXISTS movies;

CREATE TABLE movies (
    id                INTEGER PRIMARY KEY,
    title             TEXT    NOT NULL,
    release_date      TEXT    NOT NULL,   -- YYYY-MM-DD
    vote_average      REAL    NOT NULL,
    vote_count        INTEGER NOT NULL,
    status            TEXT    NOT NULL,
    runtime           INTEGER NOT NULL,   -- minutes
    adult             BOOLEAN NOT NULL,
    budget            INTEGER NOT NULL,
    revenue           INTEGER NOT NULL,
    original_language TEXT    NOT NULL,
    popularity        REAL    NOT NULL
);

CREATE TABLE genres (
    genre_id INTEGER PRIMARY KEY,
    name     TEXT NOT NULL UNIQUE
);

-- Pairs are deduplicated by the loader; no constraint is declared.
CREATE TABLE movie_genres (
    movie_id INTEGER NOT NULL REFERENCES movies(id),
    genre_id INTEGER NOT NULL REFERENCES genres(genre_id)
);

CREATE INDEX movie_genres_genre_idx ON movie_genres(genre_id);
";

/// Column list shared by every `SELECT` that builds a [`marquee_core::Movie`].
pub const MOVIE_COLUMNS: &str = "m.id, m.title, m.release_date, m.vote_average, m.vote_count, \
   m.status, m.runtime, m.adult, m.budget, m.revenue, m.original_language, m.popularity";
