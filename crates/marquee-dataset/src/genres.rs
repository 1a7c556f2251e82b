//! Genre token parsing and the genre vocabulary.
//!
//! The `genres` cell of a cleaned row is a comma-separated list such as
//! `Action, Science Fiction`. [`GenreVocabulary`] folds over the rows once,
//! assigning ids in first-occurrence order and collecting the association
//! batch for `movie_genres`. The fold is order-dependent and must stay
//! sequential.

use std::collections::{HashMap, HashSet};

use marquee_core::{Genre, MovieGenre};

/// Split a genres cell into trimmed, non-empty tokens.
///
/// Each token loses surrounding whitespace and at most one quote character
/// (`"` or `'`) on each side.
pub fn split_genres(cell: &str) -> impl Iterator<Item = &str> {
  cell
    .split(',')
    .map(|token| strip_one_quote(token.trim()).trim())
    .filter(|token| !token.is_empty())
}

fn strip_one_quote(s: &str) -> &str {
  let s = s.strip_prefix(['"', '\'']).unwrap_or(s);
  s.strip_suffix(['"', '\'']).unwrap_or(s)
}

/// Name → id map plus the association batch, built in one pass.
#[derive(Debug, Default)]
pub struct GenreVocabulary {
  ids:          HashMap<String, i64>,
  genres:       Vec<Genre>,
  associations: Vec<MovieGenre>,
  seen_pairs:   HashSet<MovieGenre>,
}

impl GenreVocabulary {
  pub fn new() -> Self { Self::default() }

  /// Fold every `(movie_id, genres cell)` pair into a fresh vocabulary.
  pub fn build<'a>(rows: impl IntoIterator<Item = (i64, &'a str)>) -> Self {
    rows.into_iter().fold(Self::new(), |mut vocab, (movie_id, cell)| {
      vocab.add_movie(movie_id, cell);
      vocab
    })
  }

  /// Return the id for `name`, assigning the next one if it is new.
  pub fn id_for(&mut self, name: &str) -> i64 {
    if let Some(&id) = self.ids.get(name) {
      return id;
    }
    let id = self.genres.len() as i64 + 1;
    self.ids.insert(name.to_owned(), id);
    self.genres.push(Genre { genre_id: id, name: name.to_owned() });
    id
  }

  /// Record every genre of one movie. A token repeated within the same
  /// movie yields a single association.
  pub fn add_movie(&mut self, movie_id: i64, cell: &str) {
    for name in split_genres(cell) {
      let pair = MovieGenre::new(movie_id, self.id_for(name));
      if self.seen_pairs.insert(pair) {
        self.associations.push(pair);
      }
    }
  }

  /// Genres in id order.
  pub fn genres(&self) -> &[Genre] { &self.genres }

  /// Associations in the order they were encountered.
  pub fn associations(&self) -> &[MovieGenre] { &self.associations }

  pub fn into_parts(self) -> (Vec<Genre>, Vec<MovieGenre>) {
    (self.genres, self.associations)
  }
}
