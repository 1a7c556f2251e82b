//! Error type for `marquee-dataset`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// No input file exists where one was expected.
  #[error("input not found: {0}")]
  InputNotFound(PathBuf),

  /// Discovery found more than one candidate and refuses to guess.
  #[error("ambiguous input in {dir}: {candidates:?}")]
  AmbiguousInput {
    dir:        PathBuf,
    candidates: Vec<PathBuf>,
  },

  #[error("missing column: {0}")]
  MissingColumn(String),

  /// `row` is the 1-based record number, not counting the header.
  #[error("row {row}: invalid {column} value {value:?}")]
  InvalidField {
    row:    usize,
    column: String,
    value:  String,
  },

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("zip error: {0}")]
  Zip(#[from] zip::result::ZipError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
