//! Dataset handling for the Marquee catalog.
//!
//! Covers everything between the raw CSV export and the rows the schema
//! loader inserts:
//!
//! - [`table`]: in-memory CSV tables.
//! - [`discover`]: locating the raw input file, extracting it from a ZIP
//!   archive if necessary.
//! - [`normalize`]: column projection, required-field filtering, id
//!   deduplication and release-date validation.
//! - [`genres`]: genre token parsing and the genre vocabulary fold.
//! - [`record`]: decoding cleaned rows into [`marquee_core::Movie`] values.

pub mod discover;
pub mod error;
pub mod genres;
pub mod normalize;
pub mod record;
pub mod table;

pub use error::{Error, Result};
pub use genres::GenreVocabulary;
pub use normalize::{COLUMNS_TO_KEEP, NormalizeReport, normalize};
pub use record::{CatalogRow, decode_rows};
pub use table::Table;
