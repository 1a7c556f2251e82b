//! Decoding cleaned rows into [`Movie`] values.
//!
//! `id`, `title`, `release_date` and `genres` must be present as columns.
//! Every other movie column is optional: a missing column or an empty cell
//! decodes to the zero value of its type. A non-empty cell that does not
//! parse is an error.

use chrono::NaiveDate;
use marquee_core::Movie;

use crate::{
  Error, Result, Table,
  normalize::{parse_int, parse_release_date},
};

/// A decoded movie plus the raw genres cell it came with.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
  pub movie:  Movie,
  pub genres: String,
}

struct Columns {
  id:                usize,
  title:             usize,
  release_date:      usize,
  genres:            usize,
  vote_average:      Option<usize>,
  vote_count:        Option<usize>,
  status:            Option<usize>,
  runtime:           Option<usize>,
  adult:             Option<usize>,
  budget:            Option<usize>,
  revenue:           Option<usize>,
  original_language: Option<usize>,
  popularity:        Option<usize>,
}

impl Columns {
  fn resolve(table: &Table) -> Result<Self> {
    Ok(Self {
      id:                table.require_column("id")?,
      title:             table.require_column("title")?,
      release_date:      table.require_column("release_date")?,
      genres:            table.require_column("genres")?,
      vote_average:      table.column("vote_average"),
      vote_count:        table.column("vote_count"),
      status:            table.column("status"),
      runtime:           table.column("runtime"),
      adult:             table.column("adult"),
      budget:            table.column("budget"),
      revenue:           table.column("revenue"),
      original_language: table.column("original_language"),
      popularity:        table.column("popularity"),
    })
  }
}

/// One row being decoded; carries the record number for error messages.
struct Cells<'a> {
  row:   usize,
  cells: &'a [String],
}

impl<'a> Cells<'a> {
  fn get(&self, at: Option<usize>) -> &'a str {
    at.and_then(|i| self.cells.get(i))
      .map(|s| s.trim())
      .unwrap_or("")
  }

  fn invalid(&self, column: &str, value: &str) -> Error {
    Error::InvalidField {
      row:    self.row,
      column: column.to_owned(),
      value:  value.to_owned(),
    }
  }

  fn int(&self, column: &str, at: Option<usize>) -> Result<i64> {
    let raw = self.get(at);
    if raw.is_empty() {
      return Ok(0);
    }
    parse_int(raw).ok_or_else(|| self.invalid(column, raw))
  }

  fn float(&self, column: &str, at: Option<usize>) -> Result<f64> {
    let raw = self.get(at);
    if raw.is_empty() {
      return Ok(0.0);
    }
    raw.parse().map_err(|_| self.invalid(column, raw))
  }

  fn flag(&self, column: &str, at: Option<usize>) -> Result<bool> {
    let raw = self.get(at);
    match raw.to_ascii_lowercase().as_str() {
      "" | "false" | "0" => Ok(false),
      "true" | "1" => Ok(true),
      _ => Err(self.invalid(column, raw)),
    }
  }

  fn text(&self, at: Option<usize>) -> String { self.get(at).to_owned() }

  fn date(&self, column: &str, at: usize) -> Result<NaiveDate> {
    let raw = self.get(Some(at));
    parse_release_date(raw).ok_or_else(|| self.invalid(column, raw))
  }
}

/// Decode every row of a cleaned table, in order.
pub fn decode_rows(table: &Table) -> Result<Vec<CatalogRow>> {
  let cols = Columns::resolve(table)?;

  table
    .rows
    .iter()
    .enumerate()
    .map(|(i, cells)| {
      let c = Cells { row: i + 1, cells };

      let id_raw = c.get(Some(cols.id));
      let id = parse_int(id_raw).ok_or_else(|| c.invalid("id", id_raw))?;

      let title = c.text(Some(cols.title));
      if title.is_empty() {
        return Err(c.invalid("title", ""));
      }

      let movie = Movie {
        id,
        title,
        release_date:      c.date("release_date", cols.release_date)?,
        vote_average:      c.float("vote_average", cols.vote_average)?,
        vote_count:        c.int("vote_count", cols.vote_count)?,
        status:            c.text(cols.status),
        runtime:           c.int("runtime", cols.runtime)?,
        adult:             c.flag("adult", cols.adult)?,
        budget:            c.int("budget", cols.budget)?,
        revenue:           c.int("revenue", cols.revenue)?,
        original_language: c.text(cols.original_language),
        popularity:        c.float("popularity", cols.popularity)?,
      };

      Ok(CatalogRow { movie, genres: c.get(Some(cols.genres)).to_owned() })
    })
    .collect()
}
