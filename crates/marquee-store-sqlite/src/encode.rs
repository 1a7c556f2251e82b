//! Conversions between [`marquee_core`] types and SQLite column values.
//!
//! Dates are stored as `YYYY-MM-DD` text; everything else maps onto a native
//! SQLite type.

use chrono::NaiveDate;
use marquee_core::{Genre, Movie};
use marquee_dataset::normalize::DATE_FORMAT;

use crate::{Error, Result};

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// A `movies` row as read from SQLite, before the date is decoded.
///
/// Column order matches [`crate::schema::MOVIE_COLUMNS`].
pub struct RawMovie {
  pub id:                i64,
  pub title:             String,
  pub release_date:      String,
  pub vote_average:      f64,
  pub vote_count:        i64,
  pub status:            String,
  pub runtime:           i64,
  pub adult:             bool,
  pub budget:            i64,
  pub revenue:           i64,
  pub original_language: String,
  pub popularity:        f64,
}

impl RawMovie {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      title:             row.get(1)?,
      release_date:      row.get(2)?,
      vote_average:      row.get(3)?,
      vote_count:        row.get(4)?,
      status:            row.get(5)?,
      runtime:           row.get(6)?,
      adult:             row.get(7)?,
      budget:            row.get(8)?,
      revenue:           row.get(9)?,
      original_language: row.get(10)?,
      popularity:        row.get(11)?,
    })
  }

  pub fn into_movie(self) -> Result<Movie> {
    Ok(Movie {
      id:                self.id,
      title:             self.title,
      release_date:      decode_date(&self.release_date)?,
      vote_average:      self.vote_average,
      vote_count:        self.vote_count,
      status:            self.status,
      runtime:           self.runtime,
      adult:             self.adult,
      budget:            self.budget,
      revenue:           self.revenue,
      original_language: self.original_language,
      popularity:        self.popularity,
    })
  }
}

pub fn genre_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Genre> {
  Ok(Genre { genre_id: row.get(0)?, name: row.get(1)? })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn date_round_trips_through_text() {
    let d = NaiveDate::from_ymd_opt(2004, 2, 29).unwrap();
    assert_eq!(encode_date(d), "2004-02-29");
    assert_eq!(decode_date("2004-02-29").unwrap(), d);
  }

  #[test]
  fn bad_stored_date_is_reported() {
    assert!(matches!(decode_date("2004-02-30"), Err(Error::DateParse(_))));
  }
}
